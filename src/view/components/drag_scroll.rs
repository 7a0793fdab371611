use glam::Vec2;

use crate::style::{Axis, Side};
use crate::ui::{ButtonState, MouseButton};
use crate::view::{Behavior, ElementContext};

/// Scrolls its content by dragging with the primary button. When focusable,
/// directional input scrolls by [`crate::config::UiConfig::drag_scroll_distance`]
/// before focus is allowed to leave.
#[derive(Debug, Default)]
pub struct DragScrollContainer {
    focusable: bool,
    dragging: bool,
    drag_start: Vec2,
    scroll_start: Vec2,
}

impl DragScrollContainer {
    pub fn new(focusable: bool) -> Self {
        Self {
            focusable,
            ..Self::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl Behavior for DragScrollContainer {
    fn focusable(&self) -> bool {
        self.focusable
    }

    fn override_focus_change(&self) -> bool {
        self.focusable
    }

    fn on_update(&mut self, cx: &mut ElementContext<'_>, _dt_seconds: f32) {
        if self.dragging {
            let offset = cx.transformed_mouse() - self.drag_start + self.scroll_start;
            cx.set_scroll(offset);
        }
    }

    fn on_mouse_event(
        &mut self,
        cx: &mut ElementContext<'_>,
        button: MouseButton,
        state: ButtonState,
    ) {
        if button != MouseButton::PRIMARY {
            return;
        }
        match state {
            ButtonState::Pressed => {
                let from_anywhere = cx
                    .current_layout()
                    .is_some_and(|layout| layout.allow_scrolling_from_anywhere);
                if cx.mouse_is_contained() || from_anywhere {
                    self.dragging = true;
                    self.drag_start = cx.transformed_mouse();
                    self.scroll_start = cx.scroll();
                }
            }
            ButtonState::Released => self.dragging = false,
        }
    }

    fn consume_focus(&mut self, cx: &mut ElementContext<'_>, axis: Axis, side: Side) -> bool {
        let step = cx.config().drag_scroll_distance;
        // Vertical distances are positive towards the top, horizontal ones
        // towards the right.
        let distance = match (axis, side) {
            (Axis::Vertical, Side::Start) | (Axis::Horizontal, Side::End) => step,
            (Axis::Vertical, Side::End) | (Axis::Horizontal, Side::Start) => -step,
        };
        cx.do_scrolling(axis, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::style::{Descriptor, FontId, Overflow};
    use crate::view::{ElementId, Gui};

    fn layout() -> Descriptor {
        Descriptor::with_font(FontId::new("body"))
    }

    fn list(focusable: bool) -> (Gui, ElementId) {
        let mut gui = Gui::new(
            UiConfig::new()
                .screen_size(800.0, 600.0)
                .smooth_scrolling(false, 12.0),
            layout(),
        );
        let list = gui.create_with_behavior(
            layout()
                .size(100.0, 100.0)
                .overflow(Overflow::Visible, Overflow::Scroll),
            DragScrollContainer::new(focusable),
        );
        gui.add_child(gui.root(), list).unwrap();
        for _ in 0..5 {
            let row = gui.create_element(layout().size(100.0, 40.0));
            gui.add_child(list, row).unwrap();
        }
        gui.refresh();
        (gui, list)
    }

    #[test]
    fn dragging_moves_the_scroll_offset() {
        let (mut gui, list) = list(false);
        gui.update(0.016, Vec2::new(50.0, 50.0));
        gui.mouse_event(MouseButton::Left, ButtonState::Pressed);

        gui.update(0.016, Vec2::new(50.0, 20.0));
        assert_eq!(gui.element(list).unwrap().scroll(), Vec2::new(0.0, -30.0));

        // Dragging past the end clamps.
        gui.update(0.016, Vec2::new(50.0, -400.0));
        assert_eq!(gui.element(list).unwrap().scroll().y, -100.0);

        gui.mouse_event(MouseButton::Left, ButtonState::Released);
        gui.update(0.016, Vec2::new(50.0, 80.0));
        assert_eq!(gui.element(list).unwrap().scroll().y, -100.0);
    }

    #[test]
    fn pressing_outside_does_not_start_a_drag() {
        let (mut gui, list) = list(false);
        gui.update(0.016, Vec2::new(300.0, 50.0));
        gui.mouse_event(MouseButton::Left, ButtonState::Pressed);
        gui.update(0.016, Vec2::new(300.0, 0.0));
        assert_eq!(gui.element(list).unwrap().scroll().y, 0.0);
    }

    #[test]
    fn focusable_container_scrolls_before_releasing_focus() {
        let (mut gui, list) = list(true);
        gui.update(0.016, Vec2::new(500.0, 500.0));

        assert!(gui.change_focus_down());
        assert_eq!(gui.focused(), Some(list));
        assert!(gui.change_focus_down());
        assert_eq!(gui.element(list).unwrap().scroll_target().y, -100.0);

        // Fully scrolled and nothing else to focus.
        assert!(!gui.change_focus_down());
        assert!(gui.change_focus_up());
        assert_eq!(gui.element(list).unwrap().scroll_target().y, 0.0);
    }
}
