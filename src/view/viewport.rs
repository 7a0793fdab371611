use std::collections::VecDeque;
use std::rc::Rc;

use glam::{Affine2, Vec2};
use slotmap::SlotMap;

use super::{Element, ElementId};
use crate::config::UiConfig;
use crate::style::{Descriptor, ElementState, Overflow};
use crate::text::TextMeasurer;
use crate::ui::{ButtonState, MouseButton};

/// The root of an element tree. Owns every element, the configuration and the
/// focus relation, and is driven once per frame by the host.
pub struct Gui {
    pub(crate) config: UiConfig,
    pub(crate) nodes: SlotMap<ElementId, Element>,
    pub(crate) root: ElementId,
    pub(crate) focused: Option<ElementId>,
    pub(crate) previous_mouse: Option<Vec2>,
    pub(crate) pending_state_changes: VecDeque<ElementId>,
    pub(crate) hook_depth: u32,
    pub(crate) flushing: bool,
    pub(crate) measurer: Option<Rc<dyn TextMeasurer>>,
    pub(crate) intrinsic_dirty: bool,
}

impl Gui {
    pub fn new(config: UiConfig, root_layout: Descriptor) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root = Element::new(root_layout);
        root.is_root = true;
        let root = nodes.insert(root);
        Self {
            config,
            nodes,
            root,
            focused: None,
            previous_mouse: None,
            pending_state_changes: VecDeque::new(),
            hook_depth: 0,
            flushing: false,
            measurer: None,
            intrinsic_dirty: false,
        }
    }

    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.set_text_measurer(measurer);
        self
    }

    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.measurer = Some(Rc::new(measurer));
    }

    pub fn text_measurer(&self) -> Option<Rc<dyn TextMeasurer>> {
        self.measurer.clone()
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Mutable access to the base descriptor. Edits show up in the resolved
    /// descriptor on the next [`Gui::update`].
    pub fn layout_mut(&mut self, id: ElementId) -> Option<&mut Descriptor> {
        self.nodes.get_mut(id).map(|element| &mut element.layout)
    }

    /// Swaps the base descriptor, blending from the current look when the new
    /// descriptor declares a transition.
    pub fn set_layout(&mut self, id: ElementId, layout: Descriptor) {
        if let Some(element) = self.nodes.get_mut(id) {
            element.layout = layout;
            element.styles.retarget();
        }
    }

    pub fn update_screen_size(&mut self, width: f32, height: f32) {
        tracing::debug!(width, height, "screen size changed");
        self.config.screen_size = Vec2::new(width, height);
    }

    /// Runs one frame: style state, transforms, hover and focus from the
    /// pointer, per-element update hooks, then a full layout pass.
    pub fn update(&mut self, dt_seconds: f32, mouse: Vec2) {
        let did_mouse_move = self.previous_mouse != Some(mouse);
        self.previous_mouse = Some(mouse);

        self.propagate_update(self.root, dt_seconds, mouse, true, did_mouse_move);
        self.flush_state_changes();
        self.refresh();
    }

    /// Recomputes dimensions and rectangles for the whole tree. A second pass
    /// runs when measured content changed size during the first.
    pub fn refresh(&mut self) {
        self.intrinsic_dirty = false;
        self.layout_pass();
        if self.intrinsic_dirty {
            self.intrinsic_dirty = false;
            self.layout_pass();
        }
    }

    /// Delivers a pointer button edge to every element, children before
    /// their parents. Hit testing is up to each behavior.
    pub fn mouse_event(&mut self, button: MouseButton, state: ButtonState) {
        let mut order = Vec::new();
        self.collect_post_order(self.root, &mut order);
        for id in order {
            self.with_behavior(id, (), |behavior, cx| {
                behavior.on_mouse_event(cx, button, state)
            });
        }
    }

    pub fn activate_focused(&mut self, state: ButtonState) {
        let Some(id) = self.focused else {
            return;
        };
        self.with_behavior(id, (), |behavior, cx| match state {
            ButtonState::Pressed => behavior.on_activate_press(cx),
            ButtonState::Released => behavior.on_activate_release(cx),
        });
    }

    pub fn unfocus(&mut self) {
        let Some(id) = self.focused.take() else {
            return;
        };
        tracing::debug!(?id, "unfocus");
        self.set_state(id, ElementState::NEUTRAL);
    }

    /// Moves an element to `state`. Its `on_state_change` hook runs once no
    /// other hook is on the stack.
    pub fn set_state(&mut self, id: ElementId, state: ElementState) {
        let Some(element) = self.nodes.get_mut(id) else {
            tracing::warn!(?id, "state change for a missing element");
            return;
        };
        if element.styles.set_state(state) {
            self.pending_state_changes.push_back(id);
            self.flush_state_changes();
        }
    }

    /// Snaps every element to its resting look: the focused element to
    /// hovered, everything else to neutral. Animations restart.
    pub fn reset_all_transitions(&mut self) {
        let mut order = Vec::new();
        self.collect_pre_order(self.root, &mut order);
        for id in order {
            let focused = self.focused == Some(id);
            let Some(element) = self.nodes.get_mut(id) else {
                continue;
            };
            let state = if focused {
                ElementState::HOVERED
            } else {
                ElementState::NEUTRAL
            };
            let changed = element.state() != &state;
            element.styles.reset(&element.layout, state);
            if changed {
                self.pending_state_changes.push_back(id);
            }
        }
        self.flush_state_changes();
    }

    pub fn set_intrinsic_size(&mut self, id: ElementId, size: Option<Vec2>) {
        if let Some(element) = self.nodes.get_mut(id) {
            if element.intrinsic_size != size {
                element.intrinsic_size = size;
                self.intrinsic_dirty = true;
            }
        }
    }

    fn propagate_update(
        &mut self,
        id: ElementId,
        dt_seconds: f32,
        mouse: Vec2,
        mut mouse_visible: bool,
        did_mouse_move: bool,
    ) {
        let Some(element) = self.nodes.get_mut(id) else {
            return;
        };

        let layout = element.styles.update(&element.layout, dt_seconds);
        element.current_transform = (layout.transform != Affine2::IDENTITY).then(|| {
            let center = element.geometry.position + element.geometry.size / 2.0;
            Affine2::from_translation(center)
                * layout.transform
                * Affine2::from_translation(-center)
        });
        let local_mouse = match element.current_transform {
            Some(transform) => transform.inverse().transform_point2(mouse),
            None => mouse,
        };
        element.pointer.transformed_mouse = local_mouse;

        if self.advance_smooth_scroll(id, dt_seconds) {
            self.update_child_rectangles(id);
        }

        let Some(element) = self.nodes.get_mut(id) else {
            return;
        };
        let layout = element.current_layout();
        let bounding = element.geometry.bounding;
        let clips_x = layout.overflow_x != Overflow::Visible;
        let clips_y = layout.overflow_y != Overflow::Visible;
        let (left, right) = (bounding.left() as f32, bounding.right() as f32);
        let (top, bottom) = (bounding.top() as f32, bounding.bottom() as f32);
        if clips_x && !(left <= local_mouse.x && local_mouse.x <= right) {
            mouse_visible = false;
        }
        if clips_y && !(top <= local_mouse.y && local_mouse.y <= bottom) {
            mouse_visible = false;
        }
        element.pointer.mouse_is_contained = mouse_visible && bounding.contains(local_mouse);
        element.pointer.did_mouse_move = did_mouse_move;

        self.with_behavior(id, (), |behavior, cx| behavior.on_update(cx, dt_seconds));

        let Some(element) = self.nodes.get(id) else {
            return;
        };
        if element.focusable && did_mouse_move {
            let contained = element.pointer.mouse_is_contained;
            let state = element.state().clone();
            if contained && state == ElementState::NEUTRAL {
                self.set_state(id, ElementState::HOVERED);
                self.focused = Some(id);
            } else if !contained && state == ElementState::HOVERED {
                self.set_state(id, ElementState::NEUTRAL);
                if self.focused == Some(id) {
                    self.focused = None;
                }
            }
        }

        let children = self
            .nodes
            .get(id)
            .map(|element| element.children.clone())
            .unwrap_or_default();
        for child in children {
            self.propagate_update(child, dt_seconds, local_mouse, mouse_visible, did_mouse_move);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontId, Length};
    use crate::transition::Transition;
    use crate::view::{Behavior, ElementContext};

    fn config() -> UiConfig {
        UiConfig::new()
            .default_font(FontId::new("body"))
            .screen_size(800.0, 600.0)
    }

    fn layout() -> Descriptor {
        Descriptor::with_font(FontId::new("body"))
    }

    #[test]
    fn hover_follows_mouse_for_focusable_elements() {
        let mut gui = Gui::new(config(), layout());
        let id = gui.create_element(layout().size(100.0, 40.0));
        gui.set_focusable(id, true);
        gui.add_child(gui.root(), id).unwrap();

        gui.update(0.016, Vec2::new(500.0, 500.0));
        gui.update(0.016, Vec2::new(10.0, 10.0));
        assert_eq!(gui.element(id).unwrap().state(), &ElementState::HOVERED);
        assert_eq!(gui.focused(), Some(id));

        // Without movement nothing changes.
        gui.update(0.016, Vec2::new(10.0, 10.0));
        assert_eq!(gui.focused(), Some(id));

        gui.update(0.016, Vec2::new(500.0, 10.0));
        assert_eq!(gui.element(id).unwrap().state(), &ElementState::NEUTRAL);
        assert_eq!(gui.focused(), None);
    }

    #[test]
    fn clipping_ancestor_hides_the_pointer_from_descendants() {
        let mut gui = Gui::new(config(), layout());
        let clip = gui.create_element(
            layout()
                .size(100.0, 50.0)
                .overflow(Overflow::Visible, Overflow::Scroll),
        );
        let tall = gui.create_element(layout().size(100.0, 200.0));
        gui.add_child(gui.root(), clip).unwrap();
        gui.add_child(clip, tall).unwrap();

        gui.update(0.016, Vec2::ZERO);
        gui.update(0.016, Vec2::new(10.0, 150.0));
        assert!(!gui.element(tall).unwrap().mouse_is_contained());

        gui.update(0.016, Vec2::new(10.0, 20.0));
        assert!(gui.element(tall).unwrap().mouse_is_contained());
    }

    #[test]
    fn transform_maps_the_pointer_into_local_space() {
        let mut gui = Gui::new(config(), layout());
        let scaled = gui.create_element(
            layout()
                .size(100.0, 100.0)
                .transform(Affine2::from_scale(Vec2::splat(2.0))),
        );
        gui.add_child(gui.root(), scaled).unwrap();

        gui.update(0.016, Vec2::ZERO);
        // The 2x scale is centered on (50, 50), so screen (140, 140) maps to (95, 95).
        gui.update(0.016, Vec2::new(140.0, 140.0));
        let element = gui.element(scaled).unwrap();
        assert!((element.transformed_mouse() - Vec2::new(95.0, 95.0)).length() < 1e-3);
        assert!(element.mouse_is_contained());
    }

    #[derive(Default)]
    struct StateLog(Rc<std::cell::RefCell<Vec<ElementState>>>);

    impl Behavior for StateLog {
        fn on_state_change(&mut self, cx: &mut ElementContext<'_>) {
            self.0.borrow_mut().push(cx.state());
        }
    }

    #[test]
    fn reset_all_transitions_snaps_and_notifies() {
        let mut gui = Gui::new(config(), layout());
        let log = StateLog::default();
        let seen = log.0.clone();
        let hovered = layout().width(Length::px(50.0)).transition(Transition::new(10.0));
        let id = gui.create_with_behavior(
            layout()
                .width(Length::px(10.0))
                .transition(Transition::new(10.0))
                .with_sub_layout(ElementState::HOVERED, hovered),
            log,
        );
        gui.add_child(gui.root(), id).unwrap();

        gui.set_state(id, ElementState::HOVERED);
        gui.update(1.0, Vec2::ZERO);
        assert_ne!(gui.element(id).unwrap().current_layout().width, Some(Length::px(50.0)));

        gui.reset_all_transitions();
        let element = gui.element(id).unwrap();
        assert_eq!(element.state(), &ElementState::NEUTRAL);
        assert_eq!(element.current_layout().width, Some(Length::px(10.0)));
        assert_eq!(
            *seen.borrow(),
            vec![ElementState::HOVERED, ElementState::NEUTRAL]
        );
    }

    #[test]
    fn set_layout_takes_effect_on_next_update() {
        let mut gui = Gui::new(config(), layout());
        let id = gui.create_element(layout().size(10.0, 10.0));
        gui.add_child(gui.root(), id).unwrap();
        gui.update(0.016, Vec2::ZERO);

        gui.set_layout(id, layout().size(30.0, 10.0));
        gui.update(0.016, Vec2::ZERO);
        assert_eq!(gui.element(id).unwrap().bounding_rect().width, 30);
    }
}
