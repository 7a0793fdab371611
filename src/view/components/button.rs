use glam::Vec2;

use super::Label;
use crate::config::UiConfig;
use crate::render::Renderer;
use crate::style::ElementState;
use crate::ui::{ButtonState, ClickEvent, ClickHandlerProp, MouseButton};
use crate::view::{Behavior, Element, ElementContext};

/// Press/release bookkeeping shared by clickable behaviors.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PressTracker {
    drag_start: Vec2,
}

impl PressTracker {
    /// Handles a primary-button edge. Returns `true` when a click completed.
    pub(crate) fn mouse_event(
        &mut self,
        cx: &mut ElementContext<'_>,
        button: MouseButton,
        state: ButtonState,
    ) -> bool {
        if button != MouseButton::PRIMARY {
            return false;
        }
        match state {
            ButtonState::Pressed => {
                if cx.state() == ElementState::HOVERED {
                    self.press(cx);
                }
                false
            }
            ButtonState::Released => self.release(cx),
        }
    }

    pub(crate) fn press(&mut self, cx: &mut ElementContext<'_>) {
        self.drag_start = cx.transformed_mouse();
        cx.set_state(ElementState::ACTIVATED);
    }

    /// Completes a press. Only an element still activated counts as clicked.
    pub(crate) fn release(&mut self, cx: &mut ElementContext<'_>) -> bool {
        if cx.state() != ElementState::ACTIVATED {
            return false;
        }
        cx.set_state(ElementState::HOVERED);
        true
    }

    /// Drops back to hovered once the pointer strays past the drag
    /// forgiveness on either axis.
    pub(crate) fn cancel_on_drag(&mut self, cx: &mut ElementContext<'_>) {
        if cx.state() != ElementState::ACTIVATED || !cx.did_mouse_move() {
            return;
        }
        let forgiveness = cx.config().drag_forgiveness;
        let diff = cx.transformed_mouse() - self.drag_start;
        if diff.x.abs() > forgiveness || diff.y.abs() > forgiveness {
            cx.set_state(ElementState::HOVERED);
        }
    }
}

/// A focusable label that reports clicks from the pointer and from
/// [`crate::view::Gui::activate_focused`]. Its state is mirrored onto its
/// children so nested content can restyle with it.
pub struct Button {
    label: Label,
    press: PressTracker,
    on_click: Option<ClickHandlerProp>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_label(Label::new(text))
    }

    pub fn with_label(label: Label) -> Self {
        Self {
            label,
            press: PressTracker::default(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, handler: impl Into<ClickHandlerProp>) -> Self {
        self.on_click = Some(handler.into());
        self
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    fn click(&self, cx: &ElementContext<'_>) {
        tracing::trace!(id = ?cx.id(), "click");
        if let Some(handler) = &self.on_click {
            handler.call(&mut ClickEvent { target: cx.id() });
        }
    }
}

impl Behavior for Button {
    fn focusable(&self) -> bool {
        true
    }

    fn on_update(&mut self, cx: &mut ElementContext<'_>, dt_seconds: f32) {
        self.label.on_update(cx, dt_seconds);
        self.press.cancel_on_drag(cx);
    }

    fn on_mouse_event(
        &mut self,
        cx: &mut ElementContext<'_>,
        button: MouseButton,
        state: ButtonState,
    ) {
        if self.press.mouse_event(cx, button, state) {
            self.click(cx);
        }
    }

    fn on_activate_press(&mut self, cx: &mut ElementContext<'_>) {
        self.press.press(cx);
    }

    fn on_activate_release(&mut self, cx: &mut ElementContext<'_>) {
        if self.press.release(cx) {
            self.click(cx);
        }
    }

    fn on_state_change(&mut self, cx: &mut ElementContext<'_>) {
        let state = cx.state();
        for child in cx.children() {
            cx.gui_mut().set_state(child, state.clone());
        }
    }

    fn after_rectangle_compute(&mut self, cx: &mut ElementContext<'_>) {
        self.label.layout_text(cx);
    }

    fn draw(&self, element: &Element, config: &UiConfig, renderer: &mut dyn Renderer) {
        self.label.draw_text(element, config, renderer);
    }
}
