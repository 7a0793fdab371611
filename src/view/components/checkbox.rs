use std::cell::Cell;
use std::rc::Rc;

use super::{Label, PressTracker};
use crate::config::UiConfig;
use crate::render::Renderer;
use crate::style::Descriptor;
use crate::ui::{ButtonState, MouseButton, ToggleEvent, ToggleHandlerProp};
use crate::view::{Behavior, Element, ElementContext, ElementId, Gui};

/// A button that flips a boolean on every click and swaps between its
/// unchecked and checked descriptors.
pub struct Checkbox {
    label: Label,
    press: PressTracker,
    unchecked: Descriptor,
    checked: Descriptor,
    value: Rc<Cell<bool>>,
    on_toggle: Option<ToggleHandlerProp>,
}

impl Checkbox {
    pub fn new(unchecked: Descriptor, checked: Descriptor, value: bool) -> Self {
        Self {
            label: Label::new(""),
            press: PressTracker::default(),
            unchecked,
            checked,
            value: Rc::new(Cell::new(value)),
            on_toggle: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.label.set_text(text);
        self
    }

    pub fn on_toggle(mut self, handler: impl Into<ToggleHandlerProp>) -> Self {
        self.on_toggle = Some(handler.into());
        self
    }

    /// Shared view of the current value, readable after the checkbox has
    /// been handed to a [`Gui`].
    pub fn value_handle(&self) -> Rc<Cell<bool>> {
        self.value.clone()
    }

    fn current_layout(&self) -> Descriptor {
        if self.value.get() {
            self.checked.clone()
        } else {
            self.unchecked.clone()
        }
    }

    /// Creates the element, attached to nothing, with the descriptor that
    /// matches the initial value.
    pub fn build(self, gui: &mut Gui) -> ElementId {
        let layout = self.current_layout();
        gui.create_with_behavior(layout, self)
    }

    fn toggle(&mut self, cx: &mut ElementContext<'_>) {
        let id = cx.id();
        let checked = !self.value.get();
        self.value.set(checked);
        tracing::trace!(?id, checked, "toggle");
        cx.gui_mut().set_layout(id, self.current_layout());
        if let Some(handler) = &self.on_toggle {
            handler.call(&mut ToggleEvent { target: id, checked });
        }
    }
}

impl Behavior for Checkbox {
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
            self.toggle(cx);
        }
    }

    fn on_activate_press(&mut self, cx: &mut ElementContext<'_>) {
        self.press.press(cx);
    }

    fn on_activate_release(&mut self, cx: &mut ElementContext<'_>) {
        if self.press.release(cx) {
            self.toggle(cx);
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
