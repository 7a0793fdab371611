use std::rc::Rc;

use glam::Vec2;

use super::{Element, ElementId, Gui};
use crate::config::UiConfig;
use crate::geometry::Rect;
use crate::render::Renderer;
use crate::style::{Axis, Descriptor, ElementState, Side};
use crate::text::TextMeasurer;
use crate::ui::{ButtonState, MouseButton};

/// Pluggable per-element logic. Every hook defaults to doing nothing, so a
/// behavior only implements the extension points it needs.
pub trait Behavior {
    /// Whether the element starts out focusable.
    fn focusable(&self) -> bool {
        false
    }

    /// Whether directional input is offered to [`Behavior::consume_focus`]
    /// before focus moves away.
    fn override_focus_change(&self) -> bool {
        false
    }

    fn on_update(&mut self, _cx: &mut ElementContext<'_>, _dt_seconds: f32) {}

    fn on_mouse_event(
        &mut self,
        _cx: &mut ElementContext<'_>,
        _button: MouseButton,
        _state: ButtonState,
    ) {
    }

    fn on_activate_press(&mut self, _cx: &mut ElementContext<'_>) {}

    fn on_activate_release(&mut self, _cx: &mut ElementContext<'_>) {}

    fn on_state_change(&mut self, _cx: &mut ElementContext<'_>) {}

    fn on_scroll(&mut self, _cx: &mut ElementContext<'_>, _axis: Axis, _distance: i32) {}

    /// Runs once this element's rectangles are placed, before its children.
    fn after_rectangle_compute(&mut self, _cx: &mut ElementContext<'_>) {}

    fn on_dispose(&mut self, _cx: &mut ElementContext<'_>) {}

    /// Returns `true` when the directional input was absorbed.
    fn consume_focus(&mut self, _cx: &mut ElementContext<'_>, _axis: Axis, _side: Side) -> bool {
        false
    }

    /// Custom paint, emitted after background and image and before borders.
    fn draw(&self, _element: &Element, _config: &UiConfig, _renderer: &mut dyn Renderer) {}
}

/// Access to the owning [`Gui`] from inside a behavior hook, scoped to one element.
pub struct ElementContext<'a> {
    pub(crate) gui: &'a mut Gui,
    pub(crate) id: ElementId,
}

impl<'a> ElementContext<'a> {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn gui(&self) -> &Gui {
        &*self.gui
    }

    pub fn gui_mut(&mut self) -> &mut Gui {
        &mut *self.gui
    }

    pub fn config(&self) -> &UiConfig {
        self.gui.config()
    }

    pub fn measurer(&self) -> Option<Rc<dyn TextMeasurer>> {
        self.gui.text_measurer()
    }

    pub fn element(&self) -> Option<&Element> {
        self.gui.element(self.id)
    }

    pub fn children(&self) -> Vec<ElementId> {
        self.element()
            .map(|element| element.children().to_vec())
            .unwrap_or_default()
    }

    pub fn state(&self) -> ElementState {
        self.element()
            .map(|element| element.state().clone())
            .unwrap_or_default()
    }

    pub fn set_state(&mut self, state: ElementState) {
        self.gui.set_state(self.id, state);
    }

    pub fn layout_mut(&mut self) -> Option<&mut Descriptor> {
        self.gui.layout_mut(self.id)
    }

    pub fn current_layout(&self) -> Option<&Descriptor> {
        self.element().map(Element::current_layout)
    }

    pub fn position(&self) -> Vec2 {
        self.element().map(Element::position).unwrap_or_default()
    }

    pub fn size(&self) -> Vec2 {
        self.element().map(Element::size).unwrap_or_default()
    }

    pub fn bounding_rect(&self) -> Rect {
        self.element().map(Element::bounding_rect).unwrap_or_default()
    }

    pub fn mouse_is_contained(&self) -> bool {
        self.element().is_some_and(Element::mouse_is_contained)
    }

    pub fn transformed_mouse(&self) -> Vec2 {
        self.element()
            .map(Element::transformed_mouse)
            .unwrap_or_default()
    }

    pub fn did_mouse_move(&self) -> bool {
        self.element().is_some_and(Element::did_mouse_move)
    }

    pub fn scroll(&self) -> Vec2 {
        self.element().map(Element::scroll).unwrap_or_default()
    }

    /// Sets both the scroll offset and its target, clamped per axis.
    pub fn set_scroll(&mut self, offset: Vec2) {
        self.gui.set_scroll_x(self.id, offset.x);
        self.gui.set_scroll_y(self.id, offset.y);
    }

    pub fn do_scrolling(&mut self, axis: Axis, distance: i32) -> bool {
        self.gui.do_scrolling(self.id, axis, distance)
    }

    /// Publishes a measured content size used by the next dimension pass.
    pub fn set_intrinsic_size(&mut self, size: Option<Vec2>) {
        self.gui.set_intrinsic_size(self.id, size);
    }
}
