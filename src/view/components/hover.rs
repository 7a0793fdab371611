use crate::style::ElementState;
use crate::view::{Behavior, ElementContext};

/// Tracks pointer hover without becoming focusable, so purely decorative
/// containers can still restyle under the mouse.
#[derive(Debug, Default, Clone, Copy)]
pub struct HoverContainer;

impl Behavior for HoverContainer {
    fn on_update(&mut self, cx: &mut ElementContext<'_>, _dt_seconds: f32) {
        let state = if cx.mouse_is_contained() {
            ElementState::HOVERED
        } else {
            ElementState::NEUTRAL
        };
        cx.set_state(state);
    }
}
