mod button;
mod checkbox;
mod drag_scroll;
mod hover;
mod label;
mod slider;

pub(crate) use button::PressTracker;
pub use button::Button;
pub use checkbox::*;
pub use drag_scroll::*;
pub use hover::*;
pub use label::*;
pub use slider::*;
