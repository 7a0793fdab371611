mod behavior;
pub mod components;
mod element;
mod focus;
mod layout;
mod scroll;
mod tree;
mod viewport;

pub use behavior::*;
pub use components::*;
pub use element::{Element, ElementId, PerAxis};
pub(crate) use element::AxisExt;
pub use viewport::*;
