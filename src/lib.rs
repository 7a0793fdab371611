//! Retained-mode layout and interaction engine for game user interfaces.
//!
//! A [`Gui`] owns an arena of elements styled by [`style::Descriptor`]s. Each
//! frame the host calls [`Gui::update`] with the elapsed time and pointer
//! position, forwards input edges, then paints through a [`Renderer`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod style;
pub mod text;
pub mod transition;
pub mod ui;
pub mod view;

pub use config::UiConfig;
pub use error::{Result, UiError};
pub use geometry::Rect;
pub use render::Renderer;
pub use text::{TextLine, TextMeasurer};
pub use view::{Behavior, Element, ElementContext, ElementId, Gui};
