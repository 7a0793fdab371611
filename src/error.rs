use thiserror::Error;

use crate::view::ElementId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("default font not initialized; set UiConfig::default_font before building descriptors")]
    FontNotInitialized,

    #[error("invalid size literal: {0:?}")]
    InvalidLiteral(String),

    #[error("the root element cannot be attached as a child")]
    RootAsChild,

    #[error("unknown element: {0:?}")]
    UnknownElement(ElementId),

    #[error("element already has a parent: {0:?}")]
    AlreadyAttached(ElementId),

    #[error("attaching this element would create a cycle")]
    WouldCycle,
}

pub type Result<T> = std::result::Result<T, UiError>;
