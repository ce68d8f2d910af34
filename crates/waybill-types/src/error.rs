use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("trip must pick up from at least one location")]
    EmptyPickup,

    #[error("failed to parse plan document: {0}")]
    Parse(String),

    #[error("failed to serialize plan document: {0}")]
    Serialize(String),

    #[error("failed to read plan document: {0}")]
    Io(String),

    #[error("unsupported plan document format: {0}")]
    UnsupportedFormat(String),
}
