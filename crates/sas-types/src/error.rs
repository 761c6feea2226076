use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("identifier must not be blank")]
    BlankId,

    #[error("unknown stream path: {0}")]
    UnknownStream(String),

    #[error("invalid page window: {0}")]
    InvalidWindow(String),
}
