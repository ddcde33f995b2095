use thiserror::Error;

/// Errors produced when parsing the textual form of a type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown proof category: {0}")]
    UnknownCategory(String),

    #[error("actor identity must not be empty")]
    EmptyActor,
}
