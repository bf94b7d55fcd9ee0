//! Editor error type

use shared::ColorParseError;
use thiserror::Error;

/// Errors raised by grid, cell and annotation operations.
///
/// Lookup and hit-test misses are not errors; those return `Option`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Malformed geometric input (bad size, too few corners, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A recoverable condition on user input was not met
    #[error("precondition not met: {0}")]
    PreconditionNotMet(String),

    #[error("no lattice point at ({i}, {j})")]
    UnknownPoint { i: usize, j: usize },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<ColorParseError> for EditorError {
    fn from(err: ColorParseError) -> Self {
        EditorError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        EditorError::Io(err.to_string())
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
