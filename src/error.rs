//! Error types for the tdtactoe crate

use thiserror::Error;

/// Main error type for the tdtactoe crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position ({row}, {col}) is out of bounds (valid range: 0..{size})")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("invalid move input '{input}': {reason}")]
    MalformedInput { input: String, reason: String },

    #[error("persistence unavailable while trying to {operation}: {message}")]
    PersistenceUnavailable { operation: String, message: String },

    #[error("snapshot does not match the expected schema: {message}")]
    SerializationSchemaMismatch { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("no legal actions available")]
    NoLegalActions,

    #[error("board rejected already validated move ({row}, {col}): {reason}")]
    RejectedValidatedMove {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("move input closed")]
    InputClosed,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether a human player can simply be asked for another move.
    pub fn is_reprompt(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. } | Error::CellOccupied { .. } | Error::MalformedInput { .. }
        )
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Error::SerializationSchemaMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
