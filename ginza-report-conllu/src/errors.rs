//! Error types for CoNLL-U reading.

use ginza_report::AnnotateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConlluError {
    /// A line that is not a valid token line. Lines are numbered from 1.
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConlluError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        ConlluError::Malformed {
            line,
            message: message.into(),
        }
    }
}

impl From<ConlluError> for AnnotateError {
    fn from(err: ConlluError) -> Self {
        match err {
            ConlluError::Malformed { line, message } => AnnotateError::Malformed { line, message },
            other @ ConlluError::Io { .. } => AnnotateError::Failed {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CoNLL-U operations.
pub type ConlluResult<T> = Result<T, ConlluError>;
