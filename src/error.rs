//! Error types for report generation.

use thiserror::Error;

use crate::token::MalformedSentence;

/// Errors raised by an [`Annotator`](crate::Annotator).
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The annotator could not be started (missing program, model not installed).
    #[error("annotator unavailable: {0}")]
    Unavailable(String),

    /// The annotator ran but reported a failure.
    #[error("annotator failed: {message}")]
    Failed { message: String },

    /// The annotator produced output that could not be read.
    #[error("malformed annotator output at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Errors that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Annotating an input block failed. Blocks are numbered from 1.
    #[error("block {block}: {source}")]
    Annotate {
        block: usize,
        #[source]
        source: AnnotateError,
    },

    /// A sentence broke the annotator's tree contract.
    #[error("block {block}, sentence {sentence}: {source}")]
    MalformedSentence {
        block: usize,
        sentence: usize,
        #[source]
        source: MalformedSentence,
    },

    /// Error loading the report configuration.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
