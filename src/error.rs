//! Error types shared by the whole crate.

use std::error::Error;
use std::fmt;
use std::io;


/// The stage of the classifier port at which a learner failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `Learner::fit`.
    Fit,
    /// `Classifier::predict`.
    Predict,
}


impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fit => "fit",
            Self::Predict => "predict",
        };
        write!(f, "{name}")
    }
}


/// Errors returned by the transfer procedure and its loaders.
///
/// Every variant is fatal to the call that produced it.
/// Nothing in this crate catches an error and continues with
/// a partial result.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// A parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The target, a source or the pool is empty.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A weight is negative or not finite, or a source id is duplicated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two sets have different numbers of features.
    #[error("dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch {
        /// Number of features expected.
        expected: usize,
        /// Number of features found.
        got: usize,
    },

    /// The learner failed.
    #[error("classifier failed during {stage}: {source}")]
    Classifier {
        /// Where the learner failed.
        stage: Stage,
        /// The learner's own error.
        source: Box<dyn Error + Send + Sync + 'static>,
    },

    /// A failure while one source was processed.
    #[error("source `{source_id}` failed: {error}")]
    Source {
        /// Id of the failing source.
        source_id: String,
        /// What went wrong.
        #[source]
        error: Box<TransferError>,
    },

    /// A malformed line in a data file.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// An I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A failure of `polars`.
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}


impl TransferError {
    /// Wraps a learner error raised at `stage`.
    pub(crate) fn classifier<E>(stage: Stage, error: E) -> Self
        where E: Error + Send + Sync + 'static,
    {
        Self::Classifier { stage, source: Box::new(error) }
    }


    /// Tags `self` with the id of the source being processed.
    pub(crate) fn in_source<S: Into<String>>(self, source_id: S) -> Self {
        Self::Source { source_id: source_id.into(), error: Box::new(self) }
    }


    /// Returns the id of the failing source, if this error was raised
    /// while a specific source was processed.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::Source { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}


/// Short for `Result<T, TransferError>`.
pub type Result<T> = std::result::Result<T, TransferError>;
