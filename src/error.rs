//! Error types for the text-det-eval library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error types that can occur while evaluating detections.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input that makes the requested computation undefined.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Per-image ground-truth and detection collections disagree.
    #[error("Consistency error: {0}")]
    ConsistencyError(String),

    /// Invalid bounding box coordinates.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Label that cannot be used for matching.
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Character that is not part of the label vocabulary.
    #[error("Symbol {0:?} is not in the vocabulary")]
    UnknownSymbol(char),

    /// Malformed ground-truth line.
    #[error("{}:{line}: {message}", .path.display())]
    ParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// No detector output exists for an image that has ground truth.
    #[error("Missing detections: {}", .0.display())]
    MissingDetections(PathBuf),

    /// Threshold outside of [0.0, 1.0].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}
