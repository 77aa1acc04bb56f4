//! Error types for the health log engine.

use std::path::PathBuf;

/// Rejected input from the logging boundary. Nothing is stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be at most {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("{field} must be greater than 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },
}

/// Failure reading or writing the record table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to persist records at {}: {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed record in {} at line {line}: {message}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl StoreError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        StoreError::PersistenceFailure {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Error returned by tracker actions.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
