use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Error type returned by store, query, analytics export and generation functions.
///
/// Only [`InventoryError::InvalidOperator`] is meant to abort a query. Per-source failures are
/// wrapped in [`InventoryError::SourceRead`] and reported without stopping the pipeline.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Underlying I/O error (e.g. data directory missing, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encode/decode error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source does not have the shape the caller asked for (e.g. a projected column is not
    /// in its header).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Reading one source failed. The pipeline reports this and keeps going.
    #[error("{source}")]
    SourceRead {
        source_id: String,
        source: Box<InventoryError>,
    },

    /// A filter predicate used an operator outside `==, !=, <, >, <=, >=`.
    #[error("Invalid operator: {operator}")]
    InvalidOperator { operator: String },

    /// Writing the export file failed. The in-memory result is unaffected.
    #[error("failed to write export '{}': {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        source: Box<InventoryError>,
    },

    /// An argument was outside the range an operation accepts.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl InventoryError {
    /// Wrap `self` as a failure of the source named `source_id`.
    pub fn in_source(self, source_id: impl Into<String>) -> Self {
        Self::SourceRead {
            source_id: source_id.into(),
            source: Box::new(self),
        }
    }

    /// Identifier of the failing source, if this is a [`InventoryError::SourceRead`].
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::SourceRead { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}
