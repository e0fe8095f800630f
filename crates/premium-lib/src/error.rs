//! Error types for table operations

use crate::table::ColumnType;
use thiserror::Error;

/// Errors raised while reading or deriving table columns
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// A required column is absent
    #[error("missing required column `{column}`")]
    MissingColumn { column: String },

    /// A column used in arithmetic does not hold numeric values
    #[error("column `{column}` holds {found} values, expected numeric")]
    TypeMismatch { column: String, found: ColumnType },

    /// A sequence length disagrees with the expected row count
    #[error("{context}: expected {expected} rows, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A column name is already taken
    #[error("column `{column}` already exists")]
    DuplicateColumn { column: String },
}

impl FrameError {
    pub fn missing(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

pub type Result<T, E = FrameError> = std::result::Result<T, E>;
