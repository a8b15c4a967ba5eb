//! Dataset errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors raised while building, combining, or resampling datasets.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset has no variables")]
    NoVariables,

    #[error("dataset has no rows")]
    NoRows,

    #[error("row {row} has {found} values, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{found} columns supplied for {expected} variables")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {column} has {found} rows, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("non-finite value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },

    #[error("duplicate variable name: {name}")]
    DuplicateVariable { name: String },

    #[error("dataset {index} variables [{found}] do not match [{expected}]")]
    MismatchedVariableSet {
        index: usize,
        expected: String,
        found: String,
    },
}

impl CausewayErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MismatchedVariableSet { .. } => error_code::MISMATCHED_VARIABLES,
            _ => error_code::DATASET_ERROR,
        }
    }
}
