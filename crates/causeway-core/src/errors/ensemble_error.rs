//! Ensemble merge errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors raised while merging graphs from repeated runs.
#[derive(Debug, thiserror::Error)]
pub enum EnsembleError {
    #[error("no graphs to merge")]
    NoGraphs,

    #[error("graph {index} variables [{found}] do not match [{expected}]")]
    MismatchedVariableSet {
        index: usize,
        expected: String,
        found: String,
    },
}

impl CausewayErrorCode for EnsembleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoGraphs => error_code::ENSEMBLE_ERROR,
            Self::MismatchedVariableSet { .. } => error_code::MISMATCHED_VARIABLES,
        }
    }
}
