//! Top-level search errors.

use super::error_code::{self, CausewayErrorCode};
use super::{ConfigError, DatasetError, EnsembleError, KnowledgeError, OracleError};

/// Errors that abort a search invocation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ensemble error: {0}")]
    Ensemble(#[from] EnsembleError),

    #[error("no datasets supplied")]
    NoDatasets,

    #[error("search cancelled after depth {depth}")]
    Cancelled { depth: usize },
}

impl CausewayErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Dataset(e) => e.error_code(),
            Self::Knowledge(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Ensemble(e) => e.error_code(),
            Self::NoDatasets => error_code::NO_DATASETS,
            Self::Cancelled { .. } => error_code::CANCELLED,
        }
    }
}
