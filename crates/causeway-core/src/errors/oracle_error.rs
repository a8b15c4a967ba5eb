//! Independence oracle errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors an independence oracle can signal for a single test.
///
/// `DegenerateInput` is recoverable: the adjacency search keeps the edge and
/// moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("variable index {index} out of range for {count} variables")]
    UnknownVariable { index: usize, count: usize },
}

impl OracleError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Whether the search may recover by treating the pair as dependent.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }
}

impl CausewayErrorCode for OracleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DegenerateInput { .. } => error_code::DEGENERATE_INPUT,
            Self::UnknownVariable { .. } => error_code::ORACLE_ERROR,
        }
    }
}
