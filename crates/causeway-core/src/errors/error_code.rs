//! CausewayErrorCode trait for harness-facing error codes.

/// Trait for mapping Causeway errors to stable error code strings.
/// Every error enum implements this so external harnesses can branch on a
/// code instead of parsing messages.
pub trait CausewayErrorCode {
    /// Returns the error code string (e.g., "DATASET_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DATASET_ERROR: &str = "DATASET_ERROR";
pub const MISMATCHED_VARIABLES: &str = "MISMATCHED_VARIABLES";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const KNOWLEDGE_CONTRADICTION: &str = "KNOWLEDGE_CONTRADICTION";
pub const DEGENERATE_INPUT: &str = "DEGENERATE_INPUT";
pub const ORACLE_ERROR: &str = "ORACLE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ENSEMBLE_ERROR: &str = "ENSEMBLE_ERROR";
pub const NO_DATASETS: &str = "NO_DATASETS";
pub const CANCELLED: &str = "CANCELLED";
