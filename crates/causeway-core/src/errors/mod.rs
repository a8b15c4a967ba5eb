//! Error handling for Causeway.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod dataset_error;
pub mod ensemble_error;
pub mod error_code;
pub mod graph_error;
pub mod knowledge_error;
pub mod oracle_error;
pub mod search_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use ensemble_error::EnsembleError;
pub use error_code::CausewayErrorCode;
pub use graph_error::GraphError;
pub use knowledge_error::KnowledgeError;
pub use oracle_error::OracleError;
pub use search_error::SearchError;

/// Convenience alias used throughout the search crates.
pub type SearchResult<T> = Result<T, SearchError>;
