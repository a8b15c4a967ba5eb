//! Configuration system for Causeway.
//! TOML-based, layered resolution: env > file > defaults.

pub mod bootstrap_config;
pub mod defaults;
pub mod oracle_config;
pub mod search_config;

pub use bootstrap_config::{BootstrapConfig, EnsemblePolicy};
pub use oracle_config::{OracleConfig, OracleKind};
pub use search_config::SearchConfig;
