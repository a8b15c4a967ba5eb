//! # causeway-core
//!
//! Foundation crate for the Causeway structure search engine.
//! Defines the data model (variables, datasets, graphs, knowledge), the
//! independence-oracle and search traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SearchConfig;
pub use errors::{CausewayErrorCode, SearchError};
pub use models::{Dataset, EdgeState, FeedbackTag, Graph, Knowledge, PairKey, Variable};
pub use traits::{CancellationToken, GraphSearch, IndependenceTest, Verdict};
