//! # causeway-search
//!
//! Structure search over continuous data with skewed noise. Combines a stable
//! adjacency search driven by a conditional independence oracle with a
//! pairwise orientation step based on sign-partitioned moments, and can wrap
//! either in a bootstrap ensemble.

pub mod adjacency;
pub mod bootstrap;
pub mod fang;
pub mod linalg;
pub mod moments;
pub mod oracle;
pub mod orientation;

pub use adjacency::AdjacencySearch;
pub use bootstrap::{BootstrapSearch, EnsembleOutcome};
pub use fang::FangSearch;
pub use orientation::OrientationEngine;

use causeway_core::errors::SearchResult;
use causeway_core::models::SearchOutcome;
use causeway_core::{Dataset, GraphSearch, Knowledge, SearchConfig};

/// Run the search `config` describes: a single run, or a bootstrap ensemble
/// when `config.bootstrap.sample_size > 0`.
pub fn search(
    config: &SearchConfig,
    datasets: &[Dataset],
    knowledge: &Knowledge,
) -> SearchResult<SearchOutcome> {
    let single = FangSearch::new(config.clone());
    if config.bootstrap.enabled() {
        BootstrapSearch::new(single, &config.bootstrap)
            .with_parallel(config.parallel)
            .search(datasets, knowledge)
    } else {
        single.run(datasets, knowledge)
    }
}
