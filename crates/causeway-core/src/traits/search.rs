use crate::errors::SearchResult;
use crate::models::{Dataset, Knowledge, SearchOutcome};

/// A complete structure search: datasets and knowledge in, graph out.
///
/// Implementations must not mutate shared state, so that an ensemble driver
/// can invoke them repeatedly (and concurrently) on resampled data.
pub trait GraphSearch: Send + Sync {
    fn search(&self, datasets: &[Dataset], knowledge: &Knowledge) -> SearchResult<SearchOutcome>;
}
