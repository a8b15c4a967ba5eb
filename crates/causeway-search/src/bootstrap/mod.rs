//! Bootstrap ensembles: repeat a search on resampled data and merge.

pub mod ensemble;

pub use ensemble::{merge, EdgeShape, EnsembleGraph, PairFrequency};

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use causeway_core::config::{BootstrapConfig, EnsemblePolicy};
use causeway_core::errors::SearchResult;
use causeway_core::models::{SearchOutcome, SearchStats};
use causeway_core::{Dataset, GraphSearch, Knowledge, SearchError};

/// Result of an ensemble run.
#[derive(Debug, Clone)]
pub struct EnsembleOutcome {
    pub ensemble: EnsembleGraph,
    /// Counters summed over all runs; `depth_reached` is the maximum.
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Runs `inner` on `runs` bootstrap resamples of the input and merges the
/// resulting graphs.
///
/// Run `i` resamples every dataset (rows drawn with replacement, same size)
/// from a generator seeded with `seed + i`, so results do not depend on
/// whether runs execute in parallel.
#[derive(Debug, Clone)]
pub struct BootstrapSearch<S: GraphSearch> {
    inner: S,
    runs: usize,
    policy: EnsemblePolicy,
    seed: u64,
    parallel: bool,
}

impl<S: GraphSearch> BootstrapSearch<S> {
    pub fn new(inner: S, config: &BootstrapConfig) -> Self {
        Self {
            inner,
            runs: config.sample_size.max(1),
            policy: config.ensemble,
            seed: config.seed,
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn run(&self, datasets: &[Dataset], knowledge: &Knowledge) -> SearchResult<EnsembleOutcome> {
        let started = Instant::now();
        if datasets.is_empty() {
            return Err(SearchError::NoDatasets);
        }
        Dataset::check_compatible(datasets)?;

        info!(
            runs = self.runs,
            policy = ?self.policy,
            seed = self.seed,
            "starting bootstrap ensemble"
        );

        let one = |i: usize| -> SearchResult<SearchOutcome> {
            let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(i as u64));
            let resampled: Vec<Dataset> = datasets.iter().map(|d| d.resample(&mut rng)).collect();
            let outcome = self.inner.search(&resampled, knowledge)?;
            debug!(run = i, edges = outcome.graph.num_edges(), "bootstrap run complete");
            Ok(outcome)
        };

        let outcomes: Vec<SearchOutcome> = if self.parallel {
            (0..self.runs).into_par_iter().map(one).collect::<SearchResult<_>>()?
        } else {
            (0..self.runs).map(one).collect::<SearchResult<_>>()?
        };

        let stats = outcomes.iter().fold(SearchStats::default(), |mut acc, o| {
            acc.tests_run += o.stats.tests_run;
            acc.degenerate_tests += o.stats.degenerate_tests;
            acc.depth_reached = acc.depth_reached.max(o.stats.depth_reached);
            acc.candidates_recovered += o.stats.candidates_recovered;
            acc.two_cycles += o.stats.two_cycles;
            acc.degenerate_pairs += o.stats.degenerate_pairs;
            acc
        });

        let graphs: Vec<_> = outcomes.into_iter().map(|o| o.graph).collect();
        let ensemble = merge(&graphs, self.policy)?;
        let elapsed = started.elapsed();

        info!(
            edges = ensemble.graph.num_edges(),
            elapsed_ms = elapsed.as_millis() as u64,
            "bootstrap ensemble complete"
        );
        Ok(EnsembleOutcome {
            ensemble,
            stats,
            elapsed,
        })
    }
}

impl<S: GraphSearch> GraphSearch for BootstrapSearch<S> {
    fn search(&self, datasets: &[Dataset], knowledge: &Knowledge) -> SearchResult<SearchOutcome> {
        let outcome = self.run(datasets, knowledge)?;
        Ok(SearchOutcome {
            graph: outcome.ensemble.graph,
            skeleton: None,
            elapsed: outcome.elapsed,
            stats: outcome.stats,
        })
    }
}
