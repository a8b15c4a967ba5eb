//! End-to-end skew-based structure search.
//!
//! Pipeline: standardize each dataset, stack them, prune a complete graph with
//! the configured independence oracle, fix knowledge-determined arcs, then
//! orient every candidate pair from sign-partitioned moments.

use std::time::Instant;

use tracing::{info, warn};

use causeway_core::errors::SearchResult;
use causeway_core::models::{SearchOutcome, SearchStats};
use causeway_core::{
    CancellationToken, Dataset, GraphSearch, Knowledge, SearchConfig, SearchError,
};

use crate::adjacency::{orient_background, AdjacencySearch};
use crate::oracle::build_oracle;
use crate::orientation::OrientationEngine;

/// One full search run under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct FangSearch {
    config: SearchConfig,
    cancel: Option<CancellationToken>,
}

impl FangSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Poll `token` between adjacency rounds.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn run(&self, datasets: &[Dataset], knowledge: &Knowledge) -> SearchResult<SearchOutcome> {
        let started = Instant::now();
        self.config.validate()?;
        let data = prepare(datasets)?;

        info!(
            datasets = datasets.len(),
            rows = data.num_rows(),
            variables = data.num_columns(),
            depth = self.config.depth,
            oracle = self.config.oracle.kind.as_str(),
            "starting structure search"
        );

        let oracle = build_oracle(&self.config, &data);
        let resolved = knowledge.resolve(data.variables());

        let mut adjacency = AdjacencySearch::new(oracle.as_ref(), &resolved)
            .with_depth(self.config.depth_bound())
            .with_parallel(self.config.parallel)
            .with_verbose(self.config.verbose);
        if let Some(token) = &self.cancel {
            adjacency = adjacency.with_cancellation(token);
        }
        let mut skeleton = adjacency.search()?;
        orient_background(&mut skeleton.graph, &resolved);

        let (graph, orientation) = OrientationEngine::new(&data, &skeleton.graph, &resolved)
            .with_parallel(self.config.parallel)
            .with_verbose(self.config.verbose)
            .orient();

        let stats = SearchStats {
            tests_run: skeleton.tests_run,
            degenerate_tests: skeleton.degenerate_tests,
            depth_reached: skeleton.depth_reached,
            candidates_recovered: orientation.candidates_recovered,
            two_cycles: orientation.two_cycles,
            degenerate_pairs: orientation.degenerate_pairs,
        };

        let cycles = graph.directed_cycles();
        if !cycles.is_empty() {
            info!(count = cycles.len(), ?cycles, "directed feedback in output graph");
        }
        if orientation.degenerate_pairs > 0 {
            warn!(pairs = orientation.degenerate_pairs, "pairs left unoriented on degenerate statistics");
        }

        let elapsed = started.elapsed();
        info!(
            edges = graph.num_edges(),
            tests = stats.tests_run,
            elapsed_ms = elapsed.as_millis() as u64,
            "structure search complete"
        );

        Ok(SearchOutcome {
            graph,
            skeleton: Some(skeleton),
            elapsed,
            stats,
        })
    }
}

impl GraphSearch for FangSearch {
    fn search(&self, datasets: &[Dataset], knowledge: &Knowledge) -> SearchResult<SearchOutcome> {
        self.run(datasets, knowledge)
    }
}

/// Check, standardize, and stack the input datasets.
pub fn prepare(datasets: &[Dataset]) -> SearchResult<Dataset> {
    if datasets.is_empty() {
        return Err(SearchError::NoDatasets);
    }
    Dataset::check_compatible(datasets)?;
    let standardized: Vec<Dataset> = datasets.iter().map(Dataset::standardize).collect();
    Ok(Dataset::concatenate(&standardized)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::CausewayErrorCode;

    #[test]
    fn empty_input_is_rejected() {
        let err = FangSearch::default().run(&[], &Knowledge::new()).unwrap_err();
        assert!(matches!(err, SearchError::NoDatasets));
    }

    #[test]
    fn mismatched_variables_are_rejected() {
        let a = Dataset::from_columns(["x", "y"], vec![vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        let b = Dataset::from_columns(["x", "z"], vec![vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        let err = FangSearch::default().run(&[a, b], &Knowledge::new()).unwrap_err();
        assert_eq!(err.error_code(), causeway_core::errors::error_code::MISMATCHED_VARIABLES);
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let data = Dataset::from_columns(["x", "y"], vec![vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        let config = SearchConfig {
            depth: -3,
            ..SearchConfig::default()
        };
        let err = FangSearch::new(config).run(&[data], &Knowledge::new()).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn prepare_standardizes_each_dataset_before_stacking() {
        let a = Dataset::from_columns(["x"], vec![vec![1.0, 3.0]]).unwrap();
        let b = Dataset::from_columns(["x"], vec![vec![100.0, 300.0]]).unwrap();
        let data = prepare(&[a, b]).unwrap();
        assert_eq!(data.num_rows(), 4);
        let col = data.column(0);
        assert!((col[0] - col[2]).abs() < 1e-12);
        assert!((col[1] - col[3]).abs() < 1e-12);
    }
}
