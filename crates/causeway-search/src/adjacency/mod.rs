//! Adjacency search: prune a complete graph by conditional independence.
//!
//! Rounds run at increasing conditioning-set size `d`. Every test in a round
//! reads the same frozen snapshot of the adjacency structure, and removals
//! are applied only once the round is over, so the result does not depend on
//! pair evaluation order or on how the round is split across threads.

pub mod background;
pub mod subsets;

pub use background::orient_background;
pub use subsets::{binomial, Combinations};

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::{debug, info};

use causeway_core::errors::{OracleError, SearchResult};
use causeway_core::models::{ConditioningSet, ResolvedKnowledge, SepsetMap, Skeleton};
use causeway_core::{CancellationToken, Graph, IndependenceTest, PairKey};

/// Stable adjacency search over one oracle.
pub struct AdjacencySearch<'a> {
    test: &'a dyn IndependenceTest,
    knowledge: &'a ResolvedKnowledge,
    depth: Option<usize>,
    parallel: bool,
    verbose: bool,
    cancel: Option<&'a CancellationToken>,
}

/// Per-round counters shared by worker threads.
#[derive(Default)]
struct Counters {
    tests: AtomicUsize,
    degenerate: AtomicUsize,
}

impl<'a> AdjacencySearch<'a> {
    pub fn new(test: &'a dyn IndependenceTest, knowledge: &'a ResolvedKnowledge) -> Self {
        Self {
            test,
            knowledge,
            depth: None,
            parallel: true,
            verbose: false,
            cancel: None,
        }
    }

    /// Maximum conditioning-set size; `None` is unbounded.
    pub fn with_depth(mut self, depth: Option<usize>) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_cancellation(mut self, cancel: &'a CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn search(&self) -> SearchResult<Skeleton> {
        let variables = self.test.variables().to_vec();
        let n = variables.len();
        let mut graph = Graph::complete(variables);

        for a in 0..n {
            for b in (a + 1)..n {
                if self.knowledge.edge_forbidden(a, b) {
                    graph.remove_edge(a, b);
                }
            }
        }

        let max_depth = self.depth.unwrap_or(n.saturating_sub(2));
        let counters = Counters::default();
        let mut sepsets = SepsetMap::new();
        let mut depth_reached = 0;

        for d in 0..=max_depth {
            if d > 0 && free_degree(&graph) < d {
                break;
            }

            let removed = self.run_round(&graph, d, &counters)?;
            let mut removed: Vec<(PairKey, ConditioningSet)> = removed.into_iter().collect();
            removed.sort_by_key(|(key, _)| *key);
            for (key, set) in removed {
                graph.remove_edge(key.lo(), key.hi());
                sepsets.insert(key, set);
            }
            depth_reached = d;

            debug!(
                depth = d,
                edges = graph.num_edges(),
                tests = counters.tests.load(Ordering::Relaxed),
                "adjacency round complete"
            );

            if let Some(token) = self.cancel {
                token.check_round(d)?;
            }
        }

        Ok(Skeleton {
            graph,
            sepsets,
            depth_reached,
            tests_run: counters.tests.into_inner(),
            degenerate_tests: counters.degenerate.into_inner(),
        })
    }

    /// Test every surviving pair at size `d` against a frozen neighbor table.
    fn run_round(
        &self,
        graph: &Graph,
        d: usize,
        counters: &Counters,
    ) -> Result<DashMap<PairKey, ConditioningSet>, OracleError> {
        let neighbors: Vec<Vec<usize>> = (0..graph.num_variables())
            .map(|x| graph.adjacent_to(x))
            .collect();
        let pairs: Vec<PairKey> = graph.edges().map(|(key, _)| key).collect();
        let removed = DashMap::new();

        let visit = |key: &PairKey| -> Result<(), OracleError> {
            if let Some(set) = self.separate(*key, d, &neighbors, counters)? {
                if self.verbose {
                    info!(
                        x = graph.name(key.lo()),
                        y = graph.name(key.hi()),
                        sepset = ?set.iter().map(|&v| graph.name(v)).collect::<Vec<_>>(),
                        "edge removed"
                    );
                } else {
                    debug!(x = key.lo(), y = key.hi(), sepset = ?set, "edge removed");
                }
                removed.insert(*key, set);
            }
            Ok(())
        };

        if self.parallel {
            pairs.par_iter().try_for_each(visit)?;
        } else {
            pairs.iter().try_for_each(visit)?;
        }
        Ok(removed)
    }

    /// Search for a size-`d` set separating the pair, drawn from the
    /// neighbors of one endpoint excluding the other.
    fn separate(
        &self,
        key: PairKey,
        d: usize,
        neighbors: &[Vec<usize>],
        counters: &Counters,
    ) -> Result<Option<ConditioningSet>, OracleError> {
        let (x, y) = (key.lo(), key.hi());
        if self.knowledge.edge_required(x, y) {
            return Ok(None);
        }

        // At size 0 both sides offer the same single empty set.
        let sides: &[(usize, usize)] = if d == 0 { &[(x, y)] } else { &[(x, y), (y, x)] };

        for &(a, b) in sides {
            let pool: Vec<usize> = neighbors[a].iter().copied().filter(|&v| v != b).collect();
            if pool.len() < d {
                continue;
            }
            for set in Combinations::new(&pool, d) {
                counters.tests.fetch_add(1, Ordering::Relaxed);
                match self.test.test(x, y, &set) {
                    Ok(verdict) if verdict.independent => return Ok(Some(set)),
                    Ok(_) => {}
                    Err(e) if e.is_degenerate() => {
                        counters.degenerate.fetch_add(1, Ordering::Relaxed);
                        debug!(x, y, set = ?set, error = %e, "degenerate test, edge kept");
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(None)
    }
}

/// Largest number of neighbors any variable has besides one partner.
fn free_degree(graph: &Graph) -> usize {
    (0..graph.num_variables())
        .map(|x| graph.adjacent_to(x).len().saturating_sub(1))
        .max()
        .unwrap_or(0)
}
