use std::collections::BTreeMap;
use std::time::Duration;

use smallvec::SmallVec;

use super::graph::{Graph, PairKey};

/// Conditioning set of variable indices, ascending.
pub type ConditioningSet = SmallVec<[usize; 4]>;

/// Separating sets recorded for pairs removed during adjacency search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SepsetMap {
    inner: BTreeMap<PairKey, ConditioningSet>,
}

impl SepsetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PairKey, set: ConditioningSet) {
        self.inner.insert(key, set);
    }

    pub fn get(&self, a: usize, b: usize) -> Option<&ConditioningSet> {
        PairKey::new(a, b).and_then(|key| self.inner.get(&key))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &ConditioningSet)> {
        self.inner.iter()
    }
}

/// Result of the adjacency phase.
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Surviving adjacencies; knowledge-fixed pairs carry their orientation.
    pub graph: Graph,
    pub sepsets: SepsetMap,
    /// Largest conditioning-set size a round was run for.
    pub depth_reached: usize,
    pub tests_run: usize,
    /// Tests the oracle could not evaluate; those edges were kept.
    pub degenerate_tests: usize,
}

/// Counters describing one search invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub tests_run: usize,
    pub degenerate_tests: usize,
    pub depth_reached: usize,
    /// Non-adjacent pairs brought back by the ratio heuristic.
    pub candidates_recovered: usize,
    pub two_cycles: usize,
    /// Pairs whose statistics were non-finite and were left unoriented.
    pub degenerate_pairs: usize,
}

/// Everything a search returns.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub graph: Graph,
    /// Present for single runs; ensembles have no single skeleton.
    pub skeleton: Option<Skeleton>,
    pub elapsed: Duration,
    pub stats: SearchStats,
}
