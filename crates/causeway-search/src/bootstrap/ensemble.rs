//! Merge graphs from repeated runs into one.

use causeway_core::config::EnsemblePolicy;
use causeway_core::errors::EnsembleError;
use causeway_core::models::variable::join_names;
use causeway_core::{EdgeState, Graph, PairKey};

/// Edge shape, ignoring the tag on two-cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeShape {
    None,
    Undirected,
    Directed { head: usize },
    TwoCycle,
}

impl From<EdgeState> for EdgeShape {
    fn from(state: EdgeState) -> Self {
        match state {
            EdgeState::None => Self::None,
            EdgeState::Undirected => Self::Undirected,
            EdgeState::Directed { head } => Self::Directed { head },
            EdgeState::TwoCycle { .. } => Self::TwoCycle,
        }
    }
}

/// How often each shape was observed for one pair, in order of first
/// appearance. `state` is the first concrete state seen with that shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PairFrequency {
    pub pair: PairKey,
    pub observed: Vec<(EdgeState, usize)>,
}

impl PairFrequency {
    /// Fraction of runs with any edge between the pair.
    pub fn edge_frequency(&self, runs: usize) -> f64 {
        if runs == 0 {
            return 0.0;
        }
        let adjacent: usize = self
            .observed
            .iter()
            .filter(|(state, _)| state.is_adjacent())
            .map(|(_, count)| count)
            .sum();
        adjacent as f64 / runs as f64
    }
}

/// Merged graph plus per-pair frequencies.
#[derive(Debug, Clone)]
pub struct EnsembleGraph {
    pub graph: Graph,
    pub runs: usize,
    pub policy: EnsemblePolicy,
    /// Pairs that carried an edge in at least one run, in pair order.
    pub frequencies: Vec<PairFrequency>,
}

/// Merge `graphs` under `policy`. All graphs must share one variable list.
pub fn merge(graphs: &[Graph], policy: EnsemblePolicy) -> Result<EnsembleGraph, EnsembleError> {
    let first = graphs.first().ok_or(EnsembleError::NoGraphs)?;
    for (index, g) in graphs.iter().enumerate().skip(1) {
        if !first.has_same_variables(g) {
            return Err(EnsembleError::MismatchedVariableSet {
                index,
                expected: join_names(first.variables()),
                found: join_names(g.variables()),
            });
        }
    }

    let runs = graphs.len();
    let n = first.num_variables();
    let mut merged = Graph::empty(first.variables().to_vec());
    let mut frequencies = Vec::new();

    for a in 0..n {
        for b in (a + 1)..n {
            let tally = tally(graphs, a, b);
            if tally.iter().all(|(state, _)| !state.is_adjacent()) {
                continue;
            }

            let chosen = match policy {
                EnsemblePolicy::Preserved => first.state(a, b),
                EnsemblePolicy::Highest => most_frequent(tally.iter()).unwrap_or_default(),
                EnsemblePolicy::Majority => {
                    match most_frequent(tally.iter().filter(|(s, _)| s.is_adjacent())) {
                        Some(state) if 2 * count_of(&tally, state) > runs => state,
                        _ => EdgeState::None,
                    }
                }
            };
            merged.set_state(a, b, chosen);

            if let Some(pair) = PairKey::new(a, b) {
                frequencies.push(PairFrequency {
                    pair,
                    observed: tally,
                });
            }
        }
    }

    Ok(EnsembleGraph {
        graph: merged,
        runs,
        policy,
        frequencies,
    })
}

/// Count shapes for one pair across runs, keeping first-seen order.
fn tally(graphs: &[Graph], a: usize, b: usize) -> Vec<(EdgeState, usize)> {
    let mut counts: Vec<(EdgeShape, EdgeState, usize)> = Vec::new();
    for g in graphs {
        let state = g.state(a, b);
        let shape = EdgeShape::from(state);
        match counts.iter_mut().find(|(s, _, _)| *s == shape) {
            Some(entry) => entry.2 += 1,
            None => counts.push((shape, state, 1)),
        }
    }
    counts.into_iter().map(|(_, state, count)| (state, count)).collect()
}

/// Highest count; ties go to the earliest observed state.
fn most_frequent<'a>(entries: impl Iterator<Item = &'a (EdgeState, usize)>) -> Option<EdgeState> {
    let mut best: Option<(EdgeState, usize)> = None;
    for &(state, count) in entries {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((state, count));
        }
    }
    best.map(|(state, _)| state)
}

fn count_of(tally: &[(EdgeState, usize)], state: EdgeState) -> usize {
    tally
        .iter()
        .find(|(s, _)| *s == state)
        .map_or(0, |(_, c)| *c)
}
