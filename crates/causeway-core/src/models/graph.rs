//! Pair-slot graph over a fixed variable set.
//!
//! Each unordered pair of variables owns exactly one slot holding its
//! [`EdgeState`], so a pair can never carry two conflicting edge records and
//! self-loops are unrepresentable. Slots live in a flat upper-triangular arena
//! indexed by [`PairKey`].

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use super::variable::{same_names, Variable};
use crate::errors::GraphError;

/// Unordered pair of distinct variable indices, stored as `(lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    lo: usize,
    hi: usize,
}

impl PairKey {
    /// Returns `None` for a self pair.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    pub fn contains(&self, v: usize) -> bool {
        self.lo == v || self.hi == v
    }

    /// Position of this pair in an upper-triangular arena over `n` variables.
    fn slot(&self, n: usize) -> usize {
        self.lo * (2 * n - self.lo - 1) / 2 + (self.hi - self.lo - 1)
    }
}

/// Why both arcs of a pair were emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTag {
    /// Full covariance sign disagrees with the sign-partitioned covariances
    /// of both variables.
    SignDisagreement,
    /// Both one-sided slope ratios are large.
    StrongAsymmetry,
    /// Knowledge requires both directions.
    Required,
}

impl FeedbackTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignDisagreement => "sign_disagreement",
            Self::StrongAsymmetry => "strong_asymmetry",
            Self::Required => "required",
        }
    }
}

/// State of one unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeState {
    #[default]
    None,
    Undirected,
    /// One arc, pointing into `head`.
    Directed { head: usize },
    /// Both arcs.
    TwoCycle { tag: FeedbackTag },
}

impl EdgeState {
    pub fn is_adjacent(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Serialized form of [`Graph`]: one state per pair, upper-triangular order.
/// Validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSpec {
    pub variables: Vec<Variable>,
    pub slots: Vec<EdgeState>,
}

/// Mutable graph over a fixed, ordered variable set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphSpec", into = "GraphSpec")]
pub struct Graph {
    variables: Vec<Variable>,
    slots: Vec<EdgeState>,
}

impl Graph {
    /// Graph with no edges.
    pub fn empty(variables: Vec<Variable>) -> Self {
        let n = variables.len();
        Self {
            slots: vec![EdgeState::None; n * n.saturating_sub(1) / 2],
            variables,
        }
    }

    /// Graph with an undirected edge between every pair.
    pub fn complete(variables: Vec<Variable>) -> Self {
        let n = variables.len();
        Self {
            slots: vec![EdgeState::Undirected; n * n.saturating_sub(1) / 2],
            variables,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn name(&self, index: usize) -> &str {
        self.variables[index].name()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name() == name)
    }

    pub fn has_same_variables(&self, other: &Graph) -> bool {
        same_names(&self.variables, &other.variables)
    }

    fn slot_of(&self, a: usize, b: usize) -> Option<usize> {
        let n = self.variables.len();
        if a >= n || b >= n {
            return None;
        }
        PairKey::new(a, b).map(|key| key.slot(n))
    }

    /// State of the pair `(a, b)`; self pairs and out-of-range indices have none.
    pub fn state(&self, a: usize, b: usize) -> EdgeState {
        self.slot_of(a, b)
            .map(|slot| self.slots[slot])
            .unwrap_or(EdgeState::None)
    }

    /// State of the pair named `(a, b)`, or `None` if either name is unknown.
    pub fn state_by_name(&self, a: &str, b: &str) -> Option<EdgeState> {
        Some(self.state(self.index_of(a)?, self.index_of(b)?))
    }

    /// Overwrite the pair's state. Returns false (and leaves the graph
    /// untouched) for self pairs, unknown indices, or a head outside the pair.
    pub fn set_state(&mut self, a: usize, b: usize, state: EdgeState) -> bool {
        if let EdgeState::Directed { head } = state {
            if head != a && head != b {
                return false;
            }
        }
        match self.slot_of(a, b) {
            Some(slot) => {
                self.slots[slot] = state;
                true
            }
            None => false,
        }
    }

    pub fn add_undirected(&mut self, a: usize, b: usize) -> bool {
        self.set_state(a, b, EdgeState::Undirected)
    }

    /// Replace the pair's state with the single arc `from -> to`.
    pub fn add_directed(&mut self, from: usize, to: usize) -> bool {
        self.set_state(from, to, EdgeState::Directed { head: to })
    }

    pub fn add_two_cycle(&mut self, a: usize, b: usize, tag: FeedbackTag) -> bool {
        self.set_state(a, b, EdgeState::TwoCycle { tag })
    }

    /// Clear the pair. Returns whether an edge was present.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> bool {
        match self.slot_of(a, b) {
            Some(slot) => {
                let was = self.slots[slot].is_adjacent();
                self.slots[slot] = EdgeState::None;
                was
            }
            None => false,
        }
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.state(a, b).is_adjacent()
    }

    /// Whether the arc `from -> to` is present (alone or as half of a two-cycle).
    pub fn has_arc(&self, from: usize, to: usize) -> bool {
        match self.state(from, to) {
            EdgeState::Directed { head } => head == to,
            EdgeState::TwoCycle { .. } => true,
            _ => false,
        }
    }

    /// Indices adjacent to `x`, ascending.
    pub fn adjacent_to(&self, x: usize) -> Vec<usize> {
        (0..self.variables.len())
            .filter(|&y| self.is_adjacent(x, y))
            .collect()
    }

    /// Every pair with an edge, in `(lo, hi)` order.
    pub fn edges(&self) -> impl Iterator<Item = (PairKey, EdgeState)> + '_ {
        let n = self.variables.len();
        (0..n)
            .flat_map(move |lo| ((lo + 1)..n).map(move |hi| (lo, hi)))
            .zip(self.slots.iter().copied())
            .filter(|(_, state)| state.is_adjacent())
            .map(|((lo, hi), state)| (PairKey { lo, hi }, state))
    }

    pub fn num_edges(&self) -> usize {
        self.slots.iter().filter(|s| s.is_adjacent()).count()
    }

    /// Every directed arc `(tail, head)`; two-cycles contribute both arcs and
    /// undirected edges contribute none.
    pub fn arcs(&self) -> Vec<(usize, usize)> {
        let mut arcs = Vec::new();
        for (key, state) in self.edges() {
            match state {
                EdgeState::Directed { head } => {
                    let tail = if head == key.hi { key.lo } else { key.hi };
                    arcs.push((tail, head));
                }
                EdgeState::TwoCycle { .. } => {
                    arcs.push((key.lo, key.hi));
                    arcs.push((key.hi, key.lo));
                }
                _ => {}
            }
        }
        arcs
    }

    /// Export the directed part of the graph as a `petgraph` digraph whose node
    /// weights are variable names and whose node indices match variable indices.
    pub fn to_digraph(&self) -> DiGraph<String, ()> {
        let mut digraph = DiGraph::with_capacity(self.variables.len(), self.slots.len());
        for v in &self.variables {
            digraph.add_node(v.name().to_string());
        }
        for (tail, head) in self.arcs() {
            digraph.add_edge(NodeIndex::new(tail), NodeIndex::new(head), ());
        }
        digraph
    }

    /// Directed feedback structures: strongly connected components with more
    /// than one variable, each as sorted variable names.
    pub fn directed_cycles(&self) -> Vec<Vec<String>> {
        let digraph = self.to_digraph();
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&digraph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut names: Vec<String> =
                    scc.into_iter().map(|idx| digraph[idx].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }
}

impl TryFrom<GraphSpec> for Graph {
    type Error = GraphError;

    fn try_from(spec: GraphSpec) -> Result<Self, Self::Error> {
        let n = spec.variables.len();
        let expected = n * n.saturating_sub(1) / 2;
        if spec.slots.len() != expected {
            return Err(GraphError::SlotCount {
                variables: n,
                expected,
                found: spec.slots.len(),
            });
        }

        let pairs = (0..n).flat_map(|lo| ((lo + 1)..n).map(move |hi| (lo, hi)));
        for ((lo, hi), state) in pairs.zip(&spec.slots) {
            if let EdgeState::Directed { head } = *state {
                if head != lo && head != hi {
                    return Err(GraphError::HeadOutsidePair { lo, hi, head });
                }
            }
        }

        Ok(Self {
            variables: spec.variables,
            slots: spec.slots,
        })
    }
}

impl From<Graph> for GraphSpec {
    fn from(graph: Graph) -> Self {
        Self {
            variables: graph.variables,
            slots: graph.slots,
        }
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, state) in self.edges() {
            let (a, b) = (self.name(key.lo), self.name(key.hi));
            match state {
                EdgeState::Undirected => writeln!(f, "{a} --- {b}")?,
                EdgeState::Directed { head } if head == key.hi => writeln!(f, "{a} --> {b}")?,
                EdgeState::Directed { .. } => writeln!(f, "{b} --> {a}")?,
                EdgeState::TwoCycle { tag } => writeln!(f, "{a} <=> {b} [{}]", tag.as_str())?,
                EdgeState::None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(n: usize) -> Vec<Variable> {
        (0..n).map(|i| Variable::new(format!("v{i}"), i)).collect()
    }

    #[test]
    fn pair_key_is_unordered() {
        assert_eq!(PairKey::new(3, 1), PairKey::new(1, 3));
        assert!(PairKey::new(2, 2).is_none());
    }

    #[test]
    fn slots_are_distinct_for_every_pair() {
        let n = 7;
        let mut seen = std::collections::HashSet::new();
        for a in 0..n {
            for b in (a + 1)..n {
                let slot = PairKey::new(a, b).unwrap().slot(n);
                assert!(slot < n * (n - 1) / 2);
                assert!(seen.insert(slot));
            }
        }
    }

    #[test]
    fn self_pairs_are_rejected() {
        let mut g = Graph::complete(vars(3));
        assert!(!g.add_directed(1, 1));
        assert!(!g.is_adjacent(1, 1));
        assert_eq!(g.state(0, 0), EdgeState::None);
    }

    #[test]
    fn directed_head_must_belong_to_pair() {
        let mut g = Graph::empty(vars(3));
        assert!(!g.set_state(0, 1, EdgeState::Directed { head: 2 }));
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn arcs_reflect_state() {
        let mut g = Graph::empty(vars(4));
        g.add_directed(2, 0);
        g.add_two_cycle(1, 3, FeedbackTag::StrongAsymmetry);
        g.add_undirected(0, 1);

        assert!(g.has_arc(2, 0));
        assert!(!g.has_arc(0, 2));
        assert!(g.has_arc(1, 3) && g.has_arc(3, 1));
        assert!(!g.has_arc(0, 1));
        assert_eq!(g.arcs(), vec![(2, 0), (1, 3), (3, 1)]);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.adjacent_to(0), vec![1, 2]);
    }

    #[test]
    fn directed_cycles_report_feedback() {
        let mut g = Graph::empty(vars(4));
        g.add_directed(0, 1);
        g.add_directed(1, 2);
        g.add_directed(2, 0);
        g.add_directed(2, 3);
        assert_eq!(
            g.directed_cycles(),
            vec![vec!["v0".to_string(), "v1".to_string(), "v2".to_string()]]
        );
    }

    #[test]
    fn json_round_trip_checks_slots() {
        let mut g = Graph::empty(vars(3));
        g.add_directed(2, 0);
        g.add_two_cycle(1, 2, FeedbackTag::SignDisagreement);
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.arcs(), g.arcs());

        let vars_json = serde_json::to_string(&vars(3)).unwrap();
        let short = format!(r#"{{"variables":{vars_json},"slots":[]}}"#);
        let err = serde_json::from_str::<Graph>(&short).unwrap_err();
        assert!(err.to_string().contains("expected 3"));

        // Slot 0 is the pair (0, 1); head 2 lies outside it.
        let stray = format!(
            r#"{{"variables":{vars_json},"slots":[{{"kind":"directed","head":2}},{{"kind":"none"}},{{"kind":"none"}}]}}"#
        );
        let err = serde_json::from_str::<Graph>(&stray).unwrap_err();
        assert!(err.to_string().contains("outside the pair"));
    }

    #[test]
    fn display_lists_edges() {
        let mut g = Graph::empty(vars(3));
        g.add_directed(1, 0);
        g.add_undirected(1, 2);
        assert_eq!(g.to_string(), "v1 --> v0\nv1 --- v2\n");
    }
}
