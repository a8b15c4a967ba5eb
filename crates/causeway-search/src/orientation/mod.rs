//! Pairwise orientation over the standardized, concatenated data.
//!
//! Every unordered pair is evaluated independently against the same skeleton,
//! so the pass parallelizes without coordination; decisions are applied to
//! the output graph afterwards in pair order.

pub mod rules;

pub use rules::{decide, is_candidate, knowledge_decision, Decision, Rule};

use rayon::prelude::*;
use tracing::{debug, info};

use causeway_core::models::ResolvedKnowledge;
use causeway_core::{Dataset, Graph};

use crate::moments::{OneSidedMoments, PairMoments};

/// Counters from one orientation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationStats {
    pub candidates_recovered: usize,
    pub two_cycles: usize,
    pub degenerate_pairs: usize,
}

/// Outcome for one evaluated pair.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PairOutcome {
    /// Not a candidate; nothing is written.
    Skipped,
    /// Statistics were undefined; an adjacent pair stays undirected.
    Degenerate { adjacent: bool },
    Decided {
        decision: Decision,
        rule: Rule,
        adjacent: bool,
    },
}

/// Orients pairs of `data` given the adjacency skeleton and knowledge.
pub struct OrientationEngine<'a> {
    data: &'a Dataset,
    skeleton: &'a Graph,
    knowledge: &'a ResolvedKnowledge,
    parallel: bool,
    verbose: bool,
}

impl<'a> OrientationEngine<'a> {
    pub fn new(data: &'a Dataset, skeleton: &'a Graph, knowledge: &'a ResolvedKnowledge) -> Self {
        Self {
            data,
            skeleton,
            knowledge,
            parallel: true,
            verbose: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Evaluate every pair and build a fresh output graph.
    pub fn orient(&self) -> (Graph, OrientationStats) {
        let n = self.data.num_columns();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();

        let outcomes: Vec<PairOutcome> = if self.parallel {
            pairs.par_iter().map(|&(i, j)| self.evaluate(i, j)).collect()
        } else {
            pairs.iter().map(|&(i, j)| self.evaluate(i, j)).collect()
        };

        let mut graph = Graph::empty(self.data.variables().to_vec());
        let mut stats = OrientationStats::default();

        for (&(i, j), outcome) in pairs.iter().zip(outcomes) {
            match outcome {
                PairOutcome::Skipped => {}
                PairOutcome::Degenerate { adjacent } => {
                    stats.degenerate_pairs += 1;
                    if adjacent {
                        graph.add_undirected(i, j);
                    }
                }
                PairOutcome::Decided {
                    decision,
                    rule,
                    adjacent,
                } => {
                    let written = match decision {
                        Decision::Forward => graph.add_directed(i, j),
                        Decision::Backward => graph.add_directed(j, i),
                        Decision::Undirected => graph.add_undirected(i, j),
                        Decision::TwoCycle(tag) => {
                            stats.two_cycles += 1;
                            graph.add_two_cycle(i, j, tag)
                        }
                        Decision::Absent => false,
                    };
                    if written && !adjacent {
                        stats.candidates_recovered += 1;
                    }
                    self.log_decision(&graph, i, j, rule);
                }
            }
        }

        debug!(
            edges = graph.num_edges(),
            two_cycles = stats.two_cycles,
            recovered = stats.candidates_recovered,
            degenerate = stats.degenerate_pairs,
            "orientation pass complete"
        );
        (graph, stats)
    }

    fn evaluate(&self, i: usize, j: usize) -> PairOutcome {
        let (x, y) = (self.data.column(i), self.data.column(j));
        let adjacent = self.skeleton.is_adjacent(i, j);
        let fixed = self.knowledge.fixed_orientation(i, j);

        // Knowledge needs no statistics once the pair is adjacent.
        if let (true, Some(fixed)) = (adjacent, fixed) {
            return PairOutcome::Decided {
                decision: knowledge_decision(fixed),
                rule: Rule::Knowledge,
                adjacent,
            };
        }

        let one_sided = match OneSidedMoments::compute(x, y) {
            Ok(m) => m,
            Err(e) => return self.degenerate(i, j, adjacent, &e),
        };
        if !is_candidate(adjacent, &one_sided) {
            return PairOutcome::Skipped;
        }
        let moments = match PairMoments::compute(x, y, one_sided) {
            Ok(m) => m,
            Err(e) => return self.degenerate(i, j, adjacent, &e),
        };

        let (decision, rule) = decide(fixed, &moments);
        PairOutcome::Decided {
            decision,
            rule,
            adjacent,
        }
    }

    fn degenerate(&self, i: usize, j: usize, adjacent: bool, e: &dyn std::error::Error) -> PairOutcome {
        debug!(
            x = self.data.variables()[i].name(),
            y = self.data.variables()[j].name(),
            error = %e,
            "degenerate pair statistics"
        );
        PairOutcome::Degenerate { adjacent }
    }

    fn log_decision(&self, graph: &Graph, i: usize, j: usize, rule: Rule) {
        let state = graph.state(i, j);
        if self.verbose {
            info!(x = graph.name(i), y = graph.name(j), ?state, rule = rule.as_str(), "pair oriented");
        } else {
            debug!(x = graph.name(i), y = graph.name(j), ?state, rule = rule.as_str(), "pair oriented");
        }
    }
}
