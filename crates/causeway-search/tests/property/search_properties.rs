//! Property tests for causeway-search: knowledge, graph shape, determinism,
//! and ensemble merging over arbitrary inputs.

use proptest::prelude::*;

use causeway_core::config::EnsemblePolicy;
use causeway_core::{Dataset, EdgeState, FeedbackTag, Graph, Knowledge, SearchConfig, Variable};
use causeway_search::bootstrap::merge;
use causeway_search::moments::{covariance_of_part, OneSidedMoments, Part};
use causeway_search::FangSearch;

const NAMES: [&str; 4] = ["w", "x", "y", "z"];

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (8_usize..40).prop_flat_map(|rows| {
        prop::collection::vec(prop::collection::vec(-3.0_f64..3.0, rows), NAMES.len())
            .prop_map(|cols| Dataset::from_columns(NAMES, cols).unwrap())
    })
}

/// Random forbidden/required pairs; contradictory additions are skipped.
fn knowledge_strategy() -> impl Strategy<Value = Knowledge> {
    prop::collection::vec((0..NAMES.len(), 0..NAMES.len(), any::<bool>()), 0..6).prop_map(
        |entries| {
            let mut k = Knowledge::new();
            for (a, b, required) in entries {
                let _ = if required {
                    k.add_required(NAMES[a], NAMES[b])
                } else {
                    k.add_forbidden(NAMES[a], NAMES[b])
                };
            }
            k
        },
    )
}

fn state_strategy(n: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0_u8..5, n * (n - 1) / 2)
}

fn graph_from_codes(codes: &[u8]) -> Graph {
    let vars: Vec<Variable> = NAMES
        .iter()
        .enumerate()
        .map(|(i, n)| Variable::new(*n, i))
        .collect();
    let mut g = Graph::empty(vars);
    let mut k = 0;
    for a in 0..NAMES.len() {
        for b in (a + 1)..NAMES.len() {
            let state = match codes[k] {
                0 => EdgeState::None,
                1 => EdgeState::Undirected,
                2 => EdgeState::Directed { head: a },
                3 => EdgeState::Directed { head: b },
                _ => EdgeState::TwoCycle {
                    tag: FeedbackTag::StrongAsymmetry,
                },
            };
            g.set_state(a, b, state);
            k += 1;
        }
    }
    g
}

// =============================================================================
// Knowledge is absolute and the output has no self-loops
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn knowledge_is_never_overridden(
        data in dataset_strategy(),
        knowledge in knowledge_strategy(),
    ) {
        let config = SearchConfig { parallel: false, ..SearchConfig::default() };
        let outcome = FangSearch::new(config).run(&[data], &knowledge).unwrap();
        let g = &outcome.graph;
        let idx = |n: &str| g.index_of(n).unwrap();

        for (from, to) in knowledge.required() {
            prop_assert!(g.has_arc(idx(from), idx(to)), "required {} -> {} missing", from, to);
        }
        for (from, to) in knowledge.forbidden() {
            prop_assert!(!g.has_arc(idx(from), idx(to)), "forbidden {} -> {} present", from, to);
        }
        for v in 0..NAMES.len() {
            prop_assert!(!g.is_adjacent(v, v));
            prop_assert!(!g.has_arc(v, v));
        }
    }
}

// =============================================================================
// Scheduling never changes the result
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn parallel_matches_sequential(data in dataset_strategy()) {
        let run = |parallel| {
            let config = SearchConfig { parallel, ..SearchConfig::default() };
            FangSearch::new(config).run(&[data.clone()], &Knowledge::new()).unwrap()
        };
        let (par, seq) = (run(true), run(false));
        prop_assert_eq!(par.graph, seq.graph);
        prop_assert_eq!(par.stats, seq.stats);
    }
}

// =============================================================================
// Partial statistics stay finite and empty subsets are neutral
// =============================================================================
proptest! {
    #[test]
    fn moments_are_finite(
        x in prop::collection::vec(-5.0_f64..5.0, 1..50),
        shift in -5.0_f64..5.0,
    ) {
        let y: Vec<f64> = x.iter().map(|v| v * 0.5 + shift).collect();
        let m = OneSidedMoments::compute(&x, &y).unwrap();
        prop_assert!(m.q1.is_finite() && m.q2.is_finite());
        for part in [Part::All, Part::XPositive, Part::YPositive, Part::XNegative, Part::YNegative] {
            prop_assert!(covariance_of_part(&x, &y, part).is_finite());
        }

        let negatives: Vec<f64> = x.iter().map(|v| -v.abs() - 1.0).collect();
        prop_assert_eq!(covariance_of_part(&negatives, &y, Part::XPositive), 0.0);
        prop_assert_eq!(OneSidedMoments::compute(&negatives, &y).unwrap().q1, 0.0);
    }
}

// =============================================================================
// Ensemble merging
// =============================================================================
proptest! {
    #[test]
    fn majority_edges_appear_in_most_runs(
        runs in prop::collection::vec(state_strategy(NAMES.len()), 1..8),
    ) {
        let graphs: Vec<Graph> = runs.iter().map(|c| graph_from_codes(c)).collect();
        let merged = merge(&graphs, EnsemblePolicy::Majority).unwrap();
        for (key, _) in merged.graph.edges() {
            let seen = graphs
                .iter()
                .filter(|g| g.state(key.lo(), key.hi()).is_adjacent())
                .count();
            prop_assert!(2 * seen > graphs.len());
        }
    }

    #[test]
    fn preserved_is_first_run_and_highest_is_observed(
        runs in prop::collection::vec(state_strategy(NAMES.len()), 1..8),
    ) {
        let graphs: Vec<Graph> = runs.iter().map(|c| graph_from_codes(c)).collect();
        let preserved = merge(&graphs, EnsemblePolicy::Preserved).unwrap();
        prop_assert_eq!(&preserved.graph, &graphs[0]);

        let highest = merge(&graphs, EnsemblePolicy::Highest).unwrap();
        for (key, state) in highest.graph.edges() {
            prop_assert!(graphs.iter().any(|g| g.state(key.lo(), key.hi()) == state));
        }
    }
}
