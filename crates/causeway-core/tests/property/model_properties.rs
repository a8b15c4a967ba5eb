//! Property tests for the core models: graph pair exclusivity, knowledge
//! resolution, and dataset transforms.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use causeway_core::models::FixedOrientation;
use causeway_core::{Dataset, EdgeState, FeedbackTag, Graph, Knowledge, Variable};

fn variables(n: usize) -> Vec<Variable> {
    (0..n).map(|i| Variable::new(format!("v{i}"), i)).collect()
}

fn records(rows: &[(f64, f64)]) -> Vec<Vec<f64>> {
    rows.iter().map(|(a, b)| vec![*a, *b]).collect()
}

fn edit_strategy() -> impl Strategy<Value = Vec<(usize, usize, u8)>> {
    prop::collection::vec((0_usize..6, 0_usize..6, 0_u8..5), 0..40)
}

// =============================================================================
// Graph: one state per pair, never a self-loop
// =============================================================================
proptest! {
    #[test]
    fn arcs_agree_with_pair_state(edits in edit_strategy()) {
        let mut g = Graph::empty(variables(6));
        for (a, b, op) in edits {
            match op {
                0 => { g.remove_edge(a, b); }
                1 => { g.add_undirected(a, b); }
                2 => { g.add_directed(a, b); }
                3 => { g.add_directed(b, a); }
                _ => { g.add_two_cycle(a, b, FeedbackTag::StrongAsymmetry); }
            }
        }

        for a in 0..6 {
            prop_assert_eq!(g.state(a, a), EdgeState::None);
            prop_assert!(!g.has_arc(a, a));
            for b in 0..6 {
                prop_assert_eq!(g.state(a, b), g.state(b, a));
                if a == b {
                    continue;
                }
                let expected = match g.state(a, b) {
                    EdgeState::None | EdgeState::Undirected => (false, false),
                    EdgeState::Directed { head } => (head == b, head == a),
                    EdgeState::TwoCycle { .. } => (true, true),
                };
                prop_assert_eq!((g.has_arc(a, b), g.has_arc(b, a)), expected);
            }
        }
        prop_assert_eq!(g.edges().count(), g.num_edges());
    }
}

// =============================================================================
// Knowledge: resolution agrees with the named constraints
// =============================================================================
proptest! {
    #[test]
    fn resolved_knowledge_matches_names(
        entries in prop::collection::vec((0_usize..4, 0_usize..4, any::<bool>()), 0..10),
    ) {
        let vars = variables(4);
        let mut k = Knowledge::new();
        for (a, b, required) in entries {
            let (from, to) = (vars[a].name(), vars[b].name());
            let _ = if required { k.add_required(from, to) } else { k.add_forbidden(from, to) };
        }
        let resolved = k.resolve(&vars);

        for a in 0..4 {
            for b in 0..4 {
                let (from, to) = (vars[a].name(), vars[b].name());
                prop_assert_eq!(resolved.is_required(a, b), k.is_required(from, to));
                prop_assert_eq!(resolved.is_forbidden(a, b), k.is_forbidden(from, to));
                prop_assert!(!(k.is_required(from, to) && k.is_forbidden(from, to)));
                if a == b {
                    continue;
                }
                match resolved.fixed_orientation(a, b) {
                    Some(FixedOrientation::Forward) => prop_assert!(!resolved.orients(b, a)),
                    Some(FixedOrientation::Backward) => prop_assert!(!resolved.orients(a, b)),
                    Some(FixedOrientation::Excluded) => {
                        prop_assert!(resolved.is_forbidden(a, b) && resolved.is_forbidden(b, a))
                    }
                    Some(FixedOrientation::Both) | None => {}
                }
            }
        }
    }
}

// =============================================================================
// Datasets: standardization and resampling
// =============================================================================
proptest! {
    #[test]
    fn standardized_columns_are_centered(
        rows in prop::collection::vec((-50.0_f64..50.0, -50.0_f64..50.0), 2..60),
    ) {
        let data = Dataset::from_rows(["a", "b"], &records(&rows)).unwrap();
        for c in 0..2 {
            let col = data.column(c);
            let spread = col.iter().cloned().fold(f64::MIN, f64::max)
                - col.iter().cloned().fold(f64::MAX, f64::min);
            prop_assume!(spread > 0.1);
        }
        let z = data.standardize();
        prop_assert_eq!(z.num_rows(), data.num_rows());
        for c in 0..2 {
            let mean = z.column(c).iter().sum::<f64>() / z.num_rows() as f64;
            prop_assert!(mean.abs() < 1e-9);
            prop_assert!(z.column(c).iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn resampling_keeps_shape_and_draws_existing_rows(
        rows in prop::collection::vec((-5.0_f64..5.0, -5.0_f64..5.0), 1..40),
        seed in any::<u64>(),
    ) {
        let data = Dataset::from_rows(["a", "b"], &records(&rows)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sample = data.resample(&mut rng);
        prop_assert_eq!(sample.num_rows(), data.num_rows());
        prop_assert_eq!(sample.variables(), data.variables());
        for r in 0..sample.num_rows() {
            let row = (sample.value(r, 0), sample.value(r, 1));
            prop_assert!(rows.contains(&row));
        }

        let mut again = ChaCha8Rng::seed_from_u64(seed);
        prop_assert_eq!(data.resample(&mut again), sample);
    }
}
