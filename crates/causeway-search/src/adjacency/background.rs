//! Apply knowledge-fixed orientations to a skeleton.

use causeway_core::models::{FixedOrientation, ResolvedKnowledge};
use causeway_core::{FeedbackTag, Graph};
use tracing::debug;

/// Orient every adjacent pair whose direction knowledge fixes; pairs with both
/// arcs forbidden are removed. Returns the number of pairs changed.
pub fn orient_background(graph: &mut Graph, knowledge: &ResolvedKnowledge) -> usize {
    if knowledge.is_empty() {
        return 0;
    }
    let pairs: Vec<(usize, usize)> = graph.edges().map(|(key, _)| (key.lo(), key.hi())).collect();

    let mut changed = 0;
    for (a, b) in pairs {
        let applied = match knowledge.fixed_orientation(a, b) {
            Some(FixedOrientation::Forward) => graph.add_directed(a, b),
            Some(FixedOrientation::Backward) => graph.add_directed(b, a),
            Some(FixedOrientation::Both) => graph.add_two_cycle(a, b, FeedbackTag::Required),
            Some(FixedOrientation::Excluded) => graph.remove_edge(a, b),
            None => false,
        };
        if applied {
            debug!(x = graph.name(a), y = graph.name(b), state = ?graph.state(a, b), "knowledge orientation");
            changed += 1;
        }
    }
    changed
}
