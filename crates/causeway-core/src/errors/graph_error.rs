//! Graph errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors raised while rebuilding a graph from its serialized form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("{found} pair slots for {variables} variables, expected {expected}")]
    SlotCount {
        variables: usize,
        expected: usize,
        found: usize,
    },

    #[error("arc head {head} is outside the pair ({lo}, {hi})")]
    HeadOutsidePair { lo: usize, hi: usize, head: usize },
}

impl CausewayErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
