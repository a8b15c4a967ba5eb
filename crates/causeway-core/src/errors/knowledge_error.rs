//! Knowledge errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors raised while constructing background knowledge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeError {
    #[error("edge {from} -> {to} is both required and forbidden")]
    Contradictory { from: String, to: String },

    #[error("self-referential constraint on {name}")]
    SelfLoop { name: String },
}

impl CausewayErrorCode for KnowledgeError {
    fn error_code(&self) -> &'static str {
        error_code::KNOWLEDGE_CONTRADICTION
    }
}
