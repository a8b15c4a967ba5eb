//! Background knowledge: forbidden and required directed edges.
//!
//! Constraints are keyed by variable name so the same knowledge can be reused
//! across datasets (and across bootstrap resamples) whose variable instances
//! differ. [`Knowledge::resolve`] maps names to column indices for one search.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::variable::Variable;
use crate::errors::KnowledgeError;

/// One ordered `from -> to` name pair, as it appears in serialized knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedPair {
    pub from: String,
    pub to: String,
}

/// Serialized form of [`Knowledge`]; validated on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeSpec {
    #[serde(default)]
    pub forbidden: Vec<DirectedPair>,
    #[serde(default)]
    pub required: Vec<DirectedPair>,
}

/// Forbidden and required directed edges between named variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KnowledgeSpec", into = "KnowledgeSpec")]
pub struct Knowledge {
    forbidden: BTreeSet<(String, String)>,
    required: BTreeSet<(String, String)>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build knowledge from name pairs, failing on the first contradiction.
    pub fn from_pairs<F, R, S>(forbidden: F, required: R) -> Result<Self, KnowledgeError>
    where
        F: IntoIterator<Item = (S, S)>,
        R: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut knowledge = Self::new();
        for (from, to) in forbidden {
            knowledge.add_forbidden(from, to)?;
        }
        for (from, to) in required {
            knowledge.add_required(from, to)?;
        }
        Ok(knowledge)
    }

    /// Forbid the arc `from -> to`.
    pub fn add_forbidden(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<(), KnowledgeError> {
        let pair = checked_pair(from.into(), to.into())?;
        if self.required.contains(&pair) {
            return Err(KnowledgeError::Contradictory {
                from: pair.0,
                to: pair.1,
            });
        }
        self.forbidden.insert(pair);
        Ok(())
    }

    /// Require the arc `from -> to`.
    pub fn add_required(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<(), KnowledgeError> {
        let pair = checked_pair(from.into(), to.into())?;
        if self.forbidden.contains(&pair) {
            return Err(KnowledgeError::Contradictory {
                from: pair.0,
                to: pair.1,
            });
        }
        self.required.insert(pair);
        Ok(())
    }

    pub fn is_forbidden(&self, from: &str, to: &str) -> bool {
        self.forbidden
            .contains(&(from.to_string(), to.to_string()))
    }

    pub fn is_required(&self, from: &str, to: &str) -> bool {
        self.required.contains(&(from.to_string(), to.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty() && self.required.is_empty()
    }

    pub fn forbidden(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forbidden.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn required(&self) -> impl Iterator<Item = (&str, &str)> {
        self.required.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Map constraints onto the column indices of `variables`.
    /// Constraints naming variables absent from the list are dropped.
    pub fn resolve(&self, variables: &[Variable]) -> ResolvedKnowledge {
        let mut resolved = ResolvedKnowledge::unconstrained(variables.len());
        let index_of = |name: &str| variables.iter().position(|v| v.name() == name);

        for (kind, pairs, target) in [
            ("forbidden", &self.forbidden, &mut resolved.forbidden),
            ("required", &self.required, &mut resolved.required),
        ] {
            for (from, to) in pairs {
                match (index_of(from), index_of(to)) {
                    (Some(i), Some(j)) => target[i * variables.len() + j] = true,
                    _ => warn!(from = %from, to = %to, kind, "knowledge names unknown variable, ignored"),
                }
            }
        }
        resolved
    }
}

fn checked_pair(from: String, to: String) -> Result<(String, String), KnowledgeError> {
    if from == to {
        return Err(KnowledgeError::SelfLoop { name: from });
    }
    Ok((from, to))
}

impl TryFrom<KnowledgeSpec> for Knowledge {
    type Error = KnowledgeError;

    fn try_from(spec: KnowledgeSpec) -> Result<Self, Self::Error> {
        Knowledge::from_pairs(
            spec.forbidden.into_iter().map(|p| (p.from, p.to)),
            spec.required.into_iter().map(|p| (p.from, p.to)),
        )
    }
}

impl From<Knowledge> for KnowledgeSpec {
    fn from(knowledge: Knowledge) -> Self {
        let pairs = |set: BTreeSet<(String, String)>| {
            set.into_iter()
                .map(|(from, to)| DirectedPair { from, to })
                .collect()
        };
        Self {
            forbidden: pairs(knowledge.forbidden),
            required: pairs(knowledge.required),
        }
    }
}

/// Knowledge resolved against one variable list: dense `n x n` lookup tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKnowledge {
    n: usize,
    forbidden: Vec<bool>,
    required: Vec<bool>,
}

impl ResolvedKnowledge {
    pub fn unconstrained(n: usize) -> Self {
        Self {
            n,
            forbidden: vec![false; n * n],
            required: vec![false; n * n],
        }
    }

    pub fn is_forbidden(&self, from: usize, to: usize) -> bool {
        from < self.n && to < self.n && self.forbidden[from * self.n + to]
    }

    pub fn is_required(&self, from: usize, to: usize) -> bool {
        from < self.n && to < self.n && self.required[from * self.n + to]
    }

    /// Knowledge fixes the arc `from -> to`: the reverse is forbidden or this
    /// direction is required.
    pub fn orients(&self, from: usize, to: usize) -> bool {
        self.is_forbidden(to, from) || self.is_required(from, to)
    }

    /// An edge between `a` and `b` must survive adjacency search.
    pub fn edge_required(&self, a: usize, b: usize) -> bool {
        self.is_required(a, b) || self.is_required(b, a)
    }

    /// Neither direction is allowed, so the pair can never be adjacent.
    pub fn edge_forbidden(&self, a: usize, b: usize) -> bool {
        self.is_forbidden(a, b) && self.is_forbidden(b, a)
    }

    /// What knowledge alone says about the pair `(a, b)`, if anything.
    pub fn fixed_orientation(&self, a: usize, b: usize) -> Option<FixedOrientation> {
        match (self.orients(a, b), self.orients(b, a)) {
            (true, false) => Some(FixedOrientation::Forward),
            (false, true) => Some(FixedOrientation::Backward),
            // Contradictory single arcs are rejected at construction, so both
            // directions are fixed only when both are required or both forbidden.
            (true, true) if self.edge_forbidden(a, b) => Some(FixedOrientation::Excluded),
            (true, true) => Some(FixedOrientation::Both),
            (false, false) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.forbidden.iter().chain(&self.required).any(|&b| b)
    }
}

/// Orientation imposed on an ordered pair `(a, b)` by knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedOrientation {
    /// `a -> b`
    Forward,
    /// `b -> a`
    Backward,
    /// Both arcs required.
    Both,
    /// Both arcs forbidden; the pair has no edge.
    Excluded,
}
