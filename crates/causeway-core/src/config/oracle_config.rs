use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which independence oracle backs the adjacency search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    /// SEM BIC score difference; `penalty_discount` scales the penalty.
    #[default]
    SemBic,
    /// Fisher Z test on partial correlation; uses `alpha`.
    FisherZ,
}

impl OracleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SemBic => "sem_bic",
            Self::FisherZ => "fisher_z",
        }
    }
}

impl FromStr for OracleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sem_bic" | "sem-bic" | "bic" => Ok(Self::SemBic),
            "fisher_z" | "fisher-z" | "fisherz" => Ok(Self::FisherZ),
            other => Err(format!("unknown oracle '{other}'")),
        }
    }
}

/// Independence oracle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub kind: OracleKind,
    /// Significance level for p-value based oracles.
    pub alpha: f64,
    /// Run the oracle over the positive part of the data (negatives set to 0).
    pub rectify_negatives: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::default(),
            alpha: defaults::DEFAULT_ALPHA,
            rectify_negatives: defaults::DEFAULT_RECTIFY_NEGATIVES,
        }
    }
}
