use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// How graphs from repeated resampled runs are merged into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsemblePolicy {
    /// Keep the first run's graph as found.
    Preserved,
    /// Per pair, keep the most frequent state (including "no edge").
    #[default]
    Highest,
    /// Per pair, keep a state only if more than half of the runs produced it.
    Majority,
}

impl EnsemblePolicy {
    /// Decode the numeric parameter form: 0 = Preserved, 1 = Highest, 2 = Majority.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Preserved),
            1 => Some(Self::Highest),
            2 => Some(Self::Majority),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Preserved => 0,
            Self::Highest => 1,
            Self::Majority => 2,
        }
    }
}

impl FromStr for EnsemblePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown ensemble code {code}"));
        }
        match s.to_ascii_lowercase().as_str() {
            "preserved" => Ok(Self::Preserved),
            "highest" => Ok(Self::Highest),
            "majority" => Ok(Self::Majority),
            other => Err(format!("unknown ensemble policy '{other}'")),
        }
    }
}

/// Bootstrap ensemble configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of resampled runs. 0 disables bootstrapping.
    pub sample_size: usize,
    pub ensemble: EnsemblePolicy,
    /// Base seed; run `i` is seeded with `seed + i`.
    pub seed: u64,
}

impl BootstrapConfig {
    pub fn enabled(&self) -> bool {
        self.sample_size > 0
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            sample_size: defaults::DEFAULT_BOOTSTRAP_SAMPLE_SIZE,
            ensemble: EnsemblePolicy::default(),
            seed: defaults::DEFAULT_BOOTSTRAP_SEED,
        }
    }
}
