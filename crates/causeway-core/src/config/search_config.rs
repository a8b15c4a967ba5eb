//! Top-level search configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{defaults, BootstrapConfig, OracleConfig};
use crate::constants::UNBOUNDED_DEPTH;
use crate::errors::ConfigError;

/// Parameter bundle for one search.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CAUSEWAY_*`)
/// 2. TOML config file, if given
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum conditioning-set size; -1 means unbounded.
    pub depth: i32,
    /// Multiplier on the BIC penalty of the score-based oracle.
    pub penalty_discount: f64,
    /// Log per-edge decisions at info instead of debug.
    pub verbose: bool,
    /// Evaluate independent pair work on the rayon pool.
    pub parallel: bool,
    pub oracle: OracleConfig,
    pub bootstrap: BootstrapConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: defaults::DEFAULT_DEPTH,
            penalty_discount: defaults::DEFAULT_PENALTY_DISCOUNT,
            verbose: defaults::DEFAULT_VERBOSE,
            parallel: defaults::DEFAULT_PARALLEL,
            oracle: OracleConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Load configuration: defaults, then `path` (if any), then environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth < UNBOUNDED_DEPTH {
            return Err(ConfigError::ValidationFailed {
                field: "depth".to_string(),
                message: format!("must be -1 (unbounded) or >= 0, got {}", self.depth),
            });
        }
        if !self.penalty_discount.is_finite() || self.penalty_discount <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "penalty_discount".to_string(),
                message: format!("must be a positive number, got {}", self.penalty_discount),
            });
        }
        if !(self.oracle.alpha > 0.0 && self.oracle.alpha < 1.0) {
            return Err(ConfigError::ValidationFailed {
                field: "oracle.alpha".to_string(),
                message: format!("must be in (0, 1), got {}", self.oracle.alpha),
            });
        }
        Ok(())
    }

    /// Conditioning-set bound, or `None` when unbounded.
    pub fn depth_bound(&self) -> Option<usize> {
        usize::try_from(self.depth).ok()
    }

    /// Apply `CAUSEWAY_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable values are skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.parse::<T>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %raw, "ignoring unparsable config override");
                    None
                }
            }
        }

        if let Some(v) = parsed(&lookup, "CAUSEWAY_DEPTH") {
            self.depth = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_PENALTY_DISCOUNT") {
            self.penalty_discount = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_VERBOSE") {
            self.verbose = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_PARALLEL") {
            self.parallel = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_ORACLE") {
            self.oracle.kind = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_ALPHA") {
            self.oracle.alpha = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_BOOTSTRAP_SAMPLE_SIZE") {
            self.bootstrap.sample_size = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_BOOTSTRAP_ENSEMBLE") {
            self.bootstrap.ensemble = v;
        }
        if let Some(v) = parsed(&lookup, "CAUSEWAY_BOOTSTRAP_SEED") {
            self.bootstrap.seed = v;
        }
    }
}
