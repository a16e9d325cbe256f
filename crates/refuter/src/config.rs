//! Prover configuration types.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the resolution loop
///
/// Both ceilings are always finite so every proof attempt terminates.
/// Deserializes from partial JSON: missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Outer loop iterations before the attempt is reported as undetermined
    pub max_steps: usize,
    /// Registered clauses before the attempt is reported as undetermined
    pub max_clauses: usize,
    pub subsumption: SubsumptionMode,
    /// Stop a round as soon as the empty clause is registered
    pub early_exit: bool,
}

/// How resolvents are tested against known clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsumptionMode {
    /// Literal-set equality up to ordering
    Exact,
    /// θ-subsumption
    #[default]
    Full,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_steps: 100,
            max_clauses: 2000,
            subsumption: SubsumptionMode::Full,
            early_exit: true,
        }
    }
}

impl ProverConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProverConfig::default();
        assert_eq!(config.max_steps, 100);
        assert_eq!(config.max_clauses, 2000);
        assert_eq!(config.subsumption, SubsumptionMode::Full);
        assert!(config.early_exit);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ProverConfig::from_json(r#"{"max_steps": 5, "subsumption": "exact"}"#).unwrap();
        assert_eq!(config.max_steps, 5);
        assert_eq!(config.subsumption, SubsumptionMode::Exact);
        assert_eq!(config.max_clauses, 2000);
        assert!(config.early_exit);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(ProverConfig::from_json(r#"{"subsumption": "fuzzy"}"#).is_err());
    }
}
