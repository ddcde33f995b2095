//! Engine configuration with TOML file support.

use proofmesh_types::params::{DEFAULT_INITIAL_REPUTATION, DEFAULT_REPUTATION_INCREMENT};
use proofmesh_types::{ActorId, MeshParams};
use proofmesh_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Configuration for a ProofMesh engine.
///
/// Can be loaded from a TOML file via [`MeshConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Administrative owner identity.
    #[serde(default = "default_owner")]
    pub owner: ActorId,

    /// Distinct attestations required for a proof to become verified.
    #[serde(default = "default_min_verifications")]
    pub min_verifications: u32,

    /// Reputation granted on authorization.
    #[serde(default = "default_initial_reputation")]
    pub initial_reputation: u64,

    /// Reputation earned per successful attestation.
    #[serde(default = "default_reputation_increment")]
    pub reputation_increment: u64,

    /// Reserved policy parameter; recorded but not enforced.
    #[serde(default)]
    pub reputation_threshold: u64,

    /// Start with mutations paused.
    #[serde(default)]
    pub start_paused: bool,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_owner() -> ActorId {
    ActorId::new("admin")
}

fn default_min_verifications() -> u32 {
    1
}

fn default_initial_reputation() -> u64 {
    DEFAULT_INITIAL_REPUTATION
}

fn default_reputation_increment() -> u64 {
    DEFAULT_REPUTATION_INCREMENT
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl MeshConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_verifications == 0 {
            return Err(ConfigError::Invalid(
                "min_verifications must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The policy parameters this configuration describes.
    pub fn params(&self) -> MeshParams {
        MeshParams {
            min_verifications: self.min_verifications,
            initial_reputation: self.initial_reputation,
            reputation_increment: self.reputation_increment,
            reputation_threshold: self.reputation_threshold,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            min_verifications: default_min_verifications(),
            initial_reputation: default_initial_reputation(),
            reputation_increment: default_reputation_increment(),
            reputation_threshold: 0,
            start_paused: false,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
