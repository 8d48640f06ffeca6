//! Engine configuration loading.
//!
//! Embedders may override governance parameters from a TOML file; omitted
//! fields keep the AGORA defaults. File settings are read once at startup —
//! parameters do not change while the engine runs.

use std::path::Path;

use agora_types::GovParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
///
/// ```toml
/// [params]
/// voting_period_secs = 259200
/// finalize_delay_secs = 86400
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Governance parameters; any field omitted in the file keeps its
    /// default.
    pub params: GovParams,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
