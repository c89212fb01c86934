//! Configuration: one struct per subsystem, all loadable from a single TOML
//! document. Missing sections and fields fall back to [`defaults`].

pub mod defaults;
mod diversity_config;
mod observability_config;
mod relaxation_config;
mod retrieval_config;
mod scoring_config;

pub use diversity_config::DiversityConfig;
pub use observability_config::ObservabilityConfig;
pub use relaxation_config::{RelaxationConfig, RelaxationStep};
pub use retrieval_config::RetrievalConfig;
pub use scoring_config::{CriterionWeights, ScoringConfig};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HavenConfig {
    pub relaxation: RelaxationConfig,
    pub scoring: ScoringConfig,
    pub diversity: DiversityConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl HavenConfig {
    /// Parse and validate a TOML document. An empty document yields defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file path.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// Validate every section. Runs at load time, never per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relaxation.validate()?;
        self.scoring.validate()?;
        if self.diversity.max_per_neighborhood == 0 {
            return Err(ConfigError::Invalid {
                field: "diversity.max_per_neighborhood".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "retrieval.top_k".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
