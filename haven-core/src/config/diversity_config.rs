use serde::{Deserialize, Serialize};

use super::defaults;

/// Diversity selector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// Maximum results admitted per neighborhood.
    pub max_per_neighborhood: usize,
    /// Result count when the caller does not ask for one.
    pub default_top_n: usize,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            max_per_neighborhood: defaults::DEFAULT_MAX_PER_NEIGHBORHOOD,
            default_top_n: defaults::DEFAULT_TOP_N,
        }
    }
}
