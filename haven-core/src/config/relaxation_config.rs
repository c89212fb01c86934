use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::RELAXATION_STEPS;
use crate::errors::ConfigError;
use crate::models::RelaxationLevel;

/// One loosening step applied on top of the permanent constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaxationStep {
    /// Human-readable level name ("slight", "moderate", ...).
    pub name: String,
    /// Multiplier applied to the base price bound.
    pub price_multiplier: f64,
    /// Radius around the target point that also counts as in-area.
    pub geo_radius_km: f64,
    /// Signed change to the bed/bath minimums (0 or negative).
    pub bed_bath_delta: i32,
    /// Score penalty carried by every candidate retrieved at this level.
    pub penalty: f64,
}

impl RelaxationStep {
    /// The identity step used for the permanent level.
    pub fn permanent() -> Self {
        Self {
            name: "permanent".to_string(),
            price_multiplier: 1.0,
            geo_radius_km: 0.0,
            bed_bath_delta: 0,
            penalty: 0.0,
        }
    }
}

/// Relaxation table. Steps are applied relative to the permanent
/// constraints, never to the previous step's loosened bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationConfig {
    /// Bed/bath step-down never goes below this count.
    pub bed_bath_floor: u32,
    /// Slight, moderate, significant, in that order.
    pub levels: Vec<RelaxationStep>,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        let levels = (0..RELAXATION_STEPS)
            .map(|i| RelaxationStep {
                name: defaults::DEFAULT_LEVEL_NAMES[i].to_string(),
                price_multiplier: defaults::DEFAULT_PRICE_MULTIPLIERS[i],
                geo_radius_km: defaults::DEFAULT_GEO_RADII_KM[i],
                bed_bath_delta: defaults::DEFAULT_BED_BATH_DELTAS[i],
                penalty: defaults::DEFAULT_RELAXATION_PENALTIES[i],
            })
            .collect();
        Self {
            bed_bath_floor: defaults::DEFAULT_BED_BATH_FLOOR,
            levels,
        }
    }
}

impl RelaxationConfig {
    /// The step for a level. The permanent level maps to the identity step.
    pub fn step(&self, level: RelaxationLevel) -> RelaxationStep {
        match level.index() {
            0 => RelaxationStep::permanent(),
            i => self
                .levels
                .get(i - 1)
                .cloned()
                .unwrap_or_else(RelaxationStep::permanent),
        }
    }

    /// Penalty weight for a level (0 for permanent).
    pub fn penalty(&self, level: RelaxationLevel) -> f64 {
        self.step(level).penalty
    }

    /// Reject tables that would loosen in the wrong direction or break
    /// the monotone penalty ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.len() != RELAXATION_STEPS {
            return Err(ConfigError::Invalid {
                field: "relaxation.levels".into(),
                reason: format!(
                    "expected {RELAXATION_STEPS} levels, got {}",
                    self.levels.len()
                ),
            });
        }

        let mut previous_penalty = 0.0_f64;
        let mut previous_multiplier = 1.0_f64;
        let mut previous_radius = 0.0_f64;
        for (i, step) in self.levels.iter().enumerate() {
            let field = |name: &str| format!("relaxation.levels[{i}].{name}");

            if !step.price_multiplier.is_finite() || step.price_multiplier < 1.0 {
                return Err(ConfigError::Invalid {
                    field: field("price_multiplier"),
                    reason: format!("must be >= 1.0, got {}", step.price_multiplier),
                });
            }
            if step.price_multiplier < previous_multiplier {
                return Err(ConfigError::Invalid {
                    field: field("price_multiplier"),
                    reason: "must not decrease across levels".into(),
                });
            }
            if !step.geo_radius_km.is_finite() || step.geo_radius_km < previous_radius {
                return Err(ConfigError::Invalid {
                    field: field("geo_radius_km"),
                    reason: format!(
                        "must be non-negative and non-decreasing, got {}",
                        step.geo_radius_km
                    ),
                });
            }
            if step.bed_bath_delta > 0 {
                return Err(ConfigError::Invalid {
                    field: field("bed_bath_delta"),
                    reason: format!("must be <= 0, got {}", step.bed_bath_delta),
                });
            }
            if !step.penalty.is_finite() || step.penalty <= previous_penalty {
                return Err(ConfigError::Invalid {
                    field: field("penalty"),
                    reason: format!(
                        "must strictly increase from {previous_penalty}, got {}",
                        step.penalty
                    ),
                });
            }

            previous_penalty = step.penalty;
            previous_multiplier = step.price_multiplier;
            previous_radius = step.geo_radius_km;
        }
        Ok(())
    }
}
