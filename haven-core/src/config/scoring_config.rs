use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Fixed weights for the structured match criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionWeights {
    pub budget: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub garage: f64,
    pub metro: f64,
    pub school: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            budget: defaults::DEFAULT_WEIGHT_BUDGET,
            bedrooms: defaults::DEFAULT_WEIGHT_BEDROOMS,
            bathrooms: defaults::DEFAULT_WEIGHT_BATHROOMS,
            garage: defaults::DEFAULT_WEIGHT_GARAGE,
            metro: defaults::DEFAULT_WEIGHT_METRO,
            school: defaults::DEFAULT_WEIGHT_SCHOOL,
        }
    }
}

impl CriterionWeights {
    fn all(&self) -> [(&'static str, f64); 6] {
        [
            ("budget", self.budget),
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("garage", self.garage),
            ("metro", self.metro),
            ("school", self.school),
        ]
    }
}

/// Adaptive scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Alpha for a query with no structured criteria.
    pub alpha_base: f64,
    /// Alpha increase per unit of information density.
    pub alpha_slope: f64,
    /// Upper clamp for alpha.
    pub alpha_max: f64,
    /// Density is capped here after normalization.
    pub density_cap: f64,
    /// Criteria are counted per this many query words.
    pub density_scale: f64,
    /// Fraction over budget at which the budget criterion scores zero.
    pub budget_tolerance: f64,
    /// Credit for one bedroom/bathroom short of the request.
    pub near_miss_credit: f64,
    /// School rating at or above which the school criterion is fully met.
    pub good_school_rating: f64,
    /// Crime index at or below which an area counts as safe.
    pub safe_crime_index: f64,
    /// Walk/grocery index (0-10) at or above which the amenity counts as near.
    pub amenity_index_threshold: f64,
    pub weights: CriterionWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alpha_base: defaults::DEFAULT_ALPHA_BASE,
            alpha_slope: defaults::DEFAULT_ALPHA_SLOPE,
            alpha_max: defaults::DEFAULT_ALPHA_MAX,
            density_cap: defaults::DEFAULT_DENSITY_CAP,
            density_scale: defaults::DEFAULT_DENSITY_SCALE,
            budget_tolerance: defaults::DEFAULT_BUDGET_TOLERANCE,
            near_miss_credit: defaults::DEFAULT_NEAR_MISS_CREDIT,
            good_school_rating: defaults::DEFAULT_GOOD_SCHOOL_RATING,
            safe_crime_index: defaults::DEFAULT_SAFE_CRIME_INDEX,
            amenity_index_threshold: defaults::DEFAULT_AMENITY_INDEX_THRESHOLD,
            weights: CriterionWeights::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.weights.all() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: format!("scoring.weights.{name}"),
                    reason: format!("must be positive, got {weight}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.alpha_base)
            || !(0.0..=1.0).contains(&self.alpha_max)
            || self.alpha_base > self.alpha_max
        {
            return Err(ConfigError::Invalid {
                field: "scoring.alpha_base".into(),
                reason: format!(
                    "need 0 <= alpha_base <= alpha_max <= 1, got {} and {}",
                    self.alpha_base, self.alpha_max
                ),
            });
        }
        if self.alpha_slope < 0.0 || self.density_cap < 0.0 || self.density_scale <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "scoring.density".into(),
                reason: "alpha_slope and density_cap must be non-negative, density_scale positive"
                    .into(),
            });
        }
        if self.budget_tolerance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "scoring.budget_tolerance".into(),
                reason: format!("must be positive, got {}", self.budget_tolerance),
            });
        }
        if !(0.0..1.0).contains(&self.near_miss_credit) {
            return Err(ConfigError::Invalid {
                field: "scoring.near_miss_credit".into(),
                reason: format!("must be in [0, 1), got {}", self.near_miss_credit),
            });
        }
        Ok(())
    }
}
