use serde::{Deserialize, Serialize};

use super::relaxation::RelaxationLevel;

/// Generic suggestions attached to every "no results" explanation.
pub const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Try adjusting your criteria",
    "Consider nearby areas",
    "Explore other property types",
];

/// Structured input for the natural-language explanation generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationInput {
    pub listing_id: String,
    pub matched_criteria: Vec<String>,
    pub unmatched_criteria: Vec<String>,
    pub matched_preferences: Vec<String>,
    pub relaxation_penalty: f64,
    pub level: RelaxationLevel,
    pub level_description: String,
}

/// Why a search ended with nothing after maximal relaxation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoResultsExplanation {
    /// Hard constraints that could not be satisfied together.
    pub unsatisfied_constraints: Vec<String>,
    pub message: String,
    pub suggestions: Vec<String>,
}
