use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::explanation::ExplanationInput;
use super::relaxation::RelaxationLevel;

/// A candidate together with the level that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedCandidate {
    pub candidate: Candidate,
    pub level: RelaxationLevel,
    /// Fixed penalty of `level` (0 for permanent).
    pub relaxation_penalty: f64,
    /// Passed only through the stepped-down bed/bath bound.
    pub relaxed_bed_bath: bool,
}

/// A candidate annotated with its score components. Request-scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub candidate: Candidate,
    pub level: RelaxationLevel,
    /// Weighted fraction of structured criteria met, in [0, 1].
    pub match_percent: f64,
    /// Batch-relative similarity, in [0, 1].
    pub normalized_similarity: f64,
    pub relaxation_penalty: f64,
    pub soft_preference_bonus: f64,
    /// Blend weight given to `match_percent`.
    pub alpha: f64,
    /// Unclamped ranking value; sort descending.
    pub final_score: f64,
    pub matched_criteria: Vec<String>,
    pub unmatched_criteria: Vec<String>,
    pub matched_preferences: Vec<String>,
    pub relaxed_bed_bath: bool,
}

impl ScoredResult {
    /// Structured input for the external explanation step.
    pub fn explanation_input(&self) -> ExplanationInput {
        ExplanationInput {
            listing_id: self.candidate.id.clone(),
            matched_criteria: self.matched_criteria.clone(),
            unmatched_criteria: self.unmatched_criteria.clone(),
            matched_preferences: self.matched_preferences.clone(),
            relaxation_penalty: self.relaxation_penalty,
            level: self.level,
            level_description: self.level.description().to_string(),
        }
    }
}
