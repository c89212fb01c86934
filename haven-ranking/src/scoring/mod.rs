//! Adaptive Scorer.
//!
//! `final = α·match% + (1−α)·quantile(sim) − penalty + bonus`, with α
//! driven by how many structured criteria the query states per word.
//! Pure: identical inputs give identical scores.

pub mod alpha;
pub mod match_percent;
pub mod normalization;
pub mod preferences;

use haven_core::config::ScoringConfig;
use haven_core::models::{RetrievedCandidate, ScoredResult, SearchIntent};

pub use alpha::{adaptive_alpha, information_density};
pub use match_percent::{match_percent, MatchBreakdown};
pub use normalization::quantile_normalize;
pub use preferences::preference_bonus;

#[derive(Debug, Clone, Default)]
pub struct AdaptiveScorer {
    config: ScoringConfig,
}

impl AdaptiveScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn alpha_for(&self, intent: &SearchIntent) -> f64 {
        adaptive_alpha(information_density(intent, &self.config), &self.config)
    }

    /// Score a batch and sort it by `final_score` descending. Equal scores
    /// keep their input order.
    pub fn score(&self, candidates: &[RetrievedCandidate], intent: &SearchIntent) -> Vec<ScoredResult> {
        let alpha = self.alpha_for(intent);
        let similarities: Vec<f64> = candidates.iter().map(|c| c.candidate.similarity).collect();
        let normalized = quantile_normalize(&similarities);

        let mut scored: Vec<ScoredResult> = candidates
            .iter()
            .zip(normalized)
            .map(|(retrieved, normalized_similarity)| {
                let candidate = &retrieved.candidate;
                let breakdown = match_percent(candidate, intent, &self.config);
                let (bonus, matched_preferences) = preference_bonus(candidate, intent, &self.config);

                let final_score = alpha * breakdown.percent
                    + (1.0 - alpha) * normalized_similarity
                    - retrieved.relaxation_penalty
                    + bonus;

                ScoredResult {
                    candidate: candidate.clone(),
                    level: retrieved.level,
                    match_percent: breakdown.percent,
                    normalized_similarity,
                    relaxation_penalty: retrieved.relaxation_penalty,
                    soft_preference_bonus: bonus,
                    alpha,
                    final_score,
                    matched_criteria: breakdown.matched,
                    unmatched_criteria: breakdown.unmatched,
                    matched_preferences,
                    relaxed_bed_bath: retrieved.relaxed_bed_bath,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::models::{Candidate, HardConstraint, RelaxationLevel};

    fn retrieved(id: &str, similarity: f64, beds: u32, penalty: f64) -> RetrievedCandidate {
        RetrievedCandidate {
            candidate: Candidate {
                id: id.into(),
                beds: Some(beds),
                similarity,
                ..Default::default()
            },
            level: RelaxationLevel::Permanent,
            relaxation_penalty: penalty,
            relaxed_bed_bath: false,
        }
    }

    #[test]
    fn sparse_query_ranks_by_similarity() {
        let scorer = AdaptiveScorer::default();
        let intent = SearchIntent::empty("cozy place");
        let batch = vec![
            retrieved("a", 0.70, 1, 0.0),
            retrieved("b", 0.90, 1, 0.0),
            retrieved("c", 0.80, 1, 0.0),
        ];
        let scored = scorer.score(&batch, &intent);
        let ids: Vec<_> = scored.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(scored.iter().all(|r| r.alpha == 0.4));
        assert!((scored[0].final_score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn penalty_is_subtracted() {
        let scorer = AdaptiveScorer::default();
        let intent = SearchIntent::empty("cozy place");
        let scored = scorer.score(&[retrieved("a", 0.5, 1, 0.12)], &intent);
        assert!((scored[0].final_score - (0.6 - 0.12)).abs() < 1e-12);
    }

    #[test]
    fn structured_match_can_outrank_similarity() {
        let scorer = AdaptiveScorer::default();
        let mut intent = SearchIntent::empty("3 bedrooms");
        intent.add_hard(HardConstraint::MinBeds(3));
        let batch = vec![retrieved("close", 0.95, 1, 0.0), retrieved("fits", 0.90, 3, 0.0)];
        let scored = scorer.score(&batch, &intent);
        assert_eq!(scored[0].candidate.id, "fits");
        assert_eq!(scored[0].matched_criteria, vec!["bedrooms"]);
    }

    #[test]
    fn empty_batch() {
        let scorer = AdaptiveScorer::default();
        assert!(scorer.score(&[], &SearchIntent::empty("x")).is_empty());
    }
}
