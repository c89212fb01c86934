//! Diversity selection: cap results per neighborhood in a single greedy pass.

use std::collections::HashMap;

use haven_core::config::DiversityConfig;
use haven_core::models::ScoredResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversitySelector {
    max_per_neighborhood: usize,
}

impl Default for DiversitySelector {
    fn default() -> Self {
        Self::from_config(&DiversityConfig::default())
    }
}

impl DiversitySelector {
    pub fn new(max_per_neighborhood: usize) -> Self {
        Self {
            max_per_neighborhood: max_per_neighborhood.max(1),
        }
    }

    pub fn from_config(config: &DiversityConfig) -> Self {
        Self::new(config.max_per_neighborhood)
    }

    pub fn max_per_neighborhood(&self) -> usize {
        self.max_per_neighborhood
    }

    /// Walk `scored` best-first, skipping a result once its neighborhood is
    /// full, until `top_n` are admitted. Skipped results are dropped, not
    /// deferred.
    ///
    /// The per-neighborhood cap has one exception: an empty
    /// `neighborhood_id` means the neighborhood is unknown, not that the
    /// listings share one, so those listings are never capped.
    pub fn select(&self, mut scored: Vec<ScoredResult>, top_n: usize) -> Vec<ScoredResult> {
        // Stable: equal scores keep input order.
        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut admitted = Vec::with_capacity(top_n.min(scored.len()));
        for result in scored {
            if admitted.len() >= top_n {
                break;
            }
            let neighborhood = &result.candidate.neighborhood_id;
            if !neighborhood.is_empty() {
                let count = counts.entry(neighborhood.clone()).or_insert(0);
                if *count >= self.max_per_neighborhood {
                    continue;
                }
                *count += 1;
            }
            admitted.push(result);
        }
        admitted
    }

    /// One page of the diversified ranking: the first `offset + limit`
    /// admissions, minus the first `offset`.
    pub fn select_page(&self, scored: Vec<ScoredResult>, offset: usize, limit: usize) -> Vec<ScoredResult> {
        self.select(scored, offset.saturating_add(limit))
            .into_iter()
            .skip(offset)
            .collect()
    }
}
