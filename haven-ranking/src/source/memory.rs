//! In-process candidate source over a fixed listing set.

use haven_core::errors::{HavenResult, RetrievalError};
use haven_core::models::{Candidate, RetrievalFilter};
use haven_core::traits::ICandidateSource;
use serde::{Deserialize, Serialize};

/// A listing with its precomputed embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub listing: Candidate,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ListingCorpus {
    listings: Vec<ListingRecord>,
}

/// Brute-force source: filter every listing, rank by cosine similarity.
#[derive(Debug, Clone)]
pub struct MemoryCandidateSource {
    name: String,
    records: Vec<ListingRecord>,
}

impl MemoryCandidateSource {
    pub fn new(name: impl Into<String>, records: Vec<ListingRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Parse a corpus document of the form `{ "listings": [{ "listing", "embedding" }] }`.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> HavenResult<Self> {
        let corpus: ListingCorpus = serde_json::from_str(json)?;
        Ok(Self::new(name, corpus.listings))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding width, taken from the first record.
    pub fn dimensions(&self) -> Option<usize> {
        self.records.first().map(|r| r.embedding.len())
    }
}

impl ICandidateSource for MemoryCandidateSource {
    fn retrieve(
        &self,
        filter: &RetrievalFilter,
        query_embedding: &[f32],
        top_k: usize,
    ) -> HavenResult<Vec<Candidate>> {
        if let Some(dims) = self.dimensions() {
            if dims != query_embedding.len() {
                return Err(RetrievalError::SourceUnavailable {
                    source_name: self.name.clone(),
                    reason: format!(
                        "query embedding has {} dimensions, index has {dims}",
                        query_embedding.len()
                    ),
                }
                .into());
            }
        }

        let mut hits: Vec<Candidate> = self
            .records
            .iter()
            .filter_map(|record| {
                let mut candidate = record.listing.clone();
                candidate.distance_km = match (filter.target_point, candidate.location) {
                    (Some(target), Some(location)) => Some(target.haversine_km(&location)),
                    _ => None,
                };
                if !filter.admits(&candidate) {
                    return None;
                }
                candidate.similarity = cosine_similarity(query_embedding, &record.embedding);
                Some(candidate)
            })
            .collect();

        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(top_k);
        Ok(hits)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cosine similarity in [-1, 1]; 0 when either vector is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm = |v: &[f32]| v.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let (norm_a, norm_b) = (norm(a), norm(b));
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
