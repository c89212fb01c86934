use crate::errors::HavenResult;
use crate::models::{Candidate, RetrievalFilter};

/// Retrieval backend consumed by the constraint engine.
pub trait ICandidateSource: Send + Sync {
    /// Return at most `top_k` listings admitted by `filter`, sorted by
    /// descending raw similarity to `query_embedding`. Nothing matching is
    /// an empty list, not an error.
    fn retrieve(
        &self,
        filter: &RetrievalFilter,
        query_embedding: &[f32],
        top_k: usize,
    ) -> HavenResult<Vec<Candidate>>;

    /// Human-readable source name.
    fn name(&self) -> &str;
}
