//! Narrow interfaces to the collaborators around the ranking core.

mod candidate_source;
mod embedding;
mod explainer;

pub use candidate_source::ICandidateSource;
pub use embedding::IEmbeddingProvider;
pub use explainer::IExplanationGenerator;
