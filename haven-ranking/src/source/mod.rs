//! Candidate sources bundled with the ranking crate.

mod memory;

pub use memory::{cosine_similarity, ListingRecord, MemoryCandidateSource};
