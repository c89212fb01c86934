//! # haven-ranking
//!
//! Query-to-ranking pipeline:
//!
//! ```text
//! SearchIntent
//!   → ConstraintEngine   permanent → slight → moderate → significant → exhausted
//!   → AdaptiveScorer     α·match% + (1−α)·quantile(sim) − penalty + bonus
//!   → DiversitySelector  ≤ N per neighborhood, single greedy pass
//! ```
//!
//! [`SearchService`] wires these to an embedding provider, a candidate
//! source, and the query log.

pub mod constraint;
pub mod diversity;
pub mod engine;
pub mod scoring;
pub mod source;
pub mod why;

pub use constraint::{ConstraintEngine, LevelAttempt, Resolution, ResolutionState};
pub use diversity::DiversitySelector;
pub use engine::{RankedListing, SearchOutcome, SearchRequest, SearchService};
pub use scoring::AdaptiveScorer;
pub use source::MemoryCandidateSource;
