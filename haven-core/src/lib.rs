//! # haven-core
//!
//! Foundation crate for the Haven listing ranker.
//! Defines the request-scoped data model, the traits for external
//! collaborators, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::HavenConfig;
pub use errors::{HavenError, HavenResult};
pub use models::{
    Candidate, HardConstraint, RelaxationLevel, RetrievalFilter, ScoredResult, SearchIntent,
    SoftPreference, SoftPreferenceKind,
};
