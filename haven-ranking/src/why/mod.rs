//! Deterministic user-facing text: what the query asked for and why a
//! listing was ranked where it was. Used directly when no external
//! explanation generator is configured.

pub mod reason;
pub mod requirements;

pub use reason::template_reason;
pub use requirements::requirements_summary;
