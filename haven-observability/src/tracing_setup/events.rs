//! Structured log events for the search lifecycle.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

use haven_core::models::RelaxationLevel;

/// Log the start of a search.
pub fn search_started(query: &str, hard_constraints: usize, soft_preferences: usize) {
    tracing::info!(
        event = "search_started",
        query = %query,
        hard_constraints = hard_constraints,
        soft_preferences = soft_preferences,
        "search started"
    );
}

/// Log one relaxation level attempt and how many candidates it produced.
pub fn level_attempted(level: RelaxationLevel, bounds: &[String], candidates: usize) {
    tracing::debug!(
        event = "level_attempted",
        level = %level,
        bounds = ?bounds,
        candidates = candidates,
        "relaxation level attempted"
    );
}

/// Log a search that found results.
pub fn search_resolved(level: RelaxationLevel, results: usize, latency: Duration) {
    tracing::info!(
        event = "search_resolved",
        level = %level,
        results = results,
        latency_ms = latency.as_millis() as u64,
        "search resolved"
    );
}

/// Log a search that found nothing after maximal relaxation.
pub fn search_exhausted(query: &str, unsatisfied: &[String]) {
    tracing::warn!(
        event = "search_exhausted",
        query = %query,
        unsatisfied = ?unsatisfied,
        "search exhausted every relaxation level"
    );
}

/// Log a candidate source or embedding failure.
pub fn retrieval_failed(level: Option<RelaxationLevel>, error: &str) {
    tracing::error!(
        event = "retrieval_failed",
        level = ?level,
        error = %error,
        "retrieval failed"
    );
}
