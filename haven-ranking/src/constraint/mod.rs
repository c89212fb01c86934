//! Constraint Engine: the forward-only relaxation state machine.
//!
//! Levels are queried one at a time. The first level whose filter admits at
//! least one candidate wins; when the last level also comes back empty the
//! search is exhausted, which is an outcome, not an error.

pub mod filter_builder;
mod no_results;

use haven_core::config::RelaxationConfig;
use haven_core::errors::{HavenError, HavenResult, RetrievalError};
use haven_core::models::{
    NoResultsExplanation, RelaxationLevel, RetrievalFilter, RetrievedCandidate, SearchIntent,
};
use haven_core::traits::ICandidateSource;
use haven_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use filter_builder::build_filter;
pub use no_results::explain_exhaustion;

/// Where the relaxation loop stands. `Found` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "level", rename_all = "snake_case")]
pub enum ResolutionState {
    Searching(RelaxationLevel),
    Found(RelaxationLevel),
    Exhausted,
}

impl ResolutionState {
    pub fn initial() -> Self {
        Self::Searching(RelaxationLevel::Permanent)
    }

    /// Transition after a level returned `found` candidates. Only moves
    /// forward; terminal states stay put.
    pub fn advance(self, found: usize) -> Self {
        match self {
            Self::Searching(level) if found > 0 => Self::Found(level),
            Self::Searching(level) => level.next().map_or(Self::Exhausted, Self::Searching),
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Searching(_))
    }
}

/// Diagnostics for one level query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelAttempt {
    pub level: RelaxationLevel,
    pub bounds: Vec<String>,
    pub candidates: usize,
}

/// Result of running the relaxation loop.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub state: ResolutionState,
    /// Candidates from the winning level, in source order.
    pub candidates: Vec<RetrievedCandidate>,
    pub attempts: Vec<LevelAttempt>,
    /// Present only when exhausted.
    pub no_results: Option<NoResultsExplanation>,
}

impl Resolution {
    pub fn applied_level(&self) -> Option<RelaxationLevel> {
        match self.state {
            ResolutionState::Found(level) => Some(level),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ResolutionState::Exhausted
    }
}

/// Builds per-level filters from an immutable relaxation table and drives
/// the candidate source through the levels.
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    relaxation: RelaxationConfig,
    top_k: usize,
}

impl ConstraintEngine {
    pub fn new(relaxation: RelaxationConfig, top_k: usize) -> Self {
        Self {
            relaxation,
            top_k: top_k.max(1),
        }
    }

    pub fn relaxation(&self) -> &RelaxationConfig {
        &self.relaxation
    }

    pub fn filter_for(&self, intent: &SearchIntent, level: RelaxationLevel) -> RetrievalFilter {
        build_filter(intent, &self.relaxation, level)
    }

    /// Run the relaxation loop. A source error aborts the loop and is
    /// returned as a retrieval error; only empty responses advance a level.
    pub fn resolve(
        &self,
        intent: &SearchIntent,
        source: &dyn ICandidateSource,
        query_embedding: &[f32],
    ) -> HavenResult<Resolution> {
        let mut state = ResolutionState::initial();
        let mut attempts = Vec::new();
        let mut candidates = Vec::new();

        while let ResolutionState::Searching(level) = state {
            let filter = self.filter_for(intent, level);
            let retrieved = source
                .retrieve(&filter, query_embedding, self.top_k)
                .map_err(|e| {
                    events::retrieval_failed(Some(level), &e.to_string());
                    source_failure(level, e)
                })?;

            // Post-validate: a source that ignores part of the filter must
            // not leak a red-line violation into the results.
            let penalty = self.relaxation.penalty(level);
            candidates = retrieved
                .into_iter()
                .filter(|c| filter.admits(c))
                .take(self.top_k)
                .map(|candidate| RetrievedCandidate {
                    relaxed_bed_bath: filter.uses_bed_bath_relaxation(&candidate),
                    candidate,
                    level,
                    relaxation_penalty: penalty,
                })
                .collect::<Vec<_>>();

            let bounds = filter.describe();
            events::level_attempted(level, &bounds, candidates.len());
            attempts.push(LevelAttempt {
                level,
                bounds,
                candidates: candidates.len(),
            });
            state = state.advance(candidates.len());
        }

        let no_results = match state {
            ResolutionState::Exhausted => {
                let explanation = explain_exhaustion(intent);
                events::search_exhausted(&intent.raw_query, &explanation.unsatisfied_constraints);
                Some(explanation)
            }
            _ => None,
        };
        debug!(?state, levels_tried = attempts.len(), "relaxation loop finished");

        Ok(Resolution {
            state,
            candidates,
            attempts,
            no_results,
        })
    }
}

fn source_failure(level: RelaxationLevel, error: HavenError) -> HavenError {
    match error {
        HavenError::Retrieval(_) => error,
        other => RetrievalError::SourceFailed {
            level: level.name().to_string(),
            reason: other.to_string(),
        }
        .into(),
    }
}
