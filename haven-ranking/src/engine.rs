//! SearchService: one request from raw query text to a ranked page.
//!
//! extract intent → embed query → relaxation loop → score → diversify →
//! reasons → log. Every collaborator is borrowed; the service holds no
//! per-request state and can serve concurrent requests.

use std::sync::Mutex;
use std::time::Instant;

use haven_core::errors::{HavenResult, RetrievalError};
use haven_core::models::{NoResultsExplanation, RelaxationLevel, ScoredResult, SearchIntent};
use haven_core::traits::{ICandidateSource, IEmbeddingProvider, IExplanationGenerator};
use haven_core::HavenConfig;
use haven_intent::IntentExtractor;
use haven_observability::tracing_setup::events;
use haven_observability::{QueryLog, QueryLogEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constraint::{ConstraintEngine, LevelAttempt, ResolutionState};
use crate::diversity::DiversitySelector;
use crate::scoring::AdaptiveScorer;
use crate::why::{requirements_summary, template_reason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Page size; the configured default when `None`.
    pub limit: Option<usize>,
    pub offset: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            offset: 0,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// A ranked listing and the sentence explaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    pub result: ScoredResult,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub intent: SearchIntent,
    pub results: Vec<RankedListing>,
    pub state: ResolutionState,
    pub applied_level: Option<RelaxationLevel>,
    pub level_description: Option<String>,
    /// Present only when every level came back empty.
    pub no_results: Option<NoResultsExplanation>,
    pub requirements_summary: String,
    pub attempts: Vec<LevelAttempt>,
    /// Candidates scored before diversity selection and paging.
    pub total_candidates: usize,
}

impl SearchOutcome {
    pub fn is_exhausted(&self) -> bool {
        self.state == ResolutionState::Exhausted
    }

    pub fn ids(&self) -> Vec<&str> {
        self.results
            .iter()
            .map(|r| r.result.candidate.id.as_str())
            .collect()
    }
}

pub struct SearchService<'a> {
    source: &'a dyn ICandidateSource,
    embedder: &'a dyn IEmbeddingProvider,
    explainer: Option<&'a dyn IExplanationGenerator>,
    query_log: Option<&'a Mutex<QueryLog>>,
    extractor: IntentExtractor,
    constraints: ConstraintEngine,
    scorer: AdaptiveScorer,
    diversity: DiversitySelector,
    default_limit: usize,
}

impl<'a> SearchService<'a> {
    pub fn new(
        source: &'a dyn ICandidateSource,
        embedder: &'a dyn IEmbeddingProvider,
        config: &HavenConfig,
    ) -> Self {
        Self {
            source,
            embedder,
            explainer: None,
            query_log: None,
            extractor: IntentExtractor::new(),
            constraints: ConstraintEngine::new(config.relaxation.clone(), config.retrieval.top_k),
            scorer: AdaptiveScorer::new(config.scoring.clone()),
            diversity: DiversitySelector::from_config(&config.diversity),
            default_limit: config.diversity.default_top_n,
        }
    }

    /// Use an external generator for per-result reasons. Failures fall back
    /// to the template reason.
    pub fn with_explainer(mut self, explainer: &'a dyn IExplanationGenerator) -> Self {
        self.explainer = Some(explainer);
        self
    }

    pub fn with_query_log(mut self, log: &'a Mutex<QueryLog>) -> Self {
        self.query_log = Some(log);
        self
    }

    pub fn extractor(&self) -> &IntentExtractor {
        &self.extractor
    }

    /// Extract the intent from the query text and search with it.
    pub fn search(&self, request: &SearchRequest) -> HavenResult<SearchOutcome> {
        let intent = self.extractor.extract(&request.query);
        self.search_with_intent(intent, request)
    }

    /// Search with an already extracted intent. `request.query` is still
    /// the text that gets embedded.
    pub fn search_with_intent(
        &self,
        intent: SearchIntent,
        request: &SearchRequest,
    ) -> HavenResult<SearchOutcome> {
        let started = Instant::now();
        let outcome = self.run(intent, request);
        let latency = started.elapsed();

        let entry = match &outcome {
            Ok(o) => QueryLogEntry::new(
                &request.query,
                o.applied_level,
                latency,
                o.results.len(),
                o.is_exhausted(),
            ),
            Err(_) => QueryLogEntry::new(&request.query, None, latency, 0, false),
        };
        if let Ok(o) = &outcome {
            if let Some(level) = o.applied_level {
                events::search_resolved(level, o.results.len(), latency);
            }
        }
        if let Some(log) = self.query_log {
            match log.lock() {
                Ok(mut log) => log.record(entry),
                Err(_) => warn!("query log lock poisoned, entry dropped"),
            }
        }
        outcome
    }

    fn run(&self, intent: SearchIntent, request: &SearchRequest) -> HavenResult<SearchOutcome> {
        events::search_started(
            &request.query,
            intent.hard_constraints.len(),
            intent.soft_preferences.len(),
        );

        let embedding = self.embedder.embed(&request.query).map_err(|e| {
            events::retrieval_failed(None, &e.to_string());
            RetrievalError::EmbeddingFailed {
                reason: format!("{}: {e}", self.embedder.name()),
            }
        })?;

        let resolution = self.constraints.resolve(&intent, self.source, &embedding)?;
        let applied_level = resolution.applied_level();
        let summary = requirements_summary(&intent);

        let scored = self.scorer.score(&resolution.candidates, &intent);
        let total_candidates = scored.len();
        let limit = request.limit.unwrap_or(self.default_limit);
        let page = self.diversity.select_page(scored, request.offset, limit);
        debug!(
            total_candidates,
            page = page.len(),
            offset = request.offset,
            "diversity selection complete"
        );

        let results = page
            .into_iter()
            .map(|result| {
                let reason = self.reason_for(&result);
                RankedListing { result, reason }
            })
            .collect();

        Ok(SearchOutcome {
            results,
            state: resolution.state,
            applied_level,
            level_description: applied_level.map(|l| l.description().to_string()),
            no_results: resolution.no_results,
            requirements_summary: summary,
            attempts: resolution.attempts,
            total_candidates,
            intent,
        })
    }

    fn reason_for(&self, result: &ScoredResult) -> String {
        let Some(explainer) = self.explainer else {
            return template_reason(result);
        };
        match explainer.explain(&result.explanation_input()) {
            Ok(text) => text,
            Err(e) => {
                warn!(listing = %result.candidate.id, error = %e, "explanation failed, using template");
                template_reason(result)
            }
        }
    }
}
