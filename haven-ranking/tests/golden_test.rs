//! End-to-end golden cases: `golden/ranking/scenarios.json` run against the
//! `listings/bay_area.json` corpus through `SearchService`.

use haven_core::errors::HavenResult;
use haven_core::models::RelaxationLevel;
use haven_core::traits::IEmbeddingProvider;
use haven_core::HavenConfig;
use haven_ranking::source::ListingRecord;
use haven_ranking::{MemoryCandidateSource, SearchRequest, SearchService};
use serde::Deserialize;
use serde_json::Value;
use test_fixtures::load_fixture;

#[derive(Debug, Deserialize)]
struct GoldenFile {
    cases: Vec<GoldenCase>,
}

#[derive(Debug, Deserialize)]
struct GoldenCase {
    name: String,
    query: String,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    state: String,
    applied_level: Option<RelaxationLevel>,
    result_count: usize,
    #[serde(default)]
    includes: Vec<String>,
    #[serde(default)]
    excludes: Vec<String>,
    #[serde(default)]
    price_max: Option<f64>,
    #[serde(default)]
    relaxed_bed_bath: Option<bool>,
    #[serde(default)]
    unsatisfied_contains: Vec<String>,
}

struct FixedEmbedder;

impl IEmbeddingProvider for FixedEmbedder {
    fn embed(&self, _text: &str) -> HavenResult<Vec<f32>> {
        Ok(vec![0.9, 0.1, 0.2, 0.1])
    }
    fn dimensions(&self) -> usize {
        4
    }
    fn name(&self) -> &str {
        "fixed"
    }
}

fn corpus() -> MemoryCandidateSource {
    let fixture: Value = load_fixture("listings/bay_area.json");
    let records: Vec<ListingRecord> =
        serde_json::from_value(fixture["listings"].clone()).expect("listing records");
    MemoryCandidateSource::new("bay_area", records)
}

#[test]
fn golden_ranking_scenarios() {
    let golden: GoldenFile = load_fixture("golden/ranking/scenarios.json");
    let source = corpus();
    let config = HavenConfig::default();
    let service = SearchService::new(&source, &FixedEmbedder, &config);

    for case in &golden.cases {
        let name = &case.name;
        let e = &case.expected;
        let outcome = service
            .search(&SearchRequest::new(&case.query))
            .unwrap_or_else(|err| panic!("{name}: search failed: {err}"));

        let state = if outcome.is_exhausted() { "exhausted" } else { "found" };
        assert_eq!(state, e.state, "{name}: state");
        assert_eq!(outcome.applied_level, e.applied_level, "{name}: applied level");
        assert_eq!(outcome.results.len(), e.result_count, "{name}: result count");

        let ids = outcome.ids();
        for id in &e.includes {
            assert!(ids.contains(&id.as_str()), "{name}: missing {id}, got {ids:?}");
        }
        for id in &e.excludes {
            assert!(!ids.contains(&id.as_str()), "{name}: {id} must not appear");
        }
        if let Some(cap) = e.price_max {
            assert!(outcome
                .results
                .iter()
                .all(|r| r.result.candidate.price.is_some_and(|p| p <= cap)));
        }
        if let Some(relaxed) = e.relaxed_bed_bath {
            assert!(
                outcome.results.iter().all(|r| r.result.relaxed_bed_bath == relaxed),
                "{name}: relaxed_bed_bath"
            );
        }
        if !e.unsatisfied_contains.is_empty() {
            let explanation = outcome
                .no_results
                .as_ref()
                .unwrap_or_else(|| panic!("{name}: expected a no-results explanation"));
            for constraint in &e.unsatisfied_contains {
                assert!(
                    explanation.unsatisfied_constraints.contains(constraint),
                    "{name}: {constraint} not named in {:?}",
                    explanation.unsatisfied_constraints
                );
            }
        }

        // Every result carries its level's penalty and a reason.
        let penalty = config
            .relaxation
            .penalty(outcome.applied_level.unwrap_or(RelaxationLevel::Permanent));
        for ranked in &outcome.results {
            assert_eq!(ranked.result.relaxation_penalty, penalty, "{name}: penalty");
            assert!(!ranked.reason.is_empty());
        }
    }
}
