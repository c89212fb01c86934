//! Property tests for the relaxation loop, scorer, and diversity selector.

use proptest::prelude::*;

use haven_core::config::{RelaxationConfig, ScoringConfig};
use haven_core::errors::HavenResult;
use haven_core::models::{
    Candidate, HardConstraint, RelaxationLevel, RetrievalFilter, RetrievedCandidate, ScoredResult,
    SearchIntent, SoftPreference, SoftPreferenceKind,
};
use haven_core::traits::ICandidateSource;
use haven_ranking::scoring::{adaptive_alpha, information_density, match_percent};
use haven_ranking::{AdaptiveScorer, ConstraintEngine, DiversitySelector};

const NEIGHBORHOODS: [&str; 4] = ["mission", "sunset", "noe_valley", ""];

/// Returns its whole inventory regardless of the filter.
struct LeakySource(Vec<Candidate>);

impl ICandidateSource for LeakySource {
    fn retrieve(&self, _f: &RetrievalFilter, _q: &[f32], top_k: usize) -> HavenResult<Vec<Candidate>> {
        Ok(self.0.iter().take(top_k).cloned().collect())
    }
    fn name(&self) -> &str {
        "leaky"
    }
}

fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    (
        0u32..10_000,
        100_000.0f64..3_000_000.0,
        0u32..6,
        0u32..4,
        0usize..NEIGHBORHOODS.len(),
        -1.0f64..1.0,
        prop::option::of(0.0f64..10.0),
        any::<bool>(),
    )
        .prop_map(|(id, price, beds, baths, hood, similarity, school, garage)| Candidate {
            id: format!("c{id}"),
            city: "san francisco".into(),
            state: "CA".into(),
            price: Some(price),
            beds: Some(beds),
            baths: Some(baths),
            garage_count: Some(u32::from(garage)),
            school_rating: school,
            neighborhood_id: NEIGHBORHOODS[hood].into(),
            similarity,
            ..Default::default()
        })
}

fn intent_strategy() -> impl Strategy<Value = SearchIntent> {
    (
        prop::option::of(200_000.0f64..2_500_000.0),
        prop::option::of(200_000.0f64..2_500_000.0),
        prop::option::of(1u32..5),
        prop::option::of(1u32..4),
        any::<bool>(),
        any::<bool>(),
        1usize..30,
    )
        .prop_map(|(cap, anchor, beds, baths, parking, schools, words)| {
            let mut intent = SearchIntent::empty(vec!["word"; words].join(" "));
            if let Some(cap) = cap {
                intent.add_hard(HardConstraint::PriceMax(cap));
            }
            if let Some(anchor) = anchor {
                intent.set_budget_anchor(anchor);
            }
            if let Some(beds) = beds {
                intent.add_hard(HardConstraint::MinBeds(beds));
            }
            if let Some(baths) = baths {
                intent.set_baths_anchor(baths);
            }
            if parking {
                intent.set_parking_anchor();
            }
            if schools {
                intent.add_soft(SoftPreference::new(SoftPreferenceKind::GoodSchools, 0.08));
            }
            intent
        })
}

fn retrieved(candidates: Vec<Candidate>, level: RelaxationLevel) -> Vec<RetrievedCandidate> {
    let penalty = RelaxationConfig::default().penalty(level);
    candidates
        .into_iter()
        .map(|candidate| RetrievedCandidate {
            candidate,
            level,
            relaxation_penalty: penalty,
            relaxed_bed_bath: false,
        })
        .collect()
}

// =============================================================================
// Hard constraints are never violated
// =============================================================================
proptest! {
    #[test]
    fn price_cap_holds_at_every_level(
        inventory in prop::collection::vec(candidate_strategy(), 0..40),
        intent in intent_strategy(),
    ) {
        let engine = ConstraintEngine::new(RelaxationConfig::default(), 200);
        let resolution = engine.resolve(&intent, &LeakySource(inventory), &[1.0]).unwrap();
        if let Some(cap) = intent.price_cap() {
            for c in &resolution.candidates {
                prop_assert!(c.candidate.price.unwrap() <= cap);
            }
        }
        if let Some(beds) = intent.min_beds() {
            // One step down at most, never below a floor of 1.
            let floor = if beds <= 1 { beds } else { beds - 1 };
            for c in &resolution.candidates {
                prop_assert!(c.candidate.beds.unwrap() >= floor);
            }
        }
    }

    #[test]
    fn penalty_matches_level_and_is_monotone(
        inventory in prop::collection::vec(candidate_strategy(), 0..40),
        intent in intent_strategy(),
    ) {
        let config = RelaxationConfig::default();
        let penalties: Vec<f64> = RelaxationLevel::ALL.iter().map(|l| config.penalty(*l)).collect();
        prop_assert_eq!(penalties[0], 0.0);
        prop_assert!(penalties.windows(2).all(|w| w[0] <= w[1]));

        let engine = ConstraintEngine::new(config.clone(), 200);
        let resolution = engine.resolve(&intent, &LeakySource(inventory), &[1.0]).unwrap();
        for c in &resolution.candidates {
            prop_assert_eq!(c.relaxation_penalty, config.penalty(c.level));
        }
        prop_assert_eq!(resolution.is_exhausted(), resolution.candidates.is_empty());
    }
}

// =============================================================================
// Scorer bounds and purity
// =============================================================================
proptest! {
    #[test]
    fn match_percent_and_alpha_are_bounded(
        candidate in candidate_strategy(),
        intent in intent_strategy(),
    ) {
        let config = ScoringConfig::default();
        let m = match_percent(&candidate, &intent, &config);
        prop_assert!((0.0..=1.0).contains(&m.percent));

        let alpha = adaptive_alpha(information_density(&intent, &config), &config);
        prop_assert!((0.4..=0.85).contains(&alpha));
    }

    #[test]
    fn scoring_is_idempotent(
        batch in prop::collection::vec(candidate_strategy(), 0..30),
        intent in intent_strategy(),
    ) {
        let scorer = AdaptiveScorer::default();
        let batch = retrieved(batch, RelaxationLevel::Slight);
        let first: Vec<f64> = scorer.score(&batch, &intent).iter().map(|r| r.final_score).collect();
        let second: Vec<f64> = scorer.score(&batch, &intent).iter().map(|r| r.final_score).collect();
        prop_assert_eq!(first.clone(), second);
        prop_assert!(first.windows(2).all(|w| w[0] >= w[1]));
    }
}

// =============================================================================
// Diversity cap
// =============================================================================
proptest! {
    #[test]
    fn diversity_never_exceeds_cap(
        batch in prop::collection::vec(candidate_strategy(), 0..40),
        top_n in 1usize..20,
    ) {
        let intent = SearchIntent::empty("anything");
        let scored: Vec<ScoredResult> =
            AdaptiveScorer::default().score(&retrieved(batch, RelaxationLevel::Permanent), &intent);
        let selector = DiversitySelector::default();
        let picked = selector.select(scored, top_n);

        prop_assert!(picked.len() <= top_n);
        for hood in NEIGHBORHOODS.iter().filter(|h| !h.is_empty()) {
            let n = picked.iter().filter(|r| r.candidate.neighborhood_id == *hood).count();
            prop_assert!(n <= selector.max_per_neighborhood());
        }
        prop_assert!(picked.windows(2).all(|w| w[0].final_score >= w[1].final_score));
    }
}
