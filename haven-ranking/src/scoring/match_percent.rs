//! Weighted structured-criterion match.
//!
//! A criterion the query never mentioned is left out of both the numerator
//! and the denominator. A mentioned criterion the listing fails scores 0.

use haven_core::config::ScoringConfig;
use haven_core::constants::{
    CRITERION_BATHROOMS, CRITERION_BEDROOMS, CRITERION_BUDGET, CRITERION_GARAGE, CRITERION_METRO,
    CRITERION_SCHOOL,
};
use haven_core::models::{Candidate, SearchIntent, SoftPreferenceKind};

/// Per-candidate criterion outcome.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchBreakdown {
    /// Weighted fraction in [0, 1]; 0 when no criterion applies.
    pub percent: f64,
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

pub fn match_percent(
    candidate: &Candidate,
    intent: &SearchIntent,
    config: &ScoringConfig,
) -> MatchBreakdown {
    let w = &config.weights;
    let hits = [
        (
            CRITERION_BUDGET,
            w.budget,
            intent
                .budget_target()
                .map(|target| {
                    budget_hit(
                        candidate.price_on(intent.price_basis),
                        target,
                        config.budget_tolerance,
                    )
                }),
        ),
        (
            CRITERION_BEDROOMS,
            w.bedrooms,
            intent
                .beds_target()
                .map(|target| count_hit(candidate.beds, target, config.near_miss_credit)),
        ),
        (
            CRITERION_BATHROOMS,
            w.bathrooms,
            intent
                .baths_target()
                .map(|target| count_hit(candidate.baths, target, config.near_miss_credit)),
        ),
        (
            CRITERION_GARAGE,
            w.garage,
            intent
                .wants_parking()
                .then(|| flag(candidate.has_parking())),
        ),
        (
            CRITERION_METRO,
            w.metro,
            intent
                .wants(&SoftPreferenceKind::NearTransit)
                .then(|| metro_hit(candidate)),
        ),
        (
            CRITERION_SCHOOL,
            w.school,
            intent
                .wants(&SoftPreferenceKind::GoodSchools)
                .then(|| school_hit(candidate, config)),
        ),
    ];

    let mut breakdown = MatchBreakdown::default();
    let mut earned = 0.0;
    let mut possible = 0.0;
    for (name, weight, hit) in hits {
        let Some(hit) = hit else { continue };
        let hit = hit.clamp(0.0, 1.0);
        earned += weight * hit;
        possible += weight;
        if hit >= 1.0 {
            breakdown.matched.push(name.to_string());
        } else {
            breakdown.unmatched.push(name.to_string());
        }
    }

    if possible > 0.0 {
        breakdown.percent = (earned / possible).clamp(0.0, 1.0);
    }
    breakdown
}

/// 1 at or under target, decaying linearly to 0 at `target × (1 + tolerance)`.
fn budget_hit(price: Option<f64>, target: f64, tolerance: f64) -> f64 {
    let Some(price) = price else { return 0.0 };
    if target <= 0.0 {
        return 0.0;
    }
    if price <= target {
        return 1.0;
    }
    let over = (price - target) / target;
    (1.0 - over / tolerance).max(0.0)
}

/// 1 at or above target, partial credit for exactly one short.
fn count_hit(value: Option<u32>, target: u32, near_miss: f64) -> f64 {
    match value {
        Some(v) if v >= target => 1.0,
        Some(v) if v + 1 == target => near_miss,
        _ => 0.0,
    }
}

fn metro_hit(candidate: &Candidate) -> f64 {
    if candidate.near_metro || candidate.has_tag("walk_to_metro") {
        1.0
    } else {
        candidate.metro_score.unwrap_or(0.0)
    }
}

fn school_hit(candidate: &Candidate, config: &ScoringConfig) -> f64 {
    if candidate.has_tag("good_school") {
        return 1.0;
    }
    match candidate.school_rating {
        Some(r) if r >= config.good_school_rating => 1.0,
        Some(r) if r >= config.good_school_rating - 1.0 => config.near_miss_credit,
        _ => 0.0,
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
