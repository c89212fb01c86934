//! Soft preference satisfaction and bonus.

use haven_core::config::ScoringConfig;
use haven_core::models::{Candidate, SearchIntent, SoftPreferenceKind};
use haven_intent::gazetteer::same_neighborhood;

/// Whether a listing satisfies one soft preference.
pub fn satisfies(candidate: &Candidate, kind: &SoftPreferenceKind, config: &ScoringConfig) -> bool {
    let at_least = |value: Option<f64>, threshold: f64| value.is_some_and(|v| v >= threshold);
    let at_most = |value: Option<f64>, threshold: f64| value.is_some_and(|v| v <= threshold);

    match kind {
        SoftPreferenceKind::Orientation(facing) => candidate.has_tag(&facing.tag()),
        SoftPreferenceKind::Style(style) => candidate.has_tag(style),
        SoftPreferenceKind::NearTransit => {
            candidate.near_metro || candidate.has_tag("walk_to_metro")
        }
        SoftPreferenceKind::GoodSchools => {
            candidate.has_tag("good_school")
                || at_least(candidate.school_rating, config.good_school_rating)
        }
        SoftPreferenceKind::SafeArea => {
            candidate.has_tag("safe_area") || at_most(candidate.crime_index, config.safe_crime_index)
        }
        SoftPreferenceKind::Walkable => {
            candidate.has_tag("walkable")
                || at_least(candidate.walk_score, config.amenity_index_threshold)
        }
        SoftPreferenceKind::HasYard => candidate.has_yard || candidate.has_tag("yard"),
        SoftPreferenceKind::NearGrocery => {
            candidate.has_tag("near_grocery")
                || at_least(candidate.grocery_score, config.amenity_index_threshold)
        }
        SoftPreferenceKind::Featured => candidate.is_featured,
        SoftPreferenceKind::PropertyType(kind) => candidate.has_tag(kind),
        SoftPreferenceKind::Neighborhood(name) => {
            same_neighborhood(&candidate.neighborhood_id, name)
        }
        SoftPreferenceKind::Quiet => {
            candidate.has_tag("quiet") || at_most(candidate.crime_index, config.safe_crime_index)
        }
        SoftPreferenceKind::PetFriendly => candidate.has_tag("pet_friendly"),
    }
}

/// Sum of weight hints for satisfied preferences, plus their names.
pub fn preference_bonus(
    candidate: &Candidate,
    intent: &SearchIntent,
    config: &ScoringConfig,
) -> (f64, Vec<String>) {
    intent
        .soft_preferences
        .iter()
        .filter(|p| satisfies(candidate, &p.kind, config))
        .fold((0.0, Vec::new()), |(bonus, mut names), p| {
            names.push(p.kind.name());
            (bonus + p.weight_hint, names)
        })
}
