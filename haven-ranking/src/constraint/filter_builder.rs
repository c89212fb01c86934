//! Per-level retrieval filters. Every level is derived from the permanent
//! constraints, never from the previous level's loosened bounds.

use haven_core::config::{RelaxationConfig, RelaxationStep};
use haven_core::models::{RelaxationLevel, RetrievalFilter, SearchIntent};

/// Build the filter for `level`.
///
/// Relaxed price bound: `min(hard_cap, base × multiplier)` where the base
/// is the budget anchor, or the hard cap when no anchor was stated. A hard
/// cap is therefore never exceeded. Radius expansion needs a target point.
pub fn build_filter(
    intent: &SearchIntent,
    relaxation: &RelaxationConfig,
    level: RelaxationLevel,
) -> RetrievalFilter {
    let step = relaxation.step(level);
    let cap = intent.price_cap();
    let price_max = intent
        .anchors
        .budget
        .or(cap)
        .map(|base| base * step.price_multiplier)
        .map(|bound| cap.map_or(bound, |cap| bound.min(cap)));

    let geo_radius_km = match (level, intent.target_point) {
        (RelaxationLevel::Permanent, _) | (_, None) => None,
        _ if step.geo_radius_km > 0.0 => Some(step.geo_radius_km),
        _ => None,
    };

    RetrievalFilter {
        level,
        city: intent.city().map(str::to_string),
        state: intent.state().map(str::to_string),
        target_point: intent.target_point,
        geo_radius_km,
        price_max,
        price_basis: intent.price_basis,
        min_beds: intent
            .min_beds()
            .map(|n| step_down(n, &step, relaxation.bed_bath_floor)),
        min_baths: intent
            .min_baths()
            .map(|n| step_down(n, &step, relaxation.bed_bath_floor)),
        stated_min_beds: intent.min_beds(),
        stated_min_baths: intent.min_baths(),
        required_tags: intent.required_tags().map(str::to_string).collect(),
        excluded_tags: intent.excluded_tags().map(str::to_string).collect(),
    }
}

/// Apply the step's bed/bath delta without dropping below `floor`. A stated
/// minimum already at or under the floor is left alone.
fn step_down(stated: u32, step: &RelaxationStep, floor: u32) -> u32 {
    if stated <= floor {
        return stated;
    }
    let lowered = i64::from(stated) + i64::from(step.bed_bath_delta);
    lowered.max(i64::from(floor)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::models::{GeoPoint, HardConstraint, PriceBasis};

    fn sf_intent() -> SearchIntent {
        let mut intent = SearchIntent::empty("3br in sf under $1.2m");
        intent.add_hard(HardConstraint::City("san francisco".into()));
        intent.add_hard(HardConstraint::MinBeds(3));
        intent.add_hard(HardConstraint::MinBaths(1));
        intent.target_point = Some(GeoPoint::new(37.7749, -122.4194));
        intent
    }

    #[test]
    fn permanent_level_is_exact() {
        let mut intent = sf_intent();
        intent.add_hard(HardConstraint::PriceMax(1_200_000.0));
        let filter = build_filter(&intent, &RelaxationConfig::default(), RelaxationLevel::Permanent);
        assert_eq!(filter.price_max, Some(1_200_000.0));
        assert_eq!(filter.min_beds, Some(3));
        assert_eq!(filter.geo_radius_km, None);
    }

    #[test]
    fn hard_cap_is_never_multiplied() {
        let mut intent = sf_intent();
        intent.add_hard(HardConstraint::PriceMax(1_200_000.0));
        for level in RelaxationLevel::ALL {
            let filter = build_filter(&intent, &RelaxationConfig::default(), level);
            assert_eq!(filter.price_max, Some(1_200_000.0), "{level}");
        }
    }

    #[test]
    fn anchor_widens_relative_to_permanent() {
        let mut intent = sf_intent();
        intent.set_budget_anchor(1_000_000.0);
        let config = RelaxationConfig::default();
        let moderate = build_filter(&intent, &config, RelaxationLevel::Moderate);
        let price = moderate.price_max.unwrap();
        assert!((price - 1_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn anchor_widening_stops_at_hard_cap() {
        let mut intent = sf_intent();
        intent.set_budget_anchor(1_000_000.0);
        intent.add_hard(HardConstraint::PriceMax(1_150_000.0));
        let filter = build_filter(&intent, &RelaxationConfig::default(), RelaxationLevel::Significant);
        assert_eq!(filter.price_max, Some(1_150_000.0));
    }

    #[test]
    fn monthly_budget_bounds_rent() {
        let mut intent = sf_intent();
        intent.set_budget_anchor(3_500.0);
        intent.price_basis = PriceBasis::Monthly;
        let filter = build_filter(&intent, &RelaxationConfig::default(), RelaxationLevel::Permanent);
        assert_eq!(filter.price_max, Some(3_500.0));
        assert_eq!(filter.price_basis, PriceBasis::Monthly);
    }

    #[test]
    fn bed_bath_step_down_respects_floor() {
        let config = RelaxationConfig::default();
        let slight = build_filter(&sf_intent(), &config, RelaxationLevel::Slight);
        assert_eq!((slight.min_beds, slight.min_baths), (Some(3), Some(1)));
        let moderate = build_filter(&sf_intent(), &config, RelaxationLevel::Moderate);
        assert_eq!((moderate.min_beds, moderate.min_baths), (Some(2), Some(1)));
        assert_eq!(moderate.stated_min_beds, Some(3));
    }

    #[test]
    fn radius_needs_target_point() {
        let mut intent = sf_intent();
        let config = RelaxationConfig::default();
        assert_eq!(
            build_filter(&intent, &config, RelaxationLevel::Slight).geo_radius_km,
            Some(3.0)
        );
        intent.target_point = None;
        assert_eq!(build_filter(&intent, &config, RelaxationLevel::Slight).geo_radius_km, None);
    }
}
