use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::format_money;
use super::geo::GeoPoint;
use super::intent::PriceBasis;
use super::relaxation::RelaxationLevel;
use crate::constants::PARKING_TAGS;

/// Bounds for one retrieval attempt, derived from the intent's hard
/// constraints and the active relaxation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalFilter {
    pub level: RelaxationLevel,
    pub city: Option<String>,
    pub state: Option<String>,
    pub target_point: Option<GeoPoint>,
    /// Listings within this radius of the target point count as in-area.
    pub geo_radius_km: Option<f64>,
    pub price_max: Option<f64>,
    /// Whether `price_max` bounds the sale price or the monthly rent.
    #[serde(default)]
    pub price_basis: PriceBasis,
    pub min_beds: Option<u32>,
    pub min_baths: Option<u32>,
    /// Minimums as stated, before any step-down.
    pub stated_min_beds: Option<u32>,
    pub stated_min_baths: Option<u32>,
    pub required_tags: Vec<String>,
    pub excluded_tags: Vec<String>,
}

impl RetrievalFilter {
    /// A filter that admits everything.
    pub fn unbounded(level: RelaxationLevel) -> Self {
        Self {
            level,
            city: None,
            state: None,
            target_point: None,
            geo_radius_km: None,
            price_max: None,
            price_basis: PriceBasis::Total,
            min_beds: None,
            min_baths: None,
            stated_min_beds: None,
            stated_min_baths: None,
            required_tags: Vec::new(),
            excluded_tags: Vec::new(),
        }
    }

    /// Whether a candidate satisfies every bound of this filter.
    pub fn admits(&self, candidate: &Candidate) -> bool {
        self.in_area(candidate)
            && self.within_price(candidate)
            && at_least(candidate.beds, self.min_beds)
            && at_least(candidate.baths, self.min_baths)
            && self
                .required_tags
                .iter()
                .all(|tag| satisfies_tag(candidate, tag))
            && !self
                .excluded_tags
                .iter()
                .any(|tag| satisfies_tag(candidate, tag))
    }

    /// Exact city/state match, or within the radius of the target point.
    /// A stated state always has to match.
    pub fn in_area(&self, candidate: &Candidate) -> bool {
        let state_ok = self
            .state
            .as_deref()
            .map_or(true, |s| candidate.state.eq_ignore_ascii_case(s));
        if !state_ok {
            return false;
        }
        let Some(city) = self.city.as_deref() else {
            return true;
        };
        if candidate.city.eq_ignore_ascii_case(city) {
            return true;
        }
        match (self.target_point, self.geo_radius_km) {
            (Some(_), Some(radius)) => candidate.distance_km.is_some_and(|d| d <= radius),
            _ => false,
        }
    }

    pub fn within_price(&self, candidate: &Candidate) -> bool {
        match self.price_max {
            None => true,
            Some(max) => candidate
                .price_on(self.price_basis)
                .is_some_and(|p| p <= max),
        }
    }

    /// True when the candidate only passes because of the bed/bath step-down.
    pub fn uses_bed_bath_relaxation(&self, candidate: &Candidate) -> bool {
        below(candidate.beds, self.stated_min_beds) || below(candidate.baths, self.stated_min_baths)
    }

    /// Human-readable bounds, used in diagnostics.
    pub fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(city) = &self.city {
            match self.geo_radius_km.filter(|_| self.target_point.is_some()) {
                Some(radius) => parts.push(format!("city: {city} (+{radius} km)")),
                None => parts.push(format!("city: {city}")),
            }
        }
        if let Some(state) = &self.state {
            parts.push(format!("state: {state}"));
        }
        if let Some(max) = self.price_max {
            let per_month = match self.price_basis {
                PriceBasis::Monthly => "/month",
                PriceBasis::Total => "",
            };
            parts.push(format!("price <= {}{per_month}", format_money(max)));
        }
        if let Some(beds) = self.min_beds {
            parts.push(format!("beds >= {beds}"));
        }
        if let Some(baths) = self.min_baths {
            parts.push(format!("baths >= {baths}"));
        }
        for tag in &self.required_tags {
            parts.push(format!("has {tag}"));
        }
        for tag in &self.excluded_tags {
            parts.push(format!("not {tag}"));
        }
        parts
    }
}

/// Tag presence. Parking tags are also satisfied by a garage count and the
/// yard tag by the listing's yard flag.
pub fn satisfies_tag(candidate: &Candidate, tag: &str) -> bool {
    candidate.has_tag(tag)
        || (PARKING_TAGS.contains(&tag) && candidate.has_parking())
        || (tag == "yard" && candidate.has_yard)
}

fn at_least(value: Option<u32>, min: Option<u32>) -> bool {
    match min {
        None => true,
        Some(min) => value.is_some_and(|v| v >= min),
    }
}

fn below(value: Option<u32>, stated: Option<u32>) -> bool {
    matches!((value, stated), (Some(v), Some(s)) if v < s)
}
