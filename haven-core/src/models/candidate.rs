use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::intent::PriceBasis;

/// A listing plus the fields needed for scoring, as returned by a
/// candidate source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub city: String,
    pub state: String,
    pub location: Option<GeoPoint>,
    /// Sale price.
    pub price: Option<f64>,
    /// Monthly rent, for listings offered for rent.
    pub price_per_month: Option<f64>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    pub garage_count: Option<u32>,
    /// Distance to the query's target point, filled by the source.
    pub distance_km: Option<f64>,
    pub near_metro: bool,
    /// Metro proximity in [0, 1].
    pub metro_score: Option<f64>,
    /// School rating on a 0-10 scale.
    pub school_rating: Option<f64>,
    /// Crime index on a 0-10 scale, lower is safer.
    pub crime_index: Option<f64>,
    /// Walkability index on a 0-10 scale.
    pub walk_score: Option<f64>,
    /// Grocery accessibility index on a 0-10 scale.
    pub grocery_score: Option<f64>,
    pub has_yard: bool,
    pub is_featured: bool,
    pub neighborhood_id: String,
    pub floor_plan_id: Option<String>,
    pub price_band: Option<String>,
    /// Precomputed structured tags (lower-case).
    pub tags: BTreeSet<String>,
    /// Raw cosine similarity in [-1, 1].
    pub similarity: f64,
}

impl Candidate {
    /// The price a budget on `basis` is compared with.
    pub fn price_on(&self, basis: PriceBasis) -> Option<f64> {
        match basis {
            PriceBasis::Total => self.price,
            PriceBasis::Monthly => self.price_per_month,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Covered parking: a garage space or a parking tag.
    pub fn has_parking(&self) -> bool {
        self.garage_count.is_some_and(|g| g > 0)
            || crate::constants::PARKING_TAGS
                .iter()
                .any(|tag| self.has_tag(tag))
    }
}
