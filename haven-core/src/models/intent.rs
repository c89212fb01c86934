use serde::{Deserialize, Serialize};

use super::format_money;
use super::geo::GeoPoint;

/// Kind of a hard constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardConstraintKind {
    City,
    State,
    PriceMax,
    MinBeds,
    MinBaths,
    RequiredTag,
    ExcludedTag,
}

impl HardConstraintKind {
    /// Scalar kinds hold at most one value per intent; tag kinds are sets.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::RequiredTag | Self::ExcludedTag)
    }
}

/// A red line: holds for every returned result at every relaxation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HardConstraint {
    City(String),
    State(String),
    PriceMax(f64),
    MinBeds(u32),
    MinBaths(u32),
    RequiredTag(String),
    ExcludedTag(String),
}

impl HardConstraint {
    pub fn kind(&self) -> HardConstraintKind {
        match self {
            Self::City(_) => HardConstraintKind::City,
            Self::State(_) => HardConstraintKind::State,
            Self::PriceMax(_) => HardConstraintKind::PriceMax,
            Self::MinBeds(_) => HardConstraintKind::MinBeds,
            Self::MinBaths(_) => HardConstraintKind::MinBaths,
            Self::RequiredTag(_) => HardConstraintKind::RequiredTag,
            Self::ExcludedTag(_) => HardConstraintKind::ExcludedTag,
        }
    }

    /// The listing field this constraint filters on.
    pub fn field(&self) -> &'static str {
        match self {
            Self::City(_) => "city",
            Self::State(_) => "state",
            Self::PriceMax(_) => "price",
            Self::MinBeds(_) => "bedrooms",
            Self::MinBaths(_) => "bathrooms",
            Self::RequiredTag(_) | Self::ExcludedTag(_) => "tags",
        }
    }

    /// Short user-facing description, e.g. "at least 3 bedrooms".
    pub fn describe(&self) -> String {
        match self {
            Self::City(city) => format!("city: {city}"),
            Self::State(state) => format!("state: {state}"),
            Self::PriceMax(cap) => format!("price at most {}", format_money(*cap)),
            Self::MinBeds(n) => format!("at least {n} bedroom(s)"),
            Self::MinBaths(n) => format!("at least {n} bathroom(s)"),
            Self::RequiredTag(tag) => format!("must have {}", tag.replace('_', " ")),
            Self::ExcludedTag(tag) => format!("must not be/have {}", tag.replace('_', " ")),
        }
    }
}

/// Compass orientation of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Facing {
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
            Self::NorthWest => "northwest",
        }
    }

    /// The structured tag the listing ETL emits for this orientation.
    pub fn tag(&self) -> String {
        format!("{}_facing", self.name())
    }
}

/// What a soft preference rewards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SoftPreferenceKind {
    Orientation(Facing),
    /// Style keyword matched against listing tags ("modern", "renovated_recent").
    Style(String),
    NearTransit,
    GoodSchools,
    SafeArea,
    Walkable,
    HasYard,
    NearGrocery,
    Featured,
    PropertyType(String),
    Neighborhood(String),
    Quiet,
    PetFriendly,
}

impl SoftPreferenceKind {
    /// Stable name used in matched-preference lists.
    pub fn name(&self) -> String {
        match self {
            Self::Orientation(facing) => format!("orientation:{}", facing.name()),
            Self::Style(style) => format!("style:{style}"),
            Self::NearTransit => "near_transit".into(),
            Self::GoodSchools => "good_schools".into(),
            Self::SafeArea => "safe_area".into(),
            Self::Walkable => "walkable".into(),
            Self::HasYard => "has_yard".into(),
            Self::NearGrocery => "near_grocery".into(),
            Self::Featured => "featured".into(),
            Self::PropertyType(kind) => format!("property_type:{kind}"),
            Self::Neighborhood(name) => format!("neighborhood:{name}"),
            Self::Quiet => "quiet".into(),
            Self::PetFriendly => "pet_friendly".into(),
        }
    }

    /// User-facing label for requirement summaries.
    pub fn label(&self) -> String {
        match self {
            Self::Orientation(facing) => format!("{}-facing", facing.name()),
            Self::Style(style) => format!("{} style", style.replace('_', " ")),
            Self::NearTransit => "near public transit".into(),
            Self::GoodSchools => "good schools nearby".into(),
            Self::SafeArea => "safe area".into(),
            Self::Walkable => "walkable neighborhood".into(),
            Self::HasYard => "with yard/garden".into(),
            Self::NearGrocery => "near grocery stores".into(),
            Self::Featured => "featured/premium".into(),
            Self::PropertyType(kind) => format!("preferably a {kind}"),
            Self::Neighborhood(name) => format!("around {name}"),
            Self::Quiet => "quiet neighborhood".into(),
            Self::PetFriendly => "pet-friendly".into(),
        }
    }
}

/// A non-filtering preference that only adds bonus score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftPreference {
    pub kind: SoftPreferenceKind,
    /// Bonus added when a listing satisfies this preference.
    pub weight_hint: f64,
}

impl SoftPreference {
    pub fn new(kind: SoftPreferenceKind, weight_hint: f64) -> Self {
        Self { kind, weight_hint }
    }
}

/// Amounts and counts stated without mandatory phrasing. They shape match
/// scoring and the relaxable price bound but are never red lines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchors {
    pub budget: Option<f64>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    /// Parking mentioned without mandatory phrasing.
    pub parking: bool,
    /// Floor area asked for, in square feet. Reported, never filtered on.
    pub min_sqft: Option<u32>,
}

impl Anchors {
    pub fn count(&self) -> usize {
        usize::from(self.budget.is_some())
            + usize::from(self.beds.is_some())
            + usize::from(self.baths.is_some())
            + usize::from(self.parking)
            + usize::from(self.min_sqft.is_some())
    }
}

/// Whether stated amounts are purchase prices or monthly rents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    #[default]
    Total,
    Monthly,
}

/// Structured intent extracted once per query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchIntent {
    pub raw_query: String,
    pub hard_constraints: Vec<HardConstraint>,
    pub soft_preferences: Vec<SoftPreference>,
    pub anchors: Anchors,
    /// Centroid of the stated city, when the gazetteer knows it.
    pub target_point: Option<GeoPoint>,
    pub price_basis: PriceBasis,
}

impl SearchIntent {
    /// An intent with empty constraint sets: pure semantic ranking.
    pub fn empty(raw_query: impl Into<String>) -> Self {
        Self {
            raw_query: raw_query.into(),
            ..Default::default()
        }
    }

    /// Add a hard constraint. Scalar kinds keep the first value seen; tag
    /// kinds are deduplicated and a tag cannot be both required and excluded.
    /// Returns whether the constraint was added.
    pub fn add_hard(&mut self, constraint: HardConstraint) -> bool {
        let kind = constraint.kind();
        if kind.is_scalar() && self.hard_constraints.iter().any(|c| c.kind() == kind) {
            return false;
        }
        let conflicting = match &constraint {
            HardConstraint::RequiredTag(tag) => HardConstraint::ExcludedTag(tag.clone()),
            HardConstraint::ExcludedTag(tag) => HardConstraint::RequiredTag(tag.clone()),
            _ => constraint.clone(),
        };
        if self
            .hard_constraints
            .iter()
            .any(|c| *c == constraint || (c.kind() != kind && *c == conflicting))
        {
            return false;
        }

        // Mandatory wins over the matching anchor.
        match &constraint {
            HardConstraint::PriceMax(cap) => {
                if self.anchors.budget.is_some_and(|b| b >= *cap) {
                    self.anchors.budget = None;
                }
            }
            HardConstraint::MinBeds(_) => self.anchors.beds = None,
            HardConstraint::MinBaths(_) => self.anchors.baths = None,
            HardConstraint::RequiredTag(tag)
                if crate::constants::PARKING_TAGS.contains(&tag.as_str()) =>
            {
                self.anchors.parking = false
            }
            _ => {}
        }

        self.hard_constraints.push(constraint);
        true
    }

    /// Add a soft preference unless the same kind is already present.
    pub fn add_soft(&mut self, preference: SoftPreference) -> bool {
        if self.soft_preferences.iter().any(|p| p.kind == preference.kind) {
            return false;
        }
        self.soft_preferences.push(preference);
        true
    }

    /// Record a budget anchor. Ignored when a hard cap at or below it exists.
    pub fn set_budget_anchor(&mut self, amount: f64) {
        if self.anchors.budget.is_some() || self.price_cap().is_some_and(|cap| cap <= amount) {
            return;
        }
        self.anchors.budget = Some(amount);
    }

    pub fn set_beds_anchor(&mut self, beds: u32) {
        if self.min_beds().is_none() && self.anchors.beds.is_none() {
            self.anchors.beds = Some(beds);
        }
    }

    pub fn set_baths_anchor(&mut self, baths: u32) {
        if self.min_baths().is_none() && self.anchors.baths.is_none() {
            self.anchors.baths = Some(baths);
        }
    }

    /// First floor-area mention wins.
    pub fn set_min_sqft_anchor(&mut self, sqft: u32) {
        self.anchors.min_sqft.get_or_insert(sqft);
    }

    /// Record a parking mention. Ignored when parking is already required.
    pub fn set_parking_anchor(&mut self) {
        if !self.requires_parking() {
            self.anchors.parking = true;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hard_constraints.is_empty()
            && self.soft_preferences.is_empty()
            && self.anchors.count() == 0
    }

    pub fn city(&self) -> Option<&str> {
        self.hard_constraints.iter().find_map(|c| match c {
            HardConstraint::City(city) => Some(city.as_str()),
            _ => None,
        })
    }

    pub fn state(&self) -> Option<&str> {
        self.hard_constraints.iter().find_map(|c| match c {
            HardConstraint::State(state) => Some(state.as_str()),
            _ => None,
        })
    }

    pub fn price_cap(&self) -> Option<f64> {
        self.hard_constraints.iter().find_map(|c| match c {
            HardConstraint::PriceMax(cap) => Some(*cap),
            _ => None,
        })
    }

    pub fn min_beds(&self) -> Option<u32> {
        self.hard_constraints.iter().find_map(|c| match c {
            HardConstraint::MinBeds(n) => Some(*n),
            _ => None,
        })
    }

    pub fn min_baths(&self) -> Option<u32> {
        self.hard_constraints.iter().find_map(|c| match c {
            HardConstraint::MinBaths(n) => Some(*n),
            _ => None,
        })
    }

    pub fn required_tags(&self) -> impl Iterator<Item = &str> {
        self.hard_constraints.iter().filter_map(|c| match c {
            HardConstraint::RequiredTag(tag) => Some(tag.as_str()),
            _ => None,
        })
    }

    pub fn excluded_tags(&self) -> impl Iterator<Item = &str> {
        self.hard_constraints.iter().filter_map(|c| match c {
            HardConstraint::ExcludedTag(tag) => Some(tag.as_str()),
            _ => None,
        })
    }

    /// Price the budget criterion is scored against: the anchor when one
    /// was stated, otherwise the hard cap.
    pub fn budget_target(&self) -> Option<f64> {
        self.anchors.budget.or(self.price_cap())
    }

    pub fn beds_target(&self) -> Option<u32> {
        self.min_beds().or(self.anchors.beds)
    }

    pub fn baths_target(&self) -> Option<u32> {
        self.min_baths().or(self.anchors.baths)
    }

    pub fn requires_parking(&self) -> bool {
        self.required_tags()
            .any(|tag| crate::constants::PARKING_TAGS.contains(&tag))
    }

    /// Whether parking was asked for, as a requirement or a stated feature.
    pub fn wants_parking(&self) -> bool {
        self.anchors.parking || self.requires_parking()
    }

    pub fn preference(&self, kind: &SoftPreferenceKind) -> Option<&SoftPreference> {
        self.soft_preferences.iter().find(|p| &p.kind == kind)
    }

    pub fn wants(&self, kind: &SoftPreferenceKind) -> bool {
        self.preference(kind).is_some()
    }

    /// Explicit structured criteria: hard constraints plus anchors.
    pub fn structured_criteria_count(&self) -> usize {
        self.hard_constraints.len() + self.anchors.count()
    }

    pub fn word_count(&self) -> usize {
        self.raw_query.split_whitespace().count()
    }
}
