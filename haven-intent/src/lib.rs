//! # haven-intent
//!
//! Turns a free-text listing query into a structured [`SearchIntent`].
//!
//! ## Architecture
//!
//! ```text
//! IntentExtractor
//! ├── normalize (lower-case, collapse whitespace)
//! └── ordered rules, each claiming the text spans it consumed
//!     ├── HardPriceCapRule       "cannot exceed $1M"
//!     ├── BudgetAnchorRule       "under $900k", "$750,000"
//!     ├── BudgetPromotionRule    "cannot exceed budget"
//!     ├── FloorAreaRule          "at least 1,500 sq ft"
//!     ├── NegationRule           "no apartments"
//!     ├── LocationRule           gazetteer cities / states
//!     ├── NeighborhoodRule       SF neighborhoods and aliases
//!     ├── RoomCountRule          "3-bedroom", "around 2 baths"
//!     ├── RequiredFeatureRule    "with garage", "must be a house"
//!     ├── PropertyTypeRule       "condo", "townhouses"
//!     ├── SoftPreferenceRule     transit, schools, yard, style, ...
//!     └── UnknownCityRule        "in Atlantis": unlisted place, no centroid
//! ```
//!
//! Extraction never fails: a rule whose pattern cannot apply contributes
//! nothing, and the worst case is an intent with empty constraint sets.

pub mod amount;
pub mod extractor;
pub mod gazetteer;
pub mod normalize;
pub mod rules;

pub use extractor::IntentExtractor;
pub use haven_core::models::SearchIntent;
