/// Haven version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of relaxation levels after the permanent level.
pub const RELAXATION_STEPS: usize = 3;

/// Criterion names used in matched/unmatched lists.
pub const CRITERION_BUDGET: &str = "budget";
pub const CRITERION_BEDROOMS: &str = "bedrooms";
pub const CRITERION_BATHROOMS: &str = "bathrooms";
pub const CRITERION_GARAGE: &str = "garage";
pub const CRITERION_METRO: &str = "metro";
pub const CRITERION_SCHOOL: &str = "school";

/// Tags that count as covered parking for the garage criterion.
pub const PARKING_TAGS: &[&str] = &["garage", "parking_available"];

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
