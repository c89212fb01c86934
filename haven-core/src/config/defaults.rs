// Single source of truth for all default values.

// --- Relaxation (slight / moderate / significant) ---
pub const DEFAULT_PRICE_MULTIPLIERS: [f64; 3] = [1.10, 1.20, 1.35];
pub const DEFAULT_GEO_RADII_KM: [f64; 3] = [3.0, 8.0, 15.0];
pub const DEFAULT_BED_BATH_DELTAS: [i32; 3] = [0, -1, -1];
pub const DEFAULT_RELAXATION_PENALTIES: [f64; 3] = [0.05, 0.12, 0.20];
pub const DEFAULT_LEVEL_NAMES: [&str; 3] = ["slight", "moderate", "significant"];
pub const DEFAULT_BED_BATH_FLOOR: u32 = 1;

// --- Scoring: criterion weights ---
pub const DEFAULT_WEIGHT_BUDGET: f64 = 0.35;
pub const DEFAULT_WEIGHT_BEDROOMS: f64 = 0.25;
pub const DEFAULT_WEIGHT_BATHROOMS: f64 = 0.15;
pub const DEFAULT_WEIGHT_GARAGE: f64 = 0.10;
pub const DEFAULT_WEIGHT_METRO: f64 = 0.10;
pub const DEFAULT_WEIGHT_SCHOOL: f64 = 0.05;

// --- Scoring: adaptive alpha ---
pub const DEFAULT_ALPHA_BASE: f64 = 0.4;
pub const DEFAULT_ALPHA_SLOPE: f64 = 0.1;
pub const DEFAULT_ALPHA_MAX: f64 = 0.85;
pub const DEFAULT_DENSITY_CAP: f64 = 5.0;
pub const DEFAULT_DENSITY_SCALE: f64 = 10.0; // criteria per ten words

// --- Scoring: near-miss and thresholds ---
pub const DEFAULT_BUDGET_TOLERANCE: f64 = 0.35;
pub const DEFAULT_NEAR_MISS_CREDIT: f64 = 0.5;
pub const DEFAULT_GOOD_SCHOOL_RATING: f64 = 8.0;
pub const DEFAULT_SAFE_CRIME_INDEX: f64 = 3.0;
pub const DEFAULT_AMENITY_INDEX_THRESHOLD: f64 = 7.0;

// --- Diversity ---
pub const DEFAULT_MAX_PER_NEIGHBORHOOD: usize = 2;
pub const DEFAULT_TOP_N: usize = 10;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 200;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
