//! Request-scoped data model. Nothing here outlives a single search call.

mod candidate;
mod explanation;
mod filter;
mod geo;
mod intent;
mod relaxation;
mod scored;

pub use candidate::Candidate;
pub use explanation::{ExplanationInput, NoResultsExplanation, GENERIC_SUGGESTIONS};
pub use filter::{satisfies_tag, RetrievalFilter};
pub use geo::GeoPoint;
pub use intent::{
    Anchors, Facing, HardConstraint, HardConstraintKind, PriceBasis, SearchIntent,
    SoftPreference, SoftPreferenceKind,
};
pub use relaxation::RelaxationLevel;
pub use scored::{RetrievedCandidate, ScoredResult};

/// Format a dollar amount with thousands separators, e.g. `$1,200,000`.
pub fn format_money(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}
