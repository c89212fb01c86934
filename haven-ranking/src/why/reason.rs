use haven_core::models::{RelaxationLevel, ScoredResult};

pub const SIMILARITY_ONLY_REASON: &str = "Recommended based on semantic similarity";

/// Unmatched criteria listed in a reason.
const MAX_NOTED_MISSES: usize = 2;

/// One-line reason built from the score components.
pub fn template_reason(result: &ScoredResult) -> String {
    let mut parts = Vec::new();
    if !result.matched_criteria.is_empty() {
        parts.push(format!(
            "Matches your requirements: {}",
            result.matched_criteria.join(", ")
        ));
    }
    if !result.matched_preferences.is_empty() {
        let readable: Vec<String> = result
            .matched_preferences
            .iter()
            .map(|name| name.replace([':', '_'], " "))
            .collect();
        parts.push(format!("Bonus features: {}", readable.join(", ")));
    }
    if !result.unmatched_criteria.is_empty() {
        let noted: Vec<&str> = result
            .unmatched_criteria
            .iter()
            .take(MAX_NOTED_MISSES)
            .map(String::as_str)
            .collect();
        parts.push(format!("Note: {}", noted.join(", ")));
    }
    if result.relaxed_bed_bath {
        parts.push("Has one fewer bedroom or bathroom than requested".to_string());
    }
    if result.level != RelaxationLevel::Permanent {
        parts.push(format!("Found with {} relaxation", result.level));
    }

    if parts.is_empty() {
        SIMILARITY_ONLY_REASON.to_string()
    } else {
        parts.join(" | ")
    }
}
