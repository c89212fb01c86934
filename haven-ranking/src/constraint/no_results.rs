use haven_core::models::{NoResultsExplanation, SearchIntent, GENERIC_SUGGESTIONS};

/// Explanation for a search that found nothing at any level. Every hard
/// constraint is named: together they admit no listing even with the
/// widest price range and search area.
pub fn explain_exhaustion(intent: &SearchIntent) -> NoResultsExplanation {
    let unsatisfied: Vec<String> = intent
        .hard_constraints
        .iter()
        .map(|c| c.describe())
        .collect();

    let message = if unsatisfied.is_empty() {
        "No properties are available for this search right now.".to_string()
    } else {
        format!(
            "No properties match all of your requirements ({}), even after widening the price range and search area. Consider relaxing one of them.",
            unsatisfied.join("; ")
        )
    };

    NoResultsExplanation {
        unsatisfied_constraints: unsatisfied,
        message,
        suggestions: GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::models::HardConstraint;

    #[test]
    fn names_every_hard_constraint() {
        let mut intent = SearchIntent::empty("castle in atlantis");
        intent.add_hard(HardConstraint::City("atlantis".into()));
        intent.add_hard(HardConstraint::RequiredTag("moat".into()));
        let explanation = explain_exhaustion(&intent);
        assert_eq!(
            explanation.unsatisfied_constraints,
            vec!["city: atlantis".to_string(), "must have moat".to_string()]
        );
        assert!(explanation.message.contains("city: atlantis"));
        assert_eq!(explanation.suggestions.len(), 3);
    }

    #[test]
    fn empty_intent_still_explains() {
        let explanation = explain_exhaustion(&SearchIntent::empty("anything"));
        assert!(explanation.unsatisfied_constraints.is_empty());
        assert!(!explanation.message.is_empty());
    }
}
