//! Property tests for intent extraction.

use haven_core::models::HardConstraintKind;
use haven_intent::IntentExtractor;
use proptest::prelude::*;

proptest! {
    #[test]
    fn extract_never_panics(query in "\\PC{0,120}") {
        let _ = IntentExtractor::new().extract(&query);
    }

    #[test]
    fn scalar_constraints_appear_at_most_once(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "3", "bedroom", "bath", "under", "$900k", "must", "be", "in", "sf", "oakland",
                "with", "garage", "no", "condo", "around", "cannot", "exceed", "budget", ",",
                "austin,", "TX", "strictly", "1.2m", "quiet", "yard", "2br", "house",
            ]),
            0..24,
        )
    ) {
        let query = words.join(" ");
        let intent = IntentExtractor::new().extract(&query);
        for kind in [
            HardConstraintKind::City,
            HardConstraintKind::State,
            HardConstraintKind::PriceMax,
            HardConstraintKind::MinBeds,
            HardConstraintKind::MinBaths,
        ] {
            let n = intent.hard_constraints.iter().filter(|c| c.kind() == kind).count();
            prop_assert!(n <= 1, "{kind:?} appears {n} times in {query:?}");
        }
        let required: Vec<&str> = intent.required_tags().collect();
        prop_assert!(intent.excluded_tags().all(|t| !required.contains(&t)));
    }

    #[test]
    fn anchor_never_exceeds_hard_cap(query in "[a-z $0-9,.]{0,60}") {
        let intent = IntentExtractor::new().extract(&query);
        if let (Some(cap), Some(anchor)) = (intent.price_cap(), intent.anchors.budget) {
            prop_assert!(anchor < cap);
        }
    }
}
