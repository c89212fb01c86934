//! Floor area: "at least 1,500 sq ft", "1800+ sqft", "around 2000 square feet".

use haven_core::models::SearchIntent;

use super::{Contribution, IIntentRule, RuleContext, RuleMatch};
use crate::normalize::window_before;

intent_pattern!(
    RE_SQFT,
    r"\b(?:(at least|minimum|min\.?|over|more than|no more than|not more than|at most|under|less than|below|max(?:imum)?|up to|around|about|approximately|roughly)\s+)?(\d{1,2},\d{3}|\d{3,5})\s*\+?\s*(?:sq\.?\s?ft|sqft|square\s+f(?:ee|oo)t|sf)\b"
);

const UPPER_BOUNDS: &[&str] = &[
    "no more than",
    "not more than",
    "at most",
    "under",
    "less than",
    "below",
    "max",
    "max.",
    "maximum",
    "up to",
];

/// A stated floor area becomes the `min_sqft` anchor. An upper bound
/// ("under 900 sq ft") is consumed without recording a minimum.
pub struct FloorAreaRule;

impl IIntentRule for FloorAreaRule {
    fn name(&self) -> &'static str {
        "floor_area"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        for caps in ctx.unclaimed(&RE_SQFT) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            // "$2000 sf": money followed by the city alias.
            if window_before(ctx.text, number.start(), 1) == "$" {
                continue;
            }
            if caps
                .get(1)
                .is_some_and(|m| UPPER_BOUNDS.contains(&m.as_str()))
            {
                continue;
            }
            let Ok(sqft) = number.as_str().replace(',', "").parse::<u32>() else {
                continue;
            };
            let mut found = RuleMatch::default();
            found.push(Contribution::SqftAnchor(sqft), whole.range());
            return found.into_option();
        }
        None
    }
}
