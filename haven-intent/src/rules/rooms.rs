//! Bedroom and bathroom counts. Plain counts are minimums; counts softened
//! by "around", "about" or "ideally" become anchors. Upper bounds ("at most
//! 2 bedrooms") are not minimums and are dropped.

use haven_core::models::{HardConstraint, SearchIntent};
use regex::Captures;

use super::{Contribution, IIntentRule, RuleContext, RuleMatch};
use crate::normalize::{window_after, window_before};

intent_pattern!(
    RE_BEDS,
    r"\b(\d{1,2}|one|two|three|four|five|six)\s*\+?\s*-?\s*(?:bed(?:room)?s?|brs?|bds?|bdrms?)\b"
);
intent_pattern!(
    RE_BATHS,
    r"\b(\d{1,2}(?:\.5)?|one|two|three|four)\s*\+?\s*-?\s*(?:bath(?:room)?s?|ba)\b"
);
intent_pattern!(
    RE_SOFTENER_BEFORE,
    r"(?:around|about|approximately|approx\.?|roughly|maybe|ideally|preferably|perhaps|~)\s*$"
);
intent_pattern!(
    RE_UPPER_BOUND_BEFORE,
    r"(?:no more than|not more than|at most|max(?:imum)?|up to|fewer than|less than|under)\s*$"
);
intent_pattern!(RE_SOFTENER_AFTER, r"^\s*(?:or so|ish|if possible|ideally|preferably)\b");

fn count_of(word: &str) -> Option<u32> {
    match word {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        // "2.5 baths" asks for at least two full baths.
        digits => digits.parse::<f64>().ok().map(|n| n.floor() as u32),
    }
}

fn is_upper_bound(ctx: &RuleContext<'_>, caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| {
        let before = window_before(ctx.text, m.start(), 16);
        RE_UPPER_BOUND_BEFORE.as_ref().is_some_and(|re| re.is_match(before))
    })
}

fn is_softened(ctx: &RuleContext<'_>, caps: &Captures<'_>) -> bool {
    let Some(m) = caps.get(0) else {
        return false;
    };
    let before = window_before(ctx.text, m.start(), 16);
    let after = window_after(ctx.text, m.end(), 16);
    RE_SOFTENER_BEFORE.as_ref().is_some_and(|re| re.is_match(before))
        || RE_SOFTENER_AFTER.as_ref().is_some_and(|re| re.is_match(after))
}

/// Mandatory mentions win over softened mentions of the same attribute.
fn collect(
    ctx: &RuleContext<'_>,
    pattern: &Option<regex::Regex>,
    hard: fn(u32) -> HardConstraint,
    anchor: fn(u32) -> Contribution,
    found: &mut RuleMatch,
) {
    let mut soft = None;
    for caps in ctx.unclaimed(pattern) {
        let (Some(m), Some(count)) = (caps.get(0), caps.get(1).and_then(|c| count_of(c.as_str())))
        else {
            continue;
        };
        if is_upper_bound(ctx, &caps) {
            continue;
        }
        if is_softened(ctx, &caps) {
            soft.get_or_insert((count, m.range()));
        } else {
            found.push(Contribution::Hard(hard(count)), m.range());
            return;
        }
    }
    if let Some((count, span)) = soft {
        found.push(anchor(count), span);
    }
}

pub struct RoomCountRule;

impl IIntentRule for RoomCountRule {
    fn name(&self) -> &'static str {
        "room_count"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        collect(ctx, &RE_BEDS, HardConstraint::MinBeds, Contribution::BedsAnchor, &mut found);
        collect(ctx, &RE_BATHS, HardConstraint::MinBaths, Contribution::BathsAnchor, &mut found);
        found.into_option()
    }
}
