//! Negated property types and features become excluded tags.

use haven_core::models::{HardConstraint, SearchIntent};

use super::features::canonical_tag;
use super::{Contribution, IIntentRule, RuleContext, RuleMatch};

intent_pattern!(
    RE_NEGATED,
    r"\b(?:no|not an?|not|without|excluding|except|avoid|never|nothing like an?|(?:don't|do not) want an?|(?:don't|do not) want)\s+(apartments?|condos?|condominiums?|townhouses?|townhomes?|houses?|lofts?|studios?|duplexes?|hoa|carpet(?:ing)?|stairs|shared walls|basement)\b"
);

pub struct NegationRule;

impl IIntentRule for NegationRule {
    fn name(&self) -> &'static str {
        "negation"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        for caps in ctx.unclaimed(&RE_NEGATED) {
            let (Some(whole), Some(thing)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let tag = canonical_tag(thing.as_str());
            found.push(Contribution::Hard(HardConstraint::ExcludedTag(tag)), whole.range());
        }
        found.into_option()
    }
}
