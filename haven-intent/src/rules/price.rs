//! Price rules: hard caps, soft budget anchors, and budget promotion.

use haven_core::models::{HardConstraint, PriceBasis, SearchIntent};
use regex::Captures;

use super::{Contribution, IIntentRule, RuleContext, RuleMatch};
use crate::amount::{is_area_or_address, is_explicit_currency, is_monthly_suffix, parse_amount};
use crate::amount_fragment;

// ── Hard caps ──────────────────────────────────────────────────────────────
intent_pattern!(
    RE_CAP_NEGATED_EXCEED,
    concat!(
        r"\b(?:cannot|can't|can not|must not|mustn't|should not|shouldn't|will not|won't|do not|don't|not to)\s+",
        r"(?:exceed|go over|go above|be more than|be over|be above|cost more than)\s+",
        amount_fragment!()
    )
);
intent_pattern!(
    RE_CAP_MUST_BE_UNDER,
    concat!(
        r"\b(?:must|has to|have to|needs? to|should)\s+(?:be|cost|stay)\s+",
        r"(?:under|below|less than|at most|no more than)\s+",
        amount_fragment!()
    )
);
intent_pattern!(
    RE_CAP_NO_MORE_THAN,
    concat!(r"\bno more than\s+", amount_fragment!())
);
intent_pattern!(
    RE_CAP_STRICTLY,
    concat!(
        r"\b(?:strictly|absolutely|hard (?:cap|limit|max|maximum)(?: of| is)?|not a (?:penny|dollar|cent) (?:over|more than))\s+(?:under\s+|below\s+|less than\s+)?",
        amount_fragment!()
    )
);

// ── Anchors ────────────────────────────────────────────────────────────────
intent_pattern!(
    RE_ANCHOR_PHRASE,
    concat!(
        r"\b(?:under|below|less than|up to|max|maximum|around|about|approximately|roughly|budget(?: of| is| around)?|priced at)\s+",
        amount_fragment!()
    )
);
// "at 1500", "for 2000": only money with a `$` or a k/m suffix.
intent_pattern!(
    RE_ANCHOR_WEAK,
    concat!(r"\b(?:within|for|at|near)\s+", amount_fragment!())
);
intent_pattern!(
    RE_ANCHOR_DOLLAR,
    r"(\$\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|thousand)|mm|k|m)?)\b"
);

// ── Promotion ──────────────────────────────────────────────────────────────
intent_pattern!(
    RE_PROMOTE,
    r"\b(?:(?:cannot|can't|can not|must not|mustn't|should not|will not|won't|do not|don't)\s+(?:exceed|go over|go above|break|stretch)\s+(?:my |the |our |this )?budget|(?:strict|firm|fixed|hard)\s+budget|budget is (?:strict|firm|fixed|final)|budget (?:cannot|can't|can not) be exceeded)\b"
);

/// Amount from capture group 1, plus whether it reads as a monthly rent.
fn amount_of(ctx: &RuleContext<'_>, caps: &Captures<'_>) -> Option<(f64, PriceBasis)> {
    let m = caps.get(1)?;
    let amount = parse_amount(m.as_str())?;
    let after = crate::normalize::window_after(ctx.text, m.end(), 24);
    if is_area_or_address(m.as_str(), after) {
        return None;
    }
    let basis = if is_monthly_suffix(after) {
        PriceBasis::Monthly
    } else {
        PriceBasis::Total
    };
    Some((amount, basis))
}

fn push_amount(
    found: &mut RuleMatch,
    caps: &Captures<'_>,
    amount: f64,
    basis: PriceBasis,
    make: fn(f64) -> Contribution,
) {
    let span = caps.get(0).map_or(0..0, |m| m.range());
    found.push(make(amount), span.clone());
    if basis == PriceBasis::Monthly {
        found.push(Contribution::PriceBasis(basis), span);
    }
}

/// "cannot exceed $1M", "must be under 900k", "no more than $750,000".
pub struct HardPriceCapRule;

impl IIntentRule for HardPriceCapRule {
    fn name(&self) -> &'static str {
        "hard_price_cap"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        for pattern in [
            &RE_CAP_NEGATED_EXCEED,
            &RE_CAP_MUST_BE_UNDER,
            &RE_CAP_NO_MORE_THAN,
            &RE_CAP_STRICTLY,
        ] {
            for caps in ctx.unclaimed(pattern) {
                if let Some((amount, basis)) = amount_of(ctx, &caps) {
                    push_amount(&mut found, &caps, amount, basis, |a| {
                        Contribution::Hard(HardConstraint::PriceMax(a))
                    });
                    return found.into_option();
                }
            }
        }
        None
    }
}

/// Amounts without mandatory phrasing: "under $1.2M", "$850,000".
pub struct BudgetAnchorRule;

impl IIntentRule for BudgetAnchorRule {
    fn name(&self) -> &'static str {
        "budget_anchor"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        for (pattern, explicit_only) in [
            (&RE_ANCHOR_PHRASE, false),
            (&RE_ANCHOR_WEAK, true),
            (&RE_ANCHOR_DOLLAR, false),
        ] {
            for caps in ctx.unclaimed(pattern) {
                let explicit = caps.get(1).is_some_and(|m| is_explicit_currency(m.as_str()));
                if explicit_only && !explicit {
                    continue;
                }
                if let Some((amount, basis)) = amount_of(ctx, &caps) {
                    push_amount(&mut found, &caps, amount, basis, Contribution::BudgetAnchor);
                    return found.into_option();
                }
            }
        }
        None
    }
}

/// "cannot exceed budget": the stated budget becomes a hard cap.
pub struct BudgetPromotionRule;

impl IIntentRule for BudgetPromotionRule {
    fn name(&self) -> &'static str {
        "budget_promotion"
    }

    fn apply(&self, ctx: &RuleContext<'_>, intent: &SearchIntent) -> Option<RuleMatch> {
        intent.anchors.budget?;
        let caps = ctx.unclaimed(&RE_PROMOTE).into_iter().next()?;
        let mut found = RuleMatch::default();
        found.push(
            Contribution::PromoteBudget,
            caps.get(0).map_or(0..0, |m| m.range()),
        );
        found.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &dyn IIntentRule, text: &str, intent: &SearchIntent) -> Option<RuleMatch> {
        let ctx = RuleContext::new(text, text, &[]);
        rule.apply(&ctx, intent)
    }

    #[test]
    fn cap_phrasing_yields_price_max() {
        let intent = SearchIntent::empty("");
        for text in [
            "cannot exceed $1m",
            "price must be under 900k",
            "no more than $750,000",
            "hard cap of 1.5 million",
        ] {
            let found = run(&HardPriceCapRule, text, &intent).unwrap();
            assert!(
                matches!(found.contributions[0], Contribution::Hard(HardConstraint::PriceMax(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn no_more_than_rooms_is_not_a_cap() {
        let intent = SearchIntent::empty("");
        assert!(run(&HardPriceCapRule, "no more than 3 bedrooms", &intent).is_none());
    }

    #[test]
    fn bare_dollar_amount_is_anchor() {
        let intent = SearchIntent::empty("");
        let found = run(&BudgetAnchorRule, "condo $850,000 soma", &intent).unwrap();
        assert_eq!(found.contributions, vec![Contribution::BudgetAnchor(850_000.0)]);
    }

    #[test]
    fn monthly_amount_sets_basis() {
        let intent = SearchIntent::empty("");
        let found = run(&BudgetAnchorRule, "under $3,500 per month", &intent).unwrap();
        assert_eq!(
            found.contributions,
            vec![
                Contribution::BudgetAnchor(3_500.0),
                Contribution::PriceBasis(PriceBasis::Monthly)
            ]
        );
    }

    #[test]
    fn floor_area_is_not_a_budget() {
        let intent = SearchIntent::empty("");
        assert!(run(&BudgetAnchorRule, "house in sf around 1500 sq ft", &intent).is_none());
        assert!(run(&HardPriceCapRule, "no more than 2000 square feet", &intent).is_none());
    }

    #[test]
    fn street_numbers_are_not_budgets() {
        let intent = SearchIntent::empty("");
        assert!(run(&BudgetAnchorRule, "condo at 1500 broadway", &intent).is_none());
        assert!(run(&BudgetAnchorRule, "flat near 2200 market st", &intent).is_none());
    }

    #[test]
    fn weak_prepositions_need_explicit_money() {
        let intent = SearchIntent::empty("");
        assert!(run(&BudgetAnchorRule, "something for 2000 people", &intent).is_none());
        let found = run(&BudgetAnchorRule, "condo for 900k", &intent).unwrap();
        assert_eq!(found.contributions, vec![Contribution::BudgetAnchor(900_000.0)]);
        let found = run(&BudgetAnchorRule, "studio at $2,400 a month", &intent).unwrap();
        assert_eq!(
            found.contributions,
            vec![
                Contribution::BudgetAnchor(2_400.0),
                Contribution::PriceBasis(PriceBasis::Monthly)
            ]
        );
    }

    #[test]
    fn promotion_needs_an_anchor() {
        let mut intent = SearchIntent::empty("");
        assert!(run(&BudgetPromotionRule, "cannot exceed budget", &intent).is_none());
        intent.set_budget_anchor(1_000_000.0);
        let found = run(&BudgetPromotionRule, "cannot exceed my budget", &intent).unwrap();
        assert_eq!(found.contributions, vec![Contribution::PromoteBudget]);
    }
}
