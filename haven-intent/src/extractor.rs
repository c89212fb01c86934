//! Intent extraction: normalize once, run the ordered rules, and fold their
//! contributions into a [`SearchIntent`].

use std::ops::Range;

use haven_core::models::{HardConstraint, SearchIntent};
use tracing::debug;

use crate::normalize::normalize;
use crate::rules::{default_rules, Contribution, IIntentRule, RuleContext};

/// Rule-ordered extractor. Cheap to share; holds no per-query state.
pub struct IntentExtractor {
    rules: Vec<Box<dyn IIntentRule>>,
}

impl Default for IntentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentExtractor {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Extractor with a custom rule order.
    pub fn with_rules(rules: Vec<Box<dyn IIntentRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Extract a structured intent. Never fails; an unrecognizable query
    /// yields an intent with empty constraint sets.
    pub fn extract(&self, query: &str) -> SearchIntent {
        let text = normalize(query);
        let mut intent = SearchIntent::empty(query);
        let mut claimed: Vec<Range<usize>> = Vec::new();

        for rule in &self.rules {
            let ctx = RuleContext::new(query, &text, &claimed);
            let Some(found) = rule.apply(&ctx, &intent) else {
                continue;
            };
            debug!(
                rule = rule.name(),
                contributions = found.contributions.len(),
                "intent rule matched"
            );
            for contribution in found.contributions {
                apply(&mut intent, contribution);
            }
            claimed.extend(found.spans);
        }

        debug!(
            hard = intent.hard_constraints.len(),
            soft = intent.soft_preferences.len(),
            anchors = intent.anchors.count(),
            "intent extracted"
        );
        intent
    }
}

fn apply(intent: &mut SearchIntent, contribution: Contribution) {
    match contribution {
        Contribution::Hard(constraint) => {
            intent.add_hard(constraint);
        }
        Contribution::Soft(preference) => {
            intent.add_soft(preference);
        }
        Contribution::BudgetAnchor(amount) => intent.set_budget_anchor(amount),
        Contribution::BedsAnchor(beds) => intent.set_beds_anchor(beds),
        Contribution::BathsAnchor(baths) => intent.set_baths_anchor(baths),
        Contribution::ParkingAnchor => intent.set_parking_anchor(),
        Contribution::SqftAnchor(sqft) => intent.set_min_sqft_anchor(sqft),
        Contribution::PromoteBudget => {
            if let Some(budget) = intent.anchors.budget {
                intent.add_hard(HardConstraint::PriceMax(budget));
            }
        }
        Contribution::TargetPoint(point) => {
            intent.target_point.get_or_insert(point);
        }
        Contribution::PriceBasis(basis) => intent.price_basis = basis,
    }
}
