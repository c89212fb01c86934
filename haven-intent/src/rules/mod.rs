//! Ordered intent rules.
//!
//! Each rule inspects the normalized query and either declines or returns
//! the contributions it recognized plus the text spans it consumed. Later
//! rules never see claimed spans, so "walk to metro" claimed by the transit
//! rule cannot be re-read as plain walkability.

use std::ops::Range;

use haven_core::models::{GeoPoint, HardConstraint, PriceBasis, SearchIntent, SoftPreference};
use regex::{Captures, Regex};

macro_rules! intent_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: std::sync::LazyLock<Option<regex::Regex>> =
            std::sync::LazyLock::new(|| regex::Regex::new($regex_str).ok());
    };
}

pub mod area;
pub mod features;
pub mod location;
pub mod negation;
pub mod price;
pub mod rooms;

pub use area::FloorAreaRule;
pub use features::{PropertyTypeRule, RequiredFeatureRule, SoftPreferenceRule};
pub use location::{LocationRule, NeighborhoodRule, UnknownCityRule};
pub use negation::NegationRule;
pub use price::{BudgetAnchorRule, BudgetPromotionRule, HardPriceCapRule};
pub use rooms::RoomCountRule;

/// One structured fact recognized by a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution {
    Hard(HardConstraint),
    Soft(SoftPreference),
    BudgetAnchor(f64),
    BedsAnchor(u32),
    BathsAnchor(u32),
    ParkingAnchor,
    SqftAnchor(u32),
    /// "cannot exceed budget": turn the stated budget anchor into a cap.
    PromoteBudget,
    TargetPoint(GeoPoint),
    PriceBasis(PriceBasis),
}

/// What a rule recognized and which spans of the normalized text it used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMatch {
    pub contributions: Vec<Contribution>,
    pub spans: Vec<Range<usize>>,
}

impl RuleMatch {
    pub fn push(&mut self, contribution: Contribution, span: Range<usize>) {
        self.contributions.push(contribution);
        if !span.is_empty() {
            self.spans.push(span);
        }
    }

    /// `None` when nothing was recognized.
    pub fn into_option(self) -> Option<Self> {
        (!self.contributions.is_empty()).then_some(self)
    }
}

/// Query text handed to every rule, with the spans earlier rules claimed.
pub struct RuleContext<'a> {
    /// The query as typed.
    pub raw: &'a str,
    /// Lower-cased, whitespace-collapsed query.
    pub text: &'a str,
    claimed: &'a [Range<usize>],
}

impl<'a> RuleContext<'a> {
    pub fn new(raw: &'a str, text: &'a str, claimed: &'a [Range<usize>]) -> Self {
        Self { raw, text, claimed }
    }

    pub fn is_claimed(&self, span: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .any(|c| span.start < c.end && c.start < span.end)
    }

    /// Matches of `pattern` that do not overlap a claimed span. A pattern
    /// that failed to compile yields nothing.
    pub fn unclaimed(&self, pattern: &Option<Regex>) -> Vec<Captures<'a>> {
        let Some(re) = pattern.as_ref() else {
            return Vec::new();
        };
        re.captures_iter(self.text)
            .filter(|caps| caps.get(0).is_some_and(|m| !self.is_claimed(&m.range())))
            .collect()
    }
}

/// A single extraction rule. Rules are pure: they read the context and
/// the intent built so far, and never mutate either.
pub trait IIntentRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: &RuleContext<'_>, intent: &SearchIntent) -> Option<RuleMatch>;
}

/// The fixed evaluation order. Specific multi-word phrasings run before
/// the single-word fallbacks that would otherwise misread them, and the
/// unknown-city fallback only sees words nothing else claimed.
pub fn default_rules() -> Vec<Box<dyn IIntentRule>> {
    vec![
        Box::new(HardPriceCapRule),
        Box::new(BudgetAnchorRule),
        Box::new(BudgetPromotionRule),
        Box::new(FloorAreaRule),
        Box::new(NegationRule),
        Box::new(LocationRule),
        Box::new(NeighborhoodRule),
        Box::new(RoomCountRule),
        Box::new(RequiredFeatureRule),
        Box::new(PropertyTypeRule),
        Box::new(SoftPreferenceRule),
        Box::new(UnknownCityRule),
    ]
}
