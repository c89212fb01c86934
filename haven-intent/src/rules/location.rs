//! Gazetteer-backed location rules.

use haven_core::models::{HardConstraint, SearchIntent, SoftPreference, SoftPreferenceKind};

use super::{Contribution, IIntentRule, RuleContext, RuleMatch};
use crate::gazetteer;
use crate::normalize::normalize;

/// Neighborhood preference weight.
const NEIGHBORHOOD_WEIGHT: f64 = 0.04;

// Up to three capitalized words after "in", read from the raw query. The
// second letter must be lower-case, so "BART" or "LA" never match here.
// "near" is left out: it mostly names landmarks and districts.
intent_pattern!(
    RE_PLACE_AFTER_PREPOSITION,
    r"\b([Ii]n)\s+([A-Z][a-z][A-Za-z'.-]*(?:\s+[A-Z][a-z][A-Za-z'.-]*){0,2})"
);

/// Capitalized words that mark a landmark, a description or a date, not a town.
const NOT_A_TOWN: &[&str] = &[
    "the", "station", "school", "schools", "university", "college", "campus", "mall",
    "hospital", "airport", "downtown", "center", "centre", "great", "good", "excellent",
    "walking", "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december", "spring", "summer", "fall", "autumn",
    "winter",
];

/// Known city (hard, plus its centroid as the target point) and state.
pub struct LocationRule;

impl IIntentRule for LocationRule {
    fn name(&self) -> &'static str {
        "location"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        let city = gazetteer::find_city(ctx.text, ctx.raw).filter(|m| !ctx.is_claimed(&m.span));
        let skip = city.as_ref().map_or(0..0, |m| m.span.clone());
        if let Some(m) = city {
            found.push(
                Contribution::Hard(HardConstraint::City(m.entry.name.to_string())),
                m.span.clone(),
            );
            found.push(Contribution::TargetPoint(m.entry.centroid), m.span);
        }
        if let Some((code, span)) = gazetteer::find_state(ctx.text, ctx.raw, &skip) {
            if !ctx.is_claimed(&span) {
                found.push(Contribution::Hard(HardConstraint::State(code)), span);
            }
        }
        found.into_option()
    }
}

/// Fallback for places the gazetteer does not know: "in Atlantis" becomes
/// a hard city with no target point, so relaxation cannot widen the area.
/// Runs last, after every other rule had a chance to claim the words.
pub struct UnknownCityRule;

impl IIntentRule for UnknownCityRule {
    fn name(&self) -> &'static str {
        "unknown_city"
    }

    fn apply(&self, ctx: &RuleContext<'_>, intent: &SearchIntent) -> Option<RuleMatch> {
        if intent.city().is_some() {
            return None;
        }
        let re = RE_PLACE_AFTER_PREPOSITION.as_ref()?;
        for caps in re.captures_iter(ctx.raw) {
            let (Some(prep), Some(place)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let name = normalize(place.as_str().trim_end_matches(['.', '\'']));
            if !is_town_like(&name) {
                continue;
            }
            let Some(span) = unclaimed_span(ctx, &normalize(prep.as_str()), &name) else {
                continue;
            };
            let mut found = RuleMatch::default();
            found.push(Contribution::Hard(HardConstraint::City(name)), span);
            return found.into_option();
        }
        None
    }
}

fn is_town_like(name: &str) -> bool {
    !name.is_empty()
        && !name.split(' ').any(|word| NOT_A_TOWN.contains(&word))
        && gazetteer::lookup_city(name).is_none()
        && gazetteer::STATES.iter().all(|(state, _)| *state != name)
        && gazetteer::find_neighborhoods(name).is_empty()
}

/// Span of `name` in the normalized text, right after `prep`, that no
/// earlier rule claimed.
fn unclaimed_span(ctx: &RuleContext<'_>, prep: &str, name: &str) -> Option<std::ops::Range<usize>> {
    let needle = format!("{prep} {name}");
    ctx.text.match_indices(&needle).find_map(|(at, _)| {
        let start = at + prep.len() + 1;
        let span = start..start + name.len();
        let boundary = ctx.text[span.end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_word = ctx.text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        (boundary && after_word && !ctx.is_claimed(&span)).then_some(span)
    })
}

/// San Francisco neighborhood mentions, as a soft preference.
pub struct NeighborhoodRule;

impl IIntentRule for NeighborhoodRule {
    fn name(&self) -> &'static str {
        "neighborhood"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        for (name, span) in gazetteer::find_neighborhoods(ctx.text) {
            if ctx.is_claimed(&span) {
                continue;
            }
            found.push(
                Contribution::Soft(SoftPreference::new(
                    SoftPreferenceKind::Neighborhood(name.to_string()),
                    NEIGHBORHOOD_WEIGHT,
                )),
                span,
            );
        }
        found.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_brings_target_point_and_state() {
        let text = "condo in austin, tx";
        let ctx = RuleContext::new(text, text, &[]);
        let found = LocationRule.apply(&ctx, &SearchIntent::empty(text)).unwrap();
        assert_eq!(
            found.contributions[0],
            Contribution::Hard(HardConstraint::City("austin".into()))
        );
        assert!(matches!(found.contributions[1], Contribution::TargetPoint(_)));
        assert_eq!(
            found.contributions[2],
            Contribution::Hard(HardConstraint::State("tx".into()))
        );
    }

    #[test]
    fn unknown_place_contributes_nothing() {
        let text = "cozy place somewhere nice";
        let ctx = RuleContext::new(text, text, &[]);
        assert!(LocationRule.apply(&ctx, &SearchIntent::empty(text)).is_none());
    }

    fn unknown_city(raw: &str, intent: &SearchIntent) -> Option<RuleMatch> {
        let text = normalize(raw);
        let ctx = RuleContext::new(raw, &text, &[]);
        UnknownCityRule.apply(&ctx, intent)
    }

    #[test]
    fn unknown_capitalized_place_becomes_hard_city() {
        let raw = "3 bedroom house in Atlantis";
        let found = unknown_city(raw, &SearchIntent::empty(raw)).unwrap();
        assert_eq!(
            found.contributions,
            vec![Contribution::Hard(HardConstraint::City("atlantis".into()))]
        );
        assert_eq!(&normalize(raw)[found.spans[0].clone()], "atlantis");
    }

    #[test]
    fn multi_word_unknown_place_keeps_every_word() {
        let raw = "cottage in  Pine Valley, quiet street";
        let found = unknown_city(raw, &SearchIntent::empty(raw)).unwrap();
        assert_eq!(
            found.contributions,
            vec![Contribution::Hard(HardConstraint::City("pine valley".into()))]
        );
    }

    #[test]
    fn landmarks_neighborhoods_and_acronyms_are_not_towns() {
        for raw in [
            "condo in Downtown Oakland",
            "flat in Stanford University housing",
            "condo near Rockridge",
            "flat in Noe Valley",
            "loft near BART",
            "house in Texas",
            "home in Great condition",
            "move in June",
            "cozy place in atlantis",
        ] {
            assert!(unknown_city(raw, &SearchIntent::empty(raw)).is_none(), "{raw}");
        }
    }

    #[test]
    fn known_city_suppresses_fallback() {
        let raw = "condo in Oakland near Lakeshore";
        let mut intent = SearchIntent::empty(raw);
        intent.add_hard(HardConstraint::City("oakland".into()));
        assert!(unknown_city(raw, &intent).is_none());
    }

    #[test]
    fn claimed_words_are_skipped() {
        let raw = "house in Atlantis";
        let text = normalize(raw);
        let claimed = [9..17];
        let ctx = RuleContext::new(raw, &text, &claimed);
        assert!(UnknownCityRule.apply(&ctx, &SearchIntent::empty(raw)).is_none());
    }

    #[test]
    fn neighborhoods_are_soft() {
        let text = "flat in the mission district";
        let ctx = RuleContext::new(text, text, &[]);
        let found = NeighborhoodRule.apply(&ctx, &SearchIntent::empty(text)).unwrap();
        assert_eq!(
            found.contributions,
            vec![Contribution::Soft(SoftPreference::new(
                SoftPreferenceKind::Neighborhood("mission".into()),
                NEIGHBORHOOD_WEIGHT
            ))]
        );
    }
}
