//! Feature, property-type and amenity rules.

use std::ops::Range;
use std::sync::LazyLock;

use haven_core::models::{
    Facing, HardConstraint, SearchIntent, SoftPreference, SoftPreferenceKind,
};
use regex::Regex;

use super::{Contribution, IIntentRule, RuleContext, RuleMatch};

/// Singular, tag-shaped form of a property type or feature mention.
pub fn canonical_tag(mention: &str) -> String {
    let mention = mention.trim();
    let tag = match mention {
        m if m.starts_with("single") => "house",
        "condominium" | "condominiums" | "condos" => "condo",
        "townhome" | "townhomes" | "townhouses" => "townhouse",
        "apartments" => "apartment",
        "houses" => "house",
        "lofts" => "loft",
        "studios" => "studio",
        "duplexes" => "duplex",
        "carpeting" => "carpet",
        "parking" | "parking space" | "parking spot" | "car space" => "parking_available",
        "backyard" | "back yard" | "garden" => "yard",
        "swimming pool" => "pool",
        "in-unit laundry" | "in unit laundry" | "washer and dryer" | "washer/dryer" => "laundry",
        other => return other.replace([' ', '-'], "_"),
    };
    tag.to_string()
}

// ── Mandatory phrasing ─────────────────────────────────────────────────────
intent_pattern!(
    RE_REQUIRED_FEATURE,
    r"\b(?:must have|must include|must come with|has to have|have to have|needs?|requires?|required|with|w/|including|that has|which has)\s+(?:an?\s+|the\s+|some\s+|private\s+|a private\s+)?(garage|parking space|parking spot|parking|car space|back ?yard|yard|garden|swimming pool|pool|balcony|elevator|fireplace|in[- ]unit laundry|washer(?: and |/)dryer|laundry|air conditioning|gym|storage)\b"
);
intent_pattern!(
    RE_REQUIRED_TYPE,
    r"\b(?:must be|has to be|needs to be|only)\s+(?:an?\s+)?(single[- ]family homes?|single[- ]family|houses?|condos?|apartments?|townhouses?|lofts?|duplexes?)\b"
);

// ── Property types ─────────────────────────────────────────────────────────
intent_pattern!(
    RE_PROPERTY_TYPE,
    r"\b(single[- ]family homes?|single[- ]family houses?|single[- ]family|townhouses?|townhomes?|condominiums?|condos?|apartments?|houses?|lofts?|studios?|duplexes?)\b"
);

/// "with garage", "must have a yard", "must be a house": required tags.
pub struct RequiredFeatureRule;

impl IIntentRule for RequiredFeatureRule {
    fn name(&self) -> &'static str {
        "required_feature"
    }

    fn apply(&self, ctx: &RuleContext<'_>, intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        for pattern in [&RE_REQUIRED_FEATURE, &RE_REQUIRED_TYPE] {
            for caps in ctx.unclaimed(pattern) {
                let (Some(whole), Some(thing)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let tag = canonical_tag(thing.as_str());
                if intent.excluded_tags().any(|t| t == tag) {
                    continue;
                }
                found.push(Contribution::Hard(HardConstraint::RequiredTag(tag)), whole.range());
            }
        }
        found.into_option()
    }
}

/// Property type weight.
const PROPERTY_TYPE_WEIGHT: f64 = 0.05;

/// Unqualified property types ("house", "condos") as a soft preference.
pub struct PropertyTypeRule;

impl IIntentRule for PropertyTypeRule {
    fn name(&self) -> &'static str {
        "property_type"
    }

    fn apply(&self, ctx: &RuleContext<'_>, intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        for caps in ctx.unclaimed(&RE_PROPERTY_TYPE) {
            let Some(m) = caps.get(1) else { continue };
            let kind = canonical_tag(m.as_str());
            let stated_hard = intent
                .required_tags()
                .chain(intent.excluded_tags())
                .any(|t| t == kind);
            if stated_hard {
                continue;
            }
            found.push(
                Contribution::Soft(SoftPreference::new(
                    SoftPreferenceKind::PropertyType(kind),
                    PROPERTY_TYPE_WEIGHT,
                )),
                m.range(),
            );
        }
        found.into_option()
    }
}

// ── Soft preferences, most specific first ──────────────────────────────────
intent_pattern!(
    RE_NEAR_TRANSIT,
    r"\b(?:walk(?:ing)?(?: distance)? to (?:the |a )?(?:metro|subway|train|transit|bart|station|muni)|(?:near|close to|next to|by) (?:the |a )?(?:metro|subway|bart|transit|train|station|muni|public transport(?:ation)?)|(?:bart|metro|subway|train|muni) stations?|public transit|transit access)\b"
);
intent_pattern!(
    RE_GOOD_SCHOOLS,
    r"\b(?:(?:good|great|excellent|top|top[- ]rated|high(?:ly)?[- ]rated|best)\s+(?:schools?|school district)|school district)\b"
);
intent_pattern!(
    RE_SAFE_AREA,
    r"\b(?:(?:safe|secure)\s+(?:areas?|neighbou?rhoods?|communit(?:y|ies)|streets?)|(?:low|little|no)\s+crime|safe|family[- ]friendly)\b"
);
intent_pattern!(
    RE_NEAR_GROCERY,
    r"\b(?:(?:near|close to|walking distance to|walk to)\s+(?:a\s+|the\s+)?(?:grocery|groceries|grocery stores?|supermarkets?)|grocery stores?|supermarkets?)\b"
);
intent_pattern!(
    RE_WALKABLE,
    r"\b(?:walkable|walk(?:ing)?\s+(?:distance|to|from)|(?:near|close to)\s+(?:restaurants?|cafes?|shops?|stores?)|pedestrian[- ]friendly)\b"
);
intent_pattern!(
    RE_YARD,
    r"\b(?:back ?yard|front yard|yard|garden|outdoor space|patio)\b"
);
intent_pattern!(RE_FEATURED, r"\b(?:featured|premium|highlighted|exclusive)\b");
intent_pattern!(RE_QUIET, r"\b(?:quiet|peaceful|calm|tranquil)\b");
intent_pattern!(
    RE_PET_FRIENDLY,
    r"\b(?:pet[- ]friendly|pets? allowed|allows? pets?|dog[- ]friendly|cat[- ]friendly|pets? welcome)\b"
);
intent_pattern!(
    RE_OCEAN_VIEW,
    r"\b(?:(?:ocean|sea|water|bay)\s+views?|waterfront)\b"
);
intent_pattern!(
    RE_RENOVATED,
    r"\b(?:newly\s+|recently\s+)?(?:renovated|remodeled|remodelled)\b"
);
intent_pattern!(RE_MODERN, r"\b(?:modern|contemporary|updated)\b");
intent_pattern!(RE_VICTORIAN, r"\bvictorian\b");
intent_pattern!(
    RE_ORIENTATION,
    r"\b(?:(north|south|east|west|northeast|northwest|southeast|southwest)[- ]facing|facing (north|south|east|west|northeast|northwest|southeast|southwest)|(north|south|east|west)ern exposure)\b"
);
intent_pattern!(RE_PARKING_MENTION, r"\b(?:garage|parking|car space)\b");

/// A keyword family and the preference it contributes.
struct PreferencePattern {
    regex: &'static LazyLock<Option<Regex>>,
    kind: fn() -> SoftPreferenceKind,
    weight: f64,
}

static PREFERENCE_PATTERNS: &[PreferencePattern] = &[
    PreferencePattern {
        regex: &RE_NEAR_TRANSIT,
        kind: || SoftPreferenceKind::NearTransit,
        weight: 0.05,
    },
    PreferencePattern {
        regex: &RE_GOOD_SCHOOLS,
        kind: || SoftPreferenceKind::GoodSchools,
        weight: 0.08,
    },
    PreferencePattern {
        regex: &RE_SAFE_AREA,
        kind: || SoftPreferenceKind::SafeArea,
        weight: 0.06,
    },
    PreferencePattern {
        regex: &RE_NEAR_GROCERY,
        kind: || SoftPreferenceKind::NearGrocery,
        weight: 0.05,
    },
    PreferencePattern {
        regex: &RE_WALKABLE,
        kind: || SoftPreferenceKind::Walkable,
        weight: 0.05,
    },
    PreferencePattern {
        regex: &RE_YARD,
        kind: || SoftPreferenceKind::HasYard,
        weight: 0.05,
    },
    PreferencePattern {
        regex: &RE_FEATURED,
        kind: || SoftPreferenceKind::Featured,
        weight: 0.06,
    },
    PreferencePattern {
        regex: &RE_OCEAN_VIEW,
        kind: || SoftPreferenceKind::Style("ocean_view".into()),
        weight: 0.07,
    },
    PreferencePattern {
        regex: &RE_RENOVATED,
        kind: || SoftPreferenceKind::Style("renovated_recent".into()),
        weight: 0.04,
    },
    PreferencePattern {
        regex: &RE_MODERN,
        kind: || SoftPreferenceKind::Style("modern".into()),
        weight: 0.04,
    },
    PreferencePattern {
        regex: &RE_VICTORIAN,
        kind: || SoftPreferenceKind::Style("victorian".into()),
        weight: 0.04,
    },
    PreferencePattern {
        regex: &RE_PET_FRIENDLY,
        kind: || SoftPreferenceKind::PetFriendly,
        weight: 0.04,
    },
    PreferencePattern {
        regex: &RE_QUIET,
        kind: || SoftPreferenceKind::Quiet,
        weight: 0.03,
    },
];

const ORIENTATION_WEIGHT: f64 = 0.03;

fn facing(direction: &str) -> Option<Facing> {
    Some(match direction {
        "north" => Facing::North,
        "northeast" => Facing::NorthEast,
        "east" => Facing::East,
        "southeast" => Facing::SouthEast,
        "south" => Facing::South,
        "southwest" => Facing::SouthWest,
        "west" => Facing::West,
        "northwest" => Facing::NorthWest,
        _ => return None,
    })
}

/// Amenity, style and orientation keywords, plus unqualified parking
/// mentions, which become a parking anchor.
pub struct SoftPreferenceRule;

impl SoftPreferenceRule {
    /// A soft preference whose feature is already required adds nothing.
    fn shadowed(kind: &SoftPreferenceKind, intent: &SearchIntent) -> bool {
        match kind {
            SoftPreferenceKind::HasYard => intent.required_tags().any(|t| t == "yard"),
            _ => false,
        }
    }
}

impl IIntentRule for SoftPreferenceRule {
    fn name(&self) -> &'static str {
        "soft_preference"
    }

    fn apply(&self, ctx: &RuleContext<'_>, intent: &SearchIntent) -> Option<RuleMatch> {
        let mut found = RuleMatch::default();
        // Spans taken by earlier families within this rule.
        let mut taken: Vec<Range<usize>> = Vec::new();

        for pattern in PREFERENCE_PATTERNS {
            let kind = (pattern.kind)();
            if Self::shadowed(&kind, intent) {
                continue;
            }
            let hit = ctx
                .unclaimed(pattern.regex)
                .into_iter()
                .filter_map(|caps| caps.get(0).map(|m| m.range()))
                .find(|span| !taken.iter().any(|t| span.start < t.end && t.start < span.end));
            if let Some(span) = hit {
                taken.push(span.clone());
                found.push(
                    Contribution::Soft(SoftPreference::new(kind, pattern.weight)),
                    span,
                );
            }
        }

        for caps in ctx.unclaimed(&RE_ORIENTATION) {
            let direction = (1..=3).find_map(|i| caps.get(i)).and_then(|m| facing(m.as_str()));
            if let (Some(direction), Some(whole)) = (direction, caps.get(0)) {
                found.push(
                    Contribution::Soft(SoftPreference::new(
                        SoftPreferenceKind::Orientation(direction),
                        ORIENTATION_WEIGHT,
                    )),
                    whole.range(),
                );
                break;
            }
        }

        if !intent.requires_parking() {
            if let Some(m) = ctx
                .unclaimed(&RE_PARKING_MENTION)
                .into_iter()
                .find_map(|caps| caps.get(0))
            {
                found.push(Contribution::ParkingAnchor, m.range());
            }
        }

        found.into_option()
    }
}
