use haven_core::constants::PARKING_TAGS;
use haven_core::models::{format_money, HardConstraint, PriceBasis, SearchIntent};

pub const NO_REQUIREMENTS: &str = "No specific requirements specified";

/// Two bullet lists: hard constraints as "must have", anchors and soft
/// preferences as "nice to have".
pub fn requirements_summary(intent: &SearchIntent) -> String {
    let (must_have, nice_to_have) = requirement_lines(intent);
    if must_have.is_empty() && nice_to_have.is_empty() {
        return NO_REQUIREMENTS.to_string();
    }

    let mut out = String::from("Here is what you are looking for:\n");
    if !must_have.is_empty() {
        out.push_str("must have:\n");
        for line in &must_have {
            out.push_str(&format!("• {line}\n"));
        }
    }
    if !nice_to_have.is_empty() {
        if !must_have.is_empty() {
            out.push('\n');
        }
        out.push_str("nice to have:\n");
        for line in &nice_to_have {
            out.push_str(&format!("• {line}\n"));
        }
    }
    out.trim_end().to_string()
}

/// The individual lines, split into (must have, nice to have).
pub fn requirement_lines(intent: &SearchIntent) -> (Vec<String>, Vec<String>) {
    let per_month = match intent.price_basis {
        PriceBasis::Monthly => "/month",
        PriceBasis::Total => "",
    };

    let must_have = intent
        .hard_constraints
        .iter()
        .map(|c| match c {
            HardConstraint::City(city) => format!("in {}", title_case(city)),
            HardConstraint::State(state) => format!("in {state}"),
            HardConstraint::PriceMax(cap) => format!("under {}{per_month}", format_money(*cap)),
            HardConstraint::MinBeds(n) => format!("at least {n} bedroom(s)"),
            HardConstraint::MinBaths(n) => format!("at least {n} bathroom(s)"),
            HardConstraint::RequiredTag(tag) if PARKING_TAGS.contains(&tag.as_str()) => {
                "with parking/garage".to_string()
            }
            HardConstraint::RequiredTag(tag) => format!("with {}", tag.replace('_', " ")),
            HardConstraint::ExcludedTag(tag) => format!("no {}", tag.replace('_', " ")),
        })
        .collect();

    let mut nice_to_have = Vec::new();
    if let Some(budget) = intent.anchors.budget {
        nice_to_have.push(format!("ideally under {}{per_month}", format_money(budget)));
    }
    if let Some(beds) = intent.anchors.beds {
        nice_to_have.push(format!("around {beds} bedroom(s)"));
    }
    if let Some(baths) = intent.anchors.baths {
        nice_to_have.push(format!("around {baths} bathroom(s)"));
    }
    if let Some(sqft) = intent.anchors.min_sqft {
        nice_to_have.push(format!("at least {sqft} sq ft"));
    }
    if intent.anchors.parking {
        nice_to_have.push("parking/garage".to_string());
    }
    nice_to_have.extend(intent.soft_preferences.iter().map(|p| p.kind.label()));

    (must_have, nice_to_have)
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::models::{SoftPreference, SoftPreferenceKind};

    #[test]
    fn empty_intent_has_fallback() {
        assert_eq!(requirements_summary(&SearchIntent::empty("cozy")), NO_REQUIREMENTS);
    }

    #[test]
    fn splits_must_from_nice() {
        let mut intent = SearchIntent::empty("q");
        intent.add_hard(HardConstraint::City("san francisco".into()));
        intent.add_hard(HardConstraint::RequiredTag("garage".into()));
        intent.set_budget_anchor(900_000.0);
        intent.add_soft(SoftPreference::new(SoftPreferenceKind::GoodSchools, 0.08));

        let text = requirements_summary(&intent);
        assert_eq!(
            text,
            "Here is what you are looking for:\n\
             must have:\n\
             • in San Francisco\n\
             • with parking/garage\n\
             \n\
             nice to have:\n\
             • ideally under $900,000\n\
             • good schools nearby"
        );
    }

    #[test]
    fn monthly_amounts_are_marked() {
        let mut intent = SearchIntent::empty("q");
        intent.add_hard(HardConstraint::PriceMax(3_500.0));
        intent.price_basis = PriceBasis::Monthly;
        let (must, _) = requirement_lines(&intent);
        assert_eq!(must, vec!["under $3,500/month"]);
    }

    #[test]
    fn floor_area_is_listed() {
        let mut intent = SearchIntent::empty("q");
        intent.set_min_sqft_anchor(1_500);
        let (_, nice) = requirement_lines(&intent);
        assert_eq!(nice, vec!["at least 1500 sq ft"]);
    }
}
