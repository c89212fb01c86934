//! Currency amount parsing: `$1.2M`, `1.2 million`, `900k`, `$850,000`.

/// Regex fragment matching an amount token. Callers validate the capture
/// with [`parse_amount`], which rejects plain small numbers.
#[macro_export]
macro_rules! amount_fragment {
    () => {
        r"(\$?\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|thousand)|mm|k|m)?)\b"
    };
}

/// Parse an amount token into dollars.
///
/// A token counts as currency when it carries a `$`, a magnitude suffix,
/// or a value of at least 1000. Anything else returns `None`, so "under 3"
/// is never read as a price.
pub fn parse_amount(token: &str) -> Option<f64> {
    let token = token.trim();
    let has_dollar = token.contains('$');
    let body: String = token
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    let (number, multiplier) = if let Some(n) = body.strip_suffix("million") {
        (n, 1_000_000.0)
    } else if let Some(n) = body.strip_suffix("thousand") {
        (n, 1_000.0)
    } else if let Some(n) = body.strip_suffix("mm") {
        (n, 1_000_000.0)
    } else if let Some(n) = body.strip_suffix('k') {
        (n, 1_000.0)
    } else if let Some(n) = body.strip_suffix('m') {
        (n, 1_000_000.0)
    } else {
        (body.as_str(), 1.0)
    };

    let value = (number.parse::<f64>().ok()? * multiplier).round();
    let has_suffix = multiplier > 1.0;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    if has_dollar || has_suffix || value >= 1_000.0 {
        Some(value)
    } else {
        None
    }
}

/// Whether the token carries a `$` or a magnitude suffix, as opposed to a
/// bare number that may be an area or a street number.
pub fn is_explicit_currency(token: &str) -> bool {
    let token = token.trim();
    token.contains('$')
        || ["million", "thousand", "mm", "k", "m"]
            .iter()
            .any(|suffix| token.ends_with(suffix))
}

/// Units that make a number a floor area.
const AREA_UNITS: &[&str] = &[
    "sq ft", "sq. ft", "sqft", "sq.ft", "sq feet", "square feet", "square foot", "sf",
];

/// Words that make a bare number part of a street address.
const STREET_WORDS: &[&str] = &[
    "street", "st", "st.", "avenue", "ave", "ave.", "boulevard", "blvd", "road", "rd", "drive",
    "dr", "lane", "ln", "way", "court", "ct", "place", "pl", "terrace", "broadway", "highway",
    "hwy", "parkway", "pkwy",
];

/// Whether the text after a bare number shows it is not a price: a floor
/// area ("1500 sq ft") or an address ("1500 broadway", "1500 market st").
pub fn is_area_or_address(token: &str, after: &str) -> bool {
    if is_explicit_currency(token) {
        return false;
    }
    let after = after.trim_start();
    let area = AREA_UNITS.iter().any(|unit| {
        after
            .strip_prefix(unit)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
    });
    area || after
        .split_whitespace()
        .take(3)
        .any(|word| STREET_WORDS.contains(&word.trim_end_matches(',')))
}

/// Whether the text right after an amount marks it as a monthly rent.
pub fn is_monthly_suffix(after: &str) -> bool {
    let after = after.trim_start();
    ["/mo", "/ mo", "per month", "a month", "monthly", "pcm", "/month", "/ month"]
        .iter()
        .any(|suffix| after.starts_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixes() {
        assert_eq!(parse_amount("$1.2m"), Some(1_200_000.0));
        assert_eq!(parse_amount("1.2 million"), Some(1_200_000.0));
        assert_eq!(parse_amount("900k"), Some(900_000.0));
        assert_eq!(parse_amount("$850,000"), Some(850_000.0));
        assert_eq!(parse_amount("900 thousand"), Some(900_000.0));
        assert_eq!(parse_amount("2mm"), Some(2_000_000.0));
    }

    #[test]
    fn small_bare_numbers_are_not_currency() {
        assert_eq!(parse_amount("3"), None);
        assert_eq!(parse_amount("250"), None);
        assert_eq!(parse_amount("$250"), Some(250.0));
        assert_eq!(parse_amount("2500"), Some(2500.0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("$0"), None);
        assert_eq!(parse_amount("1.2.3m"), None);
    }

    #[test]
    fn area_and_address_numbers_are_not_prices() {
        assert!(is_area_or_address("1500", " sq ft in the mission"));
        assert!(is_area_or_address("1,500", " square feet"));
        assert!(is_area_or_address("2000", "sf, quiet"));
        assert!(is_area_or_address("1500", " broadway"));
        assert!(is_area_or_address("1500", " market st, sf"));
        assert!(!is_area_or_address("1500", " per month"));
        assert!(!is_area_or_address("1500", " sfo shuttle"));
        // "$900k sf condo": sf is the city alias, the amount is money.
        assert!(!is_area_or_address("$900k", " sf condo"));
        assert!(!is_area_or_address("900k", " near market st"));
    }

    #[test]
    fn explicit_currency_markers() {
        assert!(is_explicit_currency("$1500"));
        assert!(is_explicit_currency("900k"));
        assert!(is_explicit_currency("1.2 million"));
        assert!(!is_explicit_currency("1500"));
    }

    #[test]
    fn monthly_suffixes() {
        assert!(is_monthly_suffix(" per month in soma"));
        assert!(is_monthly_suffix("/mo"));
        assert!(!is_monthly_suffix(" with garage"));
    }
}
