//! Static gazetteer: cities with centroids, states, and San Francisco
//! neighborhoods with their common aliases.

use std::ops::Range;
use std::sync::LazyLock;

use haven_core::models::GeoPoint;
use regex::Regex;

/// A city the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityEntry {
    /// Canonical lower-case name stored in the `City` constraint.
    pub name: &'static str,
    /// Two-letter state code, lower-case.
    pub state: &'static str,
    pub centroid: GeoPoint,
}

/// A recognized city mention and where it sits in the normalized text.
#[derive(Debug, Clone, PartialEq)]
pub struct CityMatch {
    pub entry: CityEntry,
    pub span: Range<usize>,
}

const fn city(name: &'static str, state: &'static str, lat: f64, lon: f64) -> CityEntry {
    CityEntry {
        name,
        state,
        centroid: GeoPoint::new(lat, lon),
    }
}

pub const CITIES: &[CityEntry] = &[
    city("san francisco", "ca", 37.7749, -122.4194),
    city("oakland", "ca", 37.8044, -122.2712),
    city("berkeley", "ca", 37.8715, -122.2730),
    city("daly city", "ca", 37.6879, -122.4702),
    city("san jose", "ca", 37.3382, -121.8863),
    city("los angeles", "ca", 34.0522, -118.2437),
    city("san diego", "ca", 32.7157, -117.1611),
    city("seattle", "wa", 47.6062, -122.3321),
    city("portland", "or", 45.5152, -122.6784),
    city("las vegas", "nv", 36.1699, -115.1398),
    city("phoenix", "az", 33.4484, -112.0740),
    city("denver", "co", 39.7392, -104.9903),
    city("austin", "tx", 30.2672, -97.7431),
    city("dallas", "tx", 32.7767, -96.7970),
    city("houston", "tx", 29.7604, -95.3698),
    city("chicago", "il", 41.8781, -87.6298),
    city("atlanta", "ga", 33.7490, -84.3880),
    city("miami", "fl", 25.7617, -80.1918),
    city("washington dc", "dc", 38.9072, -77.0369),
    city("philadelphia", "pa", 39.9526, -75.1652),
    city("new york", "ny", 40.7128, -74.0060),
    city("boston", "ma", 42.3601, -71.0589),
];

/// Lower-case aliases that are safe to match anywhere in normalized text.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("sf", "san francisco"),
    ("san fran", "san francisco"),
    ("the city by the bay", "san francisco"),
    ("nyc", "new york"),
    ("new york city", "new york"),
    ("manhattan", "new york"),
    ("washington, dc", "washington dc"),
    ("philly", "philadelphia"),
    ("vegas", "las vegas"),
];

/// Aliases that collide with ordinary words once lower-cased; they only
/// count in their upper-case form in the raw query.
const CASED_CITY_ALIASES: &[(&str, &str)] = &[("LA", "los angeles"), ("DC", "washington dc")];

/// (full name, two-letter code)
pub const STATES: &[(&str, &str)] = &[
    ("california", "ca"),
    ("washington state", "wa"),
    ("washington", "wa"),
    ("oregon", "or"),
    ("nevada", "nv"),
    ("arizona", "az"),
    ("colorado", "co"),
    ("texas", "tx"),
    ("illinois", "il"),
    ("georgia", "ga"),
    ("florida", "fl"),
    ("pennsylvania", "pa"),
    ("new york state", "ny"),
    ("massachusetts", "ma"),
    ("virginia", "va"),
];

/// (mention, canonical neighborhood)
const NEIGHBORHOODS: &[(&str, &str)] = &[
    ("mission district", "mission"),
    ("mission dolores", "mission dolores"),
    ("mission bay", "mission bay"),
    ("mission", "mission"),
    ("soma", "south of market"),
    ("south of market", "south of market"),
    ("south beach", "south beach"),
    ("civic center", "civic center"),
    ("union square", "union square"),
    ("tenderloin", "tenderloin"),
    ("yerba buena", "yerba buena"),
    ("financial district", "financial district"),
    ("fidi", "financial district"),
    ("chinatown", "chinatown"),
    ("nob hill", "nob hill"),
    ("north beach", "north beach"),
    ("russian hill", "russian hill"),
    ("telegraph hill", "telegraph hill"),
    ("marina district", "marina"),
    ("marina", "marina"),
    ("pacific heights", "pacific heights"),
    ("pac heights", "pacific heights"),
    ("cow hollow", "cow hollow"),
    ("presidio heights", "presidio heights"),
    ("presidio", "presidio"),
    ("alamo square", "alamo square"),
    ("fillmore district", "fillmore"),
    ("fillmore", "fillmore"),
    ("japantown", "japantown"),
    ("western addition", "western addition"),
    ("hayes valley", "hayes valley"),
    ("haight-ashbury", "haight-ashbury"),
    ("haight ashbury", "haight-ashbury"),
    ("haight", "haight-ashbury"),
    ("castro", "castro"),
    ("duboce triangle", "duboce triangle"),
    ("noe valley", "noe valley"),
    ("potrero hill", "potrero hill"),
    ("dogpatch", "dogpatch"),
    ("bernal heights", "bernal heights"),
    ("glen park", "glen park"),
    ("twin peaks", "twin peaks"),
    ("forest hill", "forest hill"),
    ("st. francis wood", "st. francis wood"),
    ("west portal", "west portal"),
    ("inner richmond", "richmond"),
    ("outer richmond", "richmond"),
    ("richmond district", "richmond"),
    ("sea cliff", "sea cliff"),
    ("laurel heights", "laurel heights"),
    ("inner sunset", "sunset"),
    ("outer sunset", "sunset"),
    ("sunset district", "sunset"),
    ("parkside", "parkside"),
    ("bayview-hunters point", "bayview-hunters point"),
    ("bayview", "bayview-hunters point"),
    ("hunters point", "bayview-hunters point"),
    ("excelsior", "excelsior"),
    ("visitacion valley", "visitacion valley"),
];

/// Alternation over `names`, longest first so multi-word names win.
fn alternation<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut names: Vec<&str> = names.collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|")
}

static RE_CITY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let names = CITIES
        .iter()
        .map(|c| c.name)
        .chain(CITY_ALIASES.iter().map(|(alias, _)| *alias));
    Regex::new(&format!(r"\b({})\b", alternation(names))).ok()
});

static RE_CASED_CITY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let names = CASED_CITY_ALIASES.iter().map(|(alias, _)| *alias);
    Regex::new(&format!(r"\b({})\b", alternation(names))).ok()
});

static RE_STATE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let names = STATES.iter().map(|(name, _)| *name);
    Regex::new(&format!(r"\b({})\b", alternation(names))).ok()
});

// Two-letter codes are only trusted upper-case, or right after a comma.
static RE_STATE_CODE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let codes = STATES.iter().map(|(_, code)| code.to_uppercase()).collect::<Vec<_>>();
    Regex::new(&format!(r"\b({})\b", codes.join("|"))).ok()
});

/// Codes that are also everyday words; only trusted when written upper-case.
const WORD_LIKE_CODES: &[&str] = &["al", "de", "hi", "id", "in", "me", "oh", "ok", "or", "pa"];

static RE_STATE_CODE_AFTER_COMMA: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let codes = STATES
        .iter()
        .map(|(_, code)| *code)
        .filter(|code| !WORD_LIKE_CODES.contains(code))
        .collect::<Vec<_>>();
    Regex::new(&format!(r",\s*({})\b", codes.join("|"))).ok()
});

static RE_NEIGHBORHOOD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let names = NEIGHBORHOODS.iter().map(|(mention, _)| *mention);
    Regex::new(&format!(r"\b({})\b", alternation(names))).ok()
});

pub fn lookup_city(name: &str) -> Option<CityEntry> {
    let name = name.trim().to_lowercase();
    let canonical = CITY_ALIASES
        .iter()
        .chain(CASED_CITY_ALIASES.iter())
        .find(|(alias, _)| alias.eq_ignore_ascii_case(&name))
        .map_or(name.as_str(), |(_, canonical)| *canonical);
    CITIES.iter().copied().find(|c| c.name == canonical)
}

/// First city mention, searching the normalized text and then upper-case
/// aliases in the raw query. Raw-query matches carry an empty span.
pub fn find_city(text: &str, raw: &str) -> Option<CityMatch> {
    if let Some(caps) = RE_CITY.as_ref().and_then(|re| re.captures(text)) {
        let m = caps.get(1)?;
        let entry = lookup_city(m.as_str())?;
        return Some(CityMatch {
            entry,
            span: m.range(),
        });
    }
    let caps = RE_CASED_CITY.as_ref()?.captures(raw)?;
    let entry = lookup_city(caps.get(1)?.as_str())?;
    Some(CityMatch { entry, span: 0..0 })
}

/// First state mention outside `skip`, as a lower-case two-letter code.
pub fn find_state(text: &str, raw: &str, skip: &Range<usize>) -> Option<(String, Range<usize>)> {
    let outside = |r: &Range<usize>| r.end <= skip.start || r.start >= skip.end;

    if let Some(re) = RE_STATE.as_ref() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if !outside(&m.range()) {
                continue;
            }
            if let Some((_, code)) = STATES.iter().find(|(name, _)| *name == m.as_str()) {
                return Some((code.to_string(), m.range()));
            }
        }
    }
    if let Some(re) = RE_STATE_CODE_AFTER_COMMA.as_ref() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if outside(&m.range()) {
                return Some((m.as_str().to_string(), m.range()));
            }
        }
    }
    let caps = RE_STATE_CODE.as_ref()?.captures(raw)?;
    Some((caps.get(1)?.as_str().to_lowercase(), 0..0))
}

/// Every neighborhood mention, canonicalized, with its span.
pub fn find_neighborhoods(text: &str) -> Vec<(&'static str, Range<usize>)> {
    let Some(re) = RE_NEIGHBORHOOD.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| {
            let m = caps.get(1)?;
            let canonical = NEIGHBORHOODS
                .iter()
                .find(|(mention, _)| *mention == m.as_str())
                .map(|(_, canonical)| *canonical)?;
            Some((canonical, m.range()))
        })
        .collect()
}

/// Neighborhood ids use `_` or `-` where mentions use spaces.
pub fn same_neighborhood(id: &str, name: &str) -> bool {
    let fold = |s: &str| s.to_lowercase().replace(['_', '-'], " ");
    fold(id) == fold(name)
}
