use super::reads_as_amount;
use super::tables::{first_substring_match, Lexicon};
use regex::Regex;
use std::sync::LazyLock;

const ZIP_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;
const KM_TO_MILES: f64 = 0.621371;

/// Larger distances are vehicle mileage rather than a search radius
const MAX_RADIUS_MILES: u32 = 250;

/// Context-qualified postal patterns, most specific first. The bare
/// five-digit fallback is handled separately in [`extract_zip_code`].
static ZIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"within\s+\d+\s*(?:miles?|mi)\s+(?:of|from)\s+(\d{5})\b",
        r"\b(?:near|around|in|at)\s+(\d{5})\b",
        r"\b(?:zip|postal)(?:\s*code)?\s*:?\s*(\d{5})\b",
        r"\b(\d{5})\s+(?:area|region|zone)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static BARE_ZIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{5})\b").unwrap());

static RADIUS_PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    [
        (r"(\d+)\s*miles?", 1.0),
        (r"(\d+)\s*mi\b", 1.0),
        (r"within\s*(\d+)\s*miles?", 1.0),
        (r"(\d+)\s*mile\s*(?:radius|area)", 1.0),
        (r"(\d+)\s*km\b", KM_TO_MILES),
        (r"(\d+)\s*kilometers?", KM_TO_MILES),
    ]
    .iter()
    .map(|(p, multiplier)| (Regex::new(p).unwrap(), *multiplier))
    .collect()
});

/// Marketplace region for the first city named in the query, else the default
pub fn extract_city(query: &str, lexicon: &Lexicon) -> String {
    let query_lower = query.to_lowercase();
    first_substring_match(&query_lower, lexicon.cities)
        .map(str::to_string)
        .unwrap_or_else(|| lexicon.default_city.clone())
}

/// Five-digit US postal code, preferring explicitly qualified mentions
pub fn extract_zip_code(query: &str) -> Option<String> {
    let query_lower = query.to_lowercase();

    for pattern in ZIP_PATTERNS.iter() {
        for caps in pattern.captures_iter(&query_lower) {
            let zip = &caps[1];
            if is_valid_zip(zip) {
                return Some(zip.to_string());
            }
        }
    }

    BARE_ZIP
        .captures_iter(&query_lower)
        .filter_map(|caps| caps.get(1))
        .filter(|m| !reads_as_amount(&query_lower, m.start(), m.end()))
        .map(|m| m.as_str())
        .find(|zip| is_valid_zip(zip))
        .map(str::to_string)
}

fn is_valid_zip(zip: &str) -> bool {
    zip.parse::<u32>().is_ok_and(|value| ZIP_RANGE.contains(&value))
}

/// Search radius in whole miles; kilometres are converted and truncated
pub fn extract_radius(query: &str) -> Option<u32> {
    let query_lower = query.to_lowercase();

    for (pattern, multiplier) in RADIUS_PATTERNS.iter() {
        let found = pattern
            .captures_iter(&query_lower)
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .map(|value| (value as f64 * multiplier) as u32)
            .find(|miles| *miles <= MAX_RADIUS_MILES);

        if found.is_some() {
            return found;
        }
    }

    None
}
