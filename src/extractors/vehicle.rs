//! Vehicle attribute extraction.
//!
//! Year and mileage bounds come from small pattern cascades; everything else
//! is a whole-word lookup against the ordered tables in [`Lexicon`].

use super::tables::{
    contains_word, first_word_match, Lexicon, AUTOMATIC_TERMS, HIDE_DUPLICATES_PHRASES,
    MANUAL_TERMS, TITLES_ONLY_PHRASES, TRANSMISSION_AUTOMATIC, TRANSMISSION_MANUAL,
};
use super::{parse_amount, reads_as_amount};
use crate::models::VehicleParameters;
use regex::Regex;
use std::sync::LazyLock;

/// Plausible model years for a bare, unqualified year mention
const BARE_YEAR_RANGE: std::ops::RangeInclusive<u32> = 1990..=2025;

/// Mileage below this is a distance, not an odometer reading
const MIN_ODOMETER_MILES: u32 = 1000;

const MAX_CYLINDERS: u8 = 16;

static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b((?:19|20)\d{2})\s*(?:to|-|through|thru)\s*((?:19|20)\d{2})\b").unwrap()
});

static YEAR_MIN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:after|from|since|newer than)\s+((?:19|20)\d{2})\b",
        r"\b((?:19|20)\d{2})\s*(?:or|and)\s*(?:newer|later|up|above)\b",
        r"\b((?:19|20)\d{2})\+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static YEAR_MAX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:before|older than|up to)\s+((?:19|20)\d{2})\b",
        r"\b((?:19|20)\d{2})\s*(?:or|and)\s*(?:older|earlier|below)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static BARE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

static MILES_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d[\d,]*)\s*(k)?\s*(?:to|-)\s*(\d[\d,]*)\s*(k)?\s*mi(?:les?)?\b").unwrap()
});

static MILES_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:under|below|less than|fewer than|max(?:imum)?|up to|no more than)\s+(\d[\d,]*)\s*(k)?\s*mi(?:les?)?\b",
    )
    .unwrap()
});

static MILES_MIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:over|above|more than|at least|min(?:imum)?)\s+(\d[\d,]*)\s*(k)?\s*mi(?:les?)?\b",
    )
    .unwrap()
});

static MILES_BARE_K: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d[\d,]*)\s*k\s*mi(?:les?)?\b").unwrap());

static CYLINDER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\b(\d{1,2})\s*-?\s*cyl(?:inders?)?\b", r"\bv(\d{1,2})\b"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Vehicle filters mentioned in `query`, or `None` when nothing resolved
pub fn extract_vehicle_params(query: &str, lexicon: &Lexicon) -> Option<VehicleParameters> {
    let query_lower = query.to_lowercase();
    let (min_year, max_year) = extract_year_range(&query_lower);
    let (min_miles, max_miles) = extract_mileage_range(&query_lower);

    let params = VehicleParameters {
        search_titles_only: TITLES_ONLY_PHRASES.iter().any(|p| query_lower.contains(p)),
        hide_duplicates: HIDE_DUPLICATES_PHRASES.iter().any(|p| query_lower.contains(p)),
        min_year,
        max_year,
        min_miles,
        max_miles,
        drive_type: first_word_match(&query_lower, lexicon.drive_types),
        transmission: extract_transmission(&query_lower),
        body_type: first_word_match(&query_lower, lexicon.body_types),
        cylinders: extract_cylinders(&query_lower),
        fuel_type: first_word_match(&query_lower, lexicon.fuel_types),
        paint_color: first_word_match(&query_lower, lexicon.paint_colors),
        title_status: first_word_match(&query_lower, lexicon.title_statuses),
    };

    (!params.is_empty()).then_some(params)
}

fn extract_year_range(text: &str) -> (Option<u32>, Option<u32>) {
    if let Some(caps) = YEAR_RANGE.captures(text) {
        let (a, b) = (parse_year(&caps[1]), parse_year(&caps[2]));
        if let (Some(a), Some(b)) = (a, b) {
            return (Some(a.min(b)), Some(a.max(b)));
        }
    }

    let min = first_year(text, &YEAR_MIN_PATTERNS);
    let max = first_year(text, &YEAR_MAX_PATTERNS);
    if min.is_some() || max.is_some() {
        return (min, max);
    }

    let bare = BARE_YEAR
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter(|m| !reads_as_amount(text, m.start(), m.end()))
        .filter_map(|m| parse_year(m.as_str()))
        .find(|year| BARE_YEAR_RANGE.contains(year));

    (bare, bare)
}

fn first_year(text: &str, patterns: &[Regex]) -> Option<u32> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text).and_then(|caps| parse_year(&caps[1])))
}

fn parse_year(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

fn extract_mileage_range(text: &str) -> (Option<u32>, Option<u32>) {
    if let Some(caps) = MILES_RANGE.captures(text) {
        let upper_k = caps.get(4).is_some();
        let upper = parse_amount(&caps[3], upper_k);
        // "50-100k miles" puts the marker on the upper bound only
        let lower_digits = &caps[1];
        let lower_k = caps.get(2).is_some()
            || (upper_k && parse_amount(lower_digits, false).is_some_and(|v| v < 1000));
        let lower = parse_amount(lower_digits, lower_k);

        if let (Some(lower), Some(upper)) = (lower, upper) {
            if upper >= MIN_ODOMETER_MILES {
                return (Some(lower.min(upper)), Some(lower.max(upper)));
            }
        }
    }

    let max = odometer_reading(text, &MILES_MAX);
    let min = odometer_reading(text, &MILES_MIN);
    if min.is_some() || max.is_some() {
        return (min, max);
    }

    let bare = MILES_BARE_K
        .captures_iter(text)
        .filter_map(|caps| parse_amount(&caps[1], true))
        .find(|miles| *miles >= MIN_ODOMETER_MILES);

    (None, bare)
}

fn odometer_reading(text: &str, pattern: &Regex) -> Option<u32> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| parse_amount(&caps[1], caps.get(2).is_some()))
        .find(|miles| *miles >= MIN_ODOMETER_MILES)
}

/// Manual and automatic must not both be mentioned
fn extract_transmission(text: &str) -> Option<u8> {
    let manual = MANUAL_TERMS.iter().any(|t| contains_word(text, t));
    let automatic = AUTOMATIC_TERMS.iter().any(|t| contains_word(text, t));

    match (manual, automatic) {
        (true, false) => Some(TRANSMISSION_MANUAL),
        (false, true) => Some(TRANSMISSION_AUTOMATIC),
        _ => None,
    }
}

fn extract_cylinders(text: &str) -> Option<u8> {
    CYLINDER_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps[1].parse::<u8>().ok())
            .find(|n| (1..=MAX_CYLINDERS).contains(n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> VehicleParameters {
        extract_vehicle_params(query, &Lexicon::default()).unwrap_or_default()
    }

    #[test]
    fn test_year_ranges() {
        assert_eq!(extract_year_range("2010 to 2015"), (Some(2010), Some(2015)));
        assert_eq!(extract_year_range("2015-2010"), (Some(2010), Some(2015)));
        assert_eq!(extract_year_range("after 2012"), (Some(2012), None));
        assert_eq!(extract_year_range("before 2005"), (None, Some(2005)));
        assert_eq!(extract_year_range("2015 or newer"), (Some(2015), None));
        assert_eq!(extract_year_range("2008 or older"), (None, Some(2008)));
        assert_eq!(extract_year_range("2018+ only"), (Some(2018), None));
        assert_eq!(
            extract_year_range("from 2011 but before 2016"),
            (Some(2011), Some(2016))
        );
    }

    #[test]
    fn test_bare_year_must_be_plausible() {
        assert_eq!(extract_year_range("a 2014 civic"), (Some(2014), Some(2014)));
        assert_eq!(extract_year_range("a 1985 classic"), (None, None));
        assert_eq!(extract_year_range("car under $2000"), (None, None));
        assert_eq!(extract_year_range("1999 dollars"), (None, None));
    }

    #[test]
    fn test_mileage_ranges() {
        assert_eq!(extract_mileage_range("under 100k miles"), (None, Some(100_000)));
        assert_eq!(extract_mileage_range("less than 80,000 miles"), (None, Some(80_000)));
        assert_eq!(extract_mileage_range("over 50k mi"), (Some(50_000), None));
        assert_eq!(
            extract_mileage_range("50k-100k miles"),
            (Some(50_000), Some(100_000))
        );
        assert_eq!(
            extract_mileage_range("50 to 100k miles"),
            (Some(50_000), Some(100_000))
        );
        assert_eq!(extract_mileage_range("only 60k miles"), (None, Some(60_000)));
        assert_eq!(extract_mileage_range("within 15 miles"), (None, None));
        assert_eq!(extract_mileage_range("under 15 miles"), (None, None));
    }

    #[test]
    fn test_transmission_requires_exclusive_mention() {
        assert_eq!(params("automatic sedan").transmission, Some(TRANSMISSION_AUTOMATIC));
        assert_eq!(params("6 speed manual").transmission, Some(TRANSMISSION_MANUAL));
        assert_eq!(params("stick shift wagon").transmission, Some(TRANSMISSION_MANUAL));
        assert_eq!(params("manual or automatic").transmission, None);
    }

    #[test]
    fn test_single_value_lookups() {
        let p = params("red AWD pickup truck diesel V8 salvage title");
        assert_eq!(p.paint_color, Some(7));
        assert_eq!(p.drive_type, Some(3));
        assert_eq!(p.body_type, Some(7));
        assert_eq!(p.fuel_type, Some(2));
        assert_eq!(p.cylinders, Some(8));
        assert_eq!(p.title_status, Some(2));
    }

    #[test]
    fn test_lookups_match_whole_words() {
        let p = params("registered owner, covered parking");
        assert_eq!(p.paint_color, None);
        assert_eq!(params("4 cylinder hybrid").cylinders, Some(4));
        assert_eq!(params("4 cylinder hybrid").fuel_type, Some(3));
        assert_eq!(params("6cyl").cylinders, Some(6));
    }

    #[test]
    fn test_flags() {
        let p = params("civic, search titles only, hide duplicates");
        assert!(p.search_titles_only);
        assert!(p.hide_duplicates);
        assert!(!params("civic no dupes").hide_duplicates);
    }

    #[test]
    fn test_nothing_resolved_is_none() {
        assert_eq!(extract_vehicle_params("a comfy couch", &Lexicon::default()), None);
    }
}
