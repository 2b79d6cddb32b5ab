//! Price range extraction.
//!
//! Two independent cascades, one for the upper bound and one for the lower
//! bound. Within a cascade, dollar-marked or price/budget-qualified amounts
//! outrank amounts followed by "dollars". A bare number after "under" or
//! "over" is never a price. Every candidate has to pass three guards:
//!
//! * it must not be followed by a non-money unit, so "under 100k miles" stays
//!   a mileage filter and "over 300 hp" stays an engine spec;
//! * it must not be followed by a year qualifier ("2015 or newer");
//! * its value must lie in [`PRICE_RANGE`], which rejects small counts and
//!   postal-code-shaped numbers.
//!
//! A dollar range ("$500 - $1500", "$500 and $1500") only counts when both
//! ends pass the guards.

use super::{parse_amount, starts_with_measure_unit};
use regex::{Captures, Match, Regex};
use std::sync::LazyLock;

const PRICE_RANGE: std::ops::RangeInclusive<u32> = 100..=999_999;

const AMOUNT: &str = r"(?P<amount>\d[\d,]*(?:\.\d+)?)\s*(?P<k>k\b)?";

/// The far end of a dollar range
const OTHER: &str = r"(?P<other>\d[\d,]*(?:\.\d+)?)\s*(?P<other_k>k\b)?";

/// "-" and "to" may drop the second dollar sign, "and" may not
const RANGE_JOIN: &str = r"\s*(?:(?:-|to)\s*\$?|and\s*\$)\s*";

static MAX_PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(?:under|below|less than|max(?:imum)?|up to|no more than|at most|cheaper than)\s*\$\s*{AMOUNT}",
        r"\$\s*{OTHER}{JOIN}{AMOUNT}",
        r"(?P<min>\bmin(?:imum)?\s+)?\b(?:price|cost|budget)\s*(?:range\s*)?(?:is|of|:|under|below|max|up to|around)?\s*\$?\s*{AMOUNT}",
        r"(?P<min>\b(?:over|above|more than|at least)\s+)?(?:\b(?:under|below|less than|up to|no more than|at most)\s+)?{AMOUNT}\s*(?:dollars|bucks|usd)\b",
    ])
});

static MIN_PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(?:over|above|more than|at least|min(?:imum)?|from|starting at)\s*\$\s*{AMOUNT}",
        r"\$\s*{AMOUNT}{JOIN}{OTHER}",
        r"\bmin(?:imum)?\s+(?:price|cost|budget)\s*(?:is|of|:)?\s*\$?\s*{AMOUNT}",
        r"\b(?:over|above|more than|at least)\s+{AMOUNT}\s*(?:dollars|bucks|usd)\b",
    ])
});

static YEAR_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:or|and)\s+(?:newer|older|later|earlier|up|above|below)\b").unwrap()
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p
                .replace("{JOIN}", RANGE_JOIN)
                .replace("{AMOUNT}", AMOUNT)
                .replace("{OTHER}", OTHER);
            Regex::new(&pattern).unwrap()
        })
        .collect()
}

/// Lower and upper price bounds found in a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Run both price cascades over `text`.
///
/// Used on the user's query and, during salvage, on the model's raw reply.
pub fn extract_price_range(text: &str) -> PriceRange {
    let text_lower = text.to_lowercase();

    PriceRange {
        min: first_price(&text_lower, &MIN_PRICE_PATTERNS),
        max: first_price(&text_lower, &MAX_PRICE_PATTERNS),
    }
}

fn first_price(text: &str, cascade: &[Regex]) -> Option<u32> {
    cascade.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .find_map(|caps| accept_candidate(text, &caps))
    })
}

fn accept_candidate(text: &str, caps: &Captures<'_>) -> Option<u32> {
    // lower-bound wording belongs to the other cascade
    if caps.name("min").is_some() {
        return None;
    }

    let value = guarded_amount(text, caps.name("amount")?, caps.name("k"))?;

    // both ends of a range must read as money
    if let Some(other) = caps.name("other") {
        guarded_amount(text, other, caps.name("other_k"))?;
    }

    Some(value)
}

fn guarded_amount(text: &str, amount: Match<'_>, k: Option<Match<'_>>) -> Option<u32> {
    let end = k.map_or(amount.end(), |k| k.end());
    let rest = &text[end..];

    if starts_with_measure_unit(rest) || YEAR_QUALIFIER.is_match(rest) {
        return None;
    }

    parse_amount(amount.as_str(), k.is_some()).filter(|value| PRICE_RANGE.contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("honda under $15000 within 15 miles of 90210", None, Some(15000))]
    #[case("I want a reliable car under $10,000", None, Some(10000))]
    #[case("laptop below $1.5k", None, Some(1500))]
    #[case("couch $200 - $500", Some(200), Some(500))]
    #[case("tv between $300 and $800", Some(300), Some(800))]
    #[case("bike over $250", Some(250), None)]
    #[case("budget: $1200 for a desk", None, Some(1200))]
    #[case("price 900 or so", None, Some(900))]
    #[case("min price 400", Some(400), None)]
    #[case("sofa 700 dollars", None, Some(700))]
    #[case("at least 300 dollars", Some(300), None)]
    #[case("sofa $300 to $650 in good shape", Some(300), Some(650))]
    #[case("Honda Civic under $15000 and 2015 or newer", None, Some(15000))]
    #[case("black BMW under $20000 and 100k miles or less", None, Some(20000))]
    fn test_extract_price_range(
        #[case] text: &str,
        #[case] min: Option<u32>,
        #[case] max: Option<u32>,
    ) {
        assert_eq!(extract_price_range(text), PriceRange { min, max });
    }

    #[rstest]
    #[case("under 100k miles")]
    #[case("less than 100k mi")]
    #[case("over 100k miles")]
    #[case("under 120000 miles")]
    #[case("black BMW 335i 2010 to 2015 under 100k miles automatic clean title")]
    #[case("Toyota Corolla under 150000 km")]
    #[case("under 100 km")]
    #[case("truck with more than 300 horsepower")]
    #[case("3 bedroom apartment over 1200 sq ft")]
    #[case("desk under 500")]
    #[case("more than 150")]
    fn test_measurements_and_bare_numbers_are_not_prices(#[case] text: &str) {
        assert_eq!(extract_price_range(text), PriceRange::default());
    }

    #[rstest]
    #[case("$15000 and 2015 or newer")]
    #[case("$15000 to 2015 or newer")]
    #[case("$20000 - 100k miles")]
    fn test_range_needs_money_on_both_ends(#[case] text: &str) {
        assert_eq!(extract_price_range(text), PriceRange::default());
    }

    #[test]
    fn test_postal_code_is_not_a_price() {
        let range = extract_price_range("sofa within 10 miles of 90210");
        assert_eq!(range, PriceRange::default());

        let range = extract_price_range("sofa near 94110");
        assert_eq!(range, PriceRange::default());
    }

    #[test]
    fn test_amounts_outside_range_are_rejected() {
        assert_eq!(extract_price_range("under $50").max, None);
        assert_eq!(extract_price_range("under $5000000").max, None);
        assert_eq!(extract_price_range("more than 2 bedrooms").min, None);
    }

    #[test]
    fn test_dollar_amount_wins_over_bare_number() {
        let range = extract_price_range("under 300 or really under $250");
        assert_eq!(range.max, Some(250));
    }
}
