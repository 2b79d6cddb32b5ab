//! Deterministic extractors over the raw user query.
//!
//! Each extractor is a pure function of the query text and the shared
//! [`Lexicon`]. A miss is reported as `None`, never as an error.

pub mod category;
pub mod location;
pub mod price;
pub mod tables;
pub mod vehicle;

use crate::models::LexicalFindings;
use regex::Regex;
use std::sync::LazyLock;

pub use category::extract_category;
pub use location::{extract_city, extract_radius, extract_zip_code};
pub use price::{extract_price_range, PriceRange};
pub use tables::Lexicon;
pub use vehicle::extract_vehicle_params;

static AMOUNT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:k\b|dollars\b|bucks\b|usd\b|mi(?:les?)?\b)").unwrap()
});

/// Units that make a number a distance, size or count rather than money
static MEASURE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:mi(?:les?)?|km|kilomet(?:er|re)s?|mph|hp|horsepower|sq\.?\s*f(?:ee)?t|sqft|square\s+f(?:ee|oo)t|bed(?:room)?s?|br|bath(?:room)?s?|cc|lbs?|pounds|gb|tb|inch(?:es)?|years?|yrs?)\b",
    )
    .unwrap()
});

/// Run every extractor over `query`
pub fn extract_all(query: &str, lexicon: &Lexicon) -> LexicalFindings {
    let price = extract_price_range(query);

    LexicalFindings {
        city_code: extract_city(query, lexicon),
        category_code: extract_category(query, lexicon),
        zip_code: extract_zip_code(query),
        radius_miles: extract_radius(query),
        min_price: price.min,
        max_price: price.max,
        vehicle_params: extract_vehicle_params(query, lexicon),
    }
}

/// True when the number at `text[start..end]` is written as money or carries
/// a unit, e.g. `$15000`, `2000 dollars`, `15000 miles`
pub(crate) fn reads_as_amount(text: &str, start: usize, end: usize) -> bool {
    text[..start].trim_end().ends_with('$') || AMOUNT_SUFFIX.is_match(&text[end..])
}

/// True when `rest` starts with a non-money unit such as `miles`, `km` or `hp`
pub(crate) fn starts_with_measure_unit(rest: &str) -> bool {
    MEASURE_SUFFIX.is_match(rest)
}

/// Parses `"15,000"` / `"15.5"` with an optional thousands marker
pub(crate) fn parse_amount(digits: &str, thousands: bool) -> Option<u32> {
    let value: f64 = digits.replace(',', "").parse().ok()?;
    let value = if thousands { value * 1000.0 } else { value };
    if !(0.0..=u32::MAX as f64).contains(&value) {
        return None;
    }
    Some(value as u32)
}
