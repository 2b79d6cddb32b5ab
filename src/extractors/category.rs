use super::tables::{first_substring_match, Lexicon};

/// Listing category implied by the query, or `None` when nothing matches.
///
/// The priority list is consulted first so that specific phrases such as
/// "apple watch" win over the generic terms they contain.
pub fn extract_category(query: &str, lexicon: &Lexicon) -> Option<String> {
    let query_lower = query.to_lowercase();

    first_substring_match(&query_lower, lexicon.category_priority)
        .or_else(|| first_substring_match(&query_lower, lexicon.categories))
        .map(str::to_string)
}
