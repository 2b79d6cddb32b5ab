//! Instruction template for the intent synthesizer.

use crate::synthesis::types::{ModelRequest, SamplingOptions};

/// Fixed system instruction: taxonomy, output shape and worked examples
pub const SYSTEM_PROMPT: &str = r#"Extract from the user's shopping request: 3-5 specific item recommendations, a price range (min/max in US dollars) and a Craigslist category. Return JSON only, no prose:
{"recommendations": ["item1", "item2", "item3"], "min_price": null or number, "max_price": null or number, "category": "category_code", "explanation": "Brief explanation"}

Categories: cta (cars & trucks), mca (motorcycles), boo (boats), pta (auto parts), bia (bicycles), sys (computers), syp (computer parts), ela (electronics), moa (cell phones), vga (video gaming), pho (photo & video), fua (furniture), ppa (appliances), hsa (household), jwa (jewelry), clo (clothing), spo (sporting goods), msa (musical instruments), tla (tools), bka (books), taa (toys & games), apa (apartments), roo (rooms & shares), rea (real estate), jjj (jobs), bbb (services), pet (pets), sss (general for sale)

Rules:
- Only dollar amounts are prices. A 5-digit number after "near", "in" or "within N miles of" is a zip code, never a price.
- "100k miles" is vehicle mileage, never a price.
- Use null when no price is given.

Examples:
Request: "reliable car under $10,000 near 94110"
{"recommendations": ["Honda Civic", "Toyota Corolla", "Mazda 3"], "min_price": null, "max_price": 10000, "category": "cta", "explanation": "Reliable compact cars under $10,000; 94110 is the zip code."}

Request: "black BMW 335i 2010 to 2015 under 100k miles"
{"recommendations": ["BMW 335i", "BMW 335i xDrive", "BMW 335i Coupe"], "min_price": null, "max_price": null, "category": "cta", "explanation": "100k miles is mileage, so no price limit was given."}

Request: "gaming laptop between $800 and $1200"
{"recommendations": ["ASUS ROG Zephyrus", "Lenovo Legion 5", "Dell G15"], "min_price": 800, "max_price": 1200, "category": "sys", "explanation": "Mid-range gaming laptops within budget."}"#;

/// Render the model request for one user query
pub fn build_request(query: &str, sampling: &SamplingOptions) -> ModelRequest {
    ModelRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: format!("User request: {}", query),
        sampling: sampling.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::tables::CATEGORY_CODES;

    #[test]
    fn test_build_request_wraps_query() {
        let request = build_request("used couch", &SamplingOptions::default());
        assert_eq!(request.user, "User request: used couch");
        assert_eq!(request.system, SYSTEM_PROMPT);
        assert_eq!(request.sampling.max_tokens, 150);
    }

    #[test]
    fn test_prompt_lists_every_category() {
        for code in CATEGORY_CODES {
            assert!(SYSTEM_PROMPT.contains(&format!("{} (", code)), "missing {code}");
        }
    }
}
