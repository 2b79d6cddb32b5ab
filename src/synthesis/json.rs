//! Best-effort recovery of the JSON object inside a model reply.

use crate::error::MalformedModelOutput;
use crate::extractors::Lexicon;
use crate::models::ModelIntent;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// One level of nesting is enough for the shape we ask for
static BALANCED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?:[^{}]|\{[^{}]*\})*\}").unwrap());

/// Find and parse the first JSON object in `text`.
///
/// Truncated replies (more `{` than `}`) are repaired once by cutting back to
/// the last complete closing brace, or failing that the last complete member,
/// and closing the remaining open braces.
pub fn recover_object(text: &str) -> Result<Map<String, Value>, MalformedModelOutput> {
    let first = text.find('{').ok_or(MalformedModelOutput::NoObject)?;

    let candidate = match BALANCED_OBJECT.find(text) {
        Some(m) if m.start() == first => m.as_str(),
        _ => &text[first..],
    };

    match parse_leading(candidate) {
        Ok(map) => Ok(map),
        Err(err) => {
            if brace_deficit(candidate) == 0 {
                return Err(err);
            }
            repair_truncated(candidate).ok_or(err)
        }
    }
}

fn parse_leading(candidate: &str) -> Result<Map<String, Value>, MalformedModelOutput> {
    // parse the first value and ignore whatever the model wrote after it
    let value = serde_json::Deserializer::from_str(candidate)
        .into_iter::<Value>()
        .next()
        .ok_or(MalformedModelOutput::NoObject)??;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(MalformedModelOutput::NotAnObject),
    }
}

fn brace_deficit(text: &str) -> usize {
    let opens = text.matches('{').count();
    let closes = text.matches('}').count();
    opens.saturating_sub(closes)
}

fn repair_truncated(candidate: &str) -> Option<Map<String, Value>> {
    let cut_points = [candidate.rfind('}').map(|i| i + 1), candidate.rfind(',')];

    cut_points.into_iter().flatten().find_map(|end| {
        let mut repaired = candidate[..end].trim_end().to_string();
        let missing = brace_deficit(&repaired);
        if missing == 0 {
            return None;
        }
        repaired.push_str(&"}".repeat(missing));
        parse_leading(&repaired).ok()
    })
}

/// Convert a recovered object into a [`ModelIntent`], dropping anything unusable
pub fn intent_from_object(object: &Map<String, Value>, lexicon: &Lexicon) -> ModelIntent {
    let category_code = object
        .get("category")
        .and_then(Value::as_str)
        .map(|c| c.trim().to_lowercase())
        .filter(|c| lexicon.is_known_category(c));

    ModelIntent {
        recommendations: recommendations(object.get("recommendations")),
        category_code,
        min_price: price(object.get("min_price")),
        max_price: price(object.get("max_price")),
        explanation: object
            .get("explanation")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

fn recommendations(value: Option<&Value>) -> Vec<String> {
    let items: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(joined)) => joined.split(',').collect(),
        _ => Vec::new(),
    };

    let mut out: Vec<String> = Vec::new();
    for item in items.into_iter().map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}

fn price(value: Option<&Value>) -> Option<u32> {
    let amount = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok()?,
        _ => return None,
    };

    if amount.is_finite() && (0.0..=u32::MAX as f64).contains(&amount) {
        Some(amount.round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recover_object_with_surrounding_prose() {
        let text = r#"Sure! Here is the JSON: {"recommendations": ["Sofa"], "category": "fua"} Hope it helps."#;
        let map = recover_object(text).unwrap();
        assert_eq!(map.get("category"), Some(&json!("fua")));
    }

    #[test]
    fn test_recover_object_with_nested_value() {
        let text =
            r#"{"recommendations": ["A1 Bike"], "meta": {"confidence": 0.9}, "category": "bia"}"#;
        let map = recover_object(text).unwrap();
        assert_eq!(map.get("category"), Some(&json!("bia")));
    }

    #[test]
    fn test_recover_object_repairs_truncation_after_nested_object() {
        let text = r#"{"recommendations": ["Road Bike"], "meta": {"n": 1}, "explanation": "Cut of"#;
        let map = recover_object(text).unwrap();
        assert_eq!(map.get("recommendations"), Some(&json!(["Road Bike"])));
        assert!(map.get("explanation").is_none());
    }

    #[test]
    fn test_recover_object_repairs_truncation_after_member() {
        let text = r#"{"recommendations": ["MacBook Pro", "Dell XPS"], "category": "sys", "explanation": "These are"#;
        let map = recover_object(text).unwrap();
        assert_eq!(map.get("category"), Some(&json!("sys")));
    }

    #[test]
    fn test_recover_object_failures() {
        assert!(matches!(
            recover_object("I recommend a MacBook Pro."),
            Err(MalformedModelOutput::NoObject)
        ));
        assert!(matches!(
            recover_object("{not json at all}"),
            Err(MalformedModelOutput::Invalid(_))
        ));
        assert!(recover_object(r#"{"recommendations": ["Mac"#).is_err());
    }

    #[test]
    fn test_intent_from_object_is_lenient() {
        let object = json!({
            "recommendations": ["Honda Civic", " ", 42, "Honda Civic", "Toyota Corolla"],
            "min_price": "$1,500",
            "max_price": 9000.0,
            "category": "CTA",
            "explanation": " Reliable sedans "
        });
        let intent = intent_from_object(object.as_object().unwrap(), &Lexicon::default());

        assert_eq!(intent.recommendations, vec!["Honda Civic", "Toyota Corolla"]);
        assert_eq!(intent.min_price, Some(1500));
        assert_eq!(intent.max_price, Some(9000));
        assert_eq!(intent.category_code.as_deref(), Some("cta"));
        assert_eq!(intent.explanation, "Reliable sedans");
    }

    #[test]
    fn test_intent_from_object_drops_unusable_fields() {
        let object = json!({
            "recommendations": "Sofa, Loveseat",
            "min_price": -5,
            "max_price": "cheap",
            "category": "furniture"
        });
        let intent = intent_from_object(object.as_object().unwrap(), &Lexicon::default());

        assert_eq!(intent.recommendations, vec!["Sofa", "Loveseat"]);
        assert_eq!(intent.min_price, None);
        assert_eq!(intent.max_price, None);
        assert_eq!(intent.category_code, None);
        assert!(intent.explanation.is_empty());
    }
}
