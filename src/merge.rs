use crate::extractors::tables::GENERAL_CATEGORY;
use crate::models::{LexicalFindings, ModelIntent, SearchIntent};

/// Combine the lexical findings with the model's intent.
///
/// The model decides category, prices, recommendations and explanation.
/// Location and vehicle filters always come from the query text itself.
pub fn merge(lexical: LexicalFindings, model: ModelIntent) -> SearchIntent {
    let category_code = model
        .category_code
        .or(lexical.category_code)
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string());

    let mut min_price = model.min_price.or(lexical.min_price);
    let mut max_price = model.max_price.or(lexical.max_price);
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if min > max {
            std::mem::swap(&mut min_price, &mut max_price);
        }
    }

    SearchIntent {
        city_code: lexical.city_code,
        category_code,
        recommendations: model.recommendations,
        min_price,
        max_price,
        zip_code: lexical.zip_code,
        radius_miles: lexical.radius_miles,
        vehicle_params: lexical.vehicle_params,
        explanation: model.explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleParameters;

    fn findings() -> LexicalFindings {
        LexicalFindings {
            city_code: "seattle".to_string(),
            category_code: Some("cta".to_string()),
            zip_code: Some("98101".to_string()),
            radius_miles: Some(20),
            min_price: Some(2000),
            max_price: Some(9000),
            vehicle_params: Some(VehicleParameters {
                min_year: Some(2012),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_model_values_win() {
        let model = ModelIntent {
            recommendations: vec!["Toyota Tacoma".to_string()],
            category_code: Some("pta".to_string()),
            min_price: None,
            max_price: Some(7000),
            explanation: "Trucks".to_string(),
        };
        let intent = merge(findings(), model);

        assert_eq!(intent.category_code, "pta");
        assert_eq!(intent.min_price, Some(2000));
        assert_eq!(intent.max_price, Some(7000));
        assert_eq!(intent.recommendations, vec!["Toyota Tacoma"]);
        assert_eq!(intent.explanation, "Trucks");
    }

    #[test]
    fn test_location_and_vehicle_come_from_query() {
        let intent = merge(findings(), ModelIntent::default());

        assert_eq!(intent.city_code, "seattle");
        assert_eq!(intent.category_code, "cta");
        assert_eq!(intent.zip_code.as_deref(), Some("98101"));
        assert_eq!(intent.radius_miles, Some(20));
        assert_eq!(intent.vehicle_params.and_then(|v| v.min_year), Some(2012));
    }

    #[test]
    fn test_general_category_when_unresolved() {
        let mut lexical = findings();
        lexical.category_code = None;
        let intent = merge(lexical, ModelIntent::default());
        assert_eq!(intent.category_code, "sss");
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let model = ModelIntent {
            min_price: Some(12000),
            ..Default::default()
        };
        let intent = merge(findings(), model);
        assert_eq!(intent.min_price, Some(9000));
        assert_eq!(intent.max_price, Some(12000));
    }
}
