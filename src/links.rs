//! Rendering of search intents into marketplace search URLs.

use crate::extractors::tables::{GENERAL_CATEGORY, VEHICLE_CATEGORY};
use crate::models::{LinkSpec, SearchIntent, VehicleParameters};
use tracing::debug;

pub const DEFAULT_HOST_TEMPLATE: &str = "https://{city}.craigslist.org";

/// Builds one search link per recommended item
#[derive(Debug, Clone)]
pub struct LinkRenderer {
    host_template: String,
}

impl LinkRenderer {
    /// `host_template` must contain a `{city}` placeholder
    pub fn new(host_template: impl Into<String>) -> Self {
        Self {
            host_template: host_template.into(),
        }
    }

    pub fn render(&self, intent: &SearchIntent) -> Vec<LinkSpec> {
        let links: Vec<LinkSpec> = intent
            .recommendations
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(|item| LinkSpec {
                item: item.to_string(),
                url: self.search_url(item, intent),
            })
            .collect();

        debug!("Rendered {} links", links.len());
        links
    }

    pub fn search_url(&self, item: &str, intent: &SearchIntent) -> String {
        let host = self.host_template.replace("{city}", &intent.city_code);
        let category = if intent.category_code.is_empty() {
            GENERAL_CATEGORY
        } else {
            intent.category_code.as_str()
        };

        let mut params: Vec<(&str, String)> = vec![("query", query_text(item))];
        push(&mut params, "min_price", intent.min_price);
        push(&mut params, "max_price", intent.max_price);
        push(&mut params, "postal", intent.zip_code.as_deref());
        push(&mut params, "search_distance", intent.radius_miles);

        if category == VEHICLE_CATEGORY {
            if let Some(vehicle) = &intent.vehicle_params {
                vehicle_params(&mut params, vehicle);
            }
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/search/{}?{}", host, category, query)
    }
}

impl Default for LinkRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_TEMPLATE)
    }
}

/// Tokens are encoded one by one and joined with `+`
fn query_text(item: &str) -> String {
    item.split_whitespace()
        .map(|token| urlencoding::encode(token).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

fn push<T: ToString>(
    params: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn vehicle_params(params: &mut Vec<(&'static str, String)>, vehicle: &VehicleParameters) {
    if vehicle.search_titles_only {
        params.push(("srchType", "T".to_string()));
    }
    if vehicle.hide_duplicates {
        params.push(("bundleDuplicates", "1".to_string()));
    }
    push(params, "min_auto_year", vehicle.min_year);
    push(params, "max_auto_year", vehicle.max_year);
    push(params, "min_auto_miles", vehicle.min_miles);
    push(params, "max_auto_miles", vehicle.max_miles);
    push(params, "auto_drivetrain", vehicle.drive_type);
    push(params, "auto_transmission", vehicle.transmission);
    push(params, "auto_bodytype", vehicle.body_type);
    push(params, "auto_cylinders", vehicle.cylinders);
    push(params, "auto_fuel_type", vehicle.fuel_type);
    push(params, "auto_paint", vehicle.paint_color);
    push(params, "auto_title_status", vehicle.title_status);
}
