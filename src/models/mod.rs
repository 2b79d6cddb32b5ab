use serde::{Deserialize, Serialize};

/// Vehicle filters attached to searches in the vehicle category
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleParameters {
    pub search_titles_only: bool,
    pub hide_duplicates: bool,
    pub min_year: Option<u32>,
    pub max_year: Option<u32>,
    pub min_miles: Option<u32>,
    pub max_miles: Option<u32>,
    pub drive_type: Option<u8>,
    pub transmission: Option<u8>,
    pub body_type: Option<u8>,
    pub cylinders: Option<u8>,
    pub fuel_type: Option<u8>,
    pub paint_color: Option<u8>,
    pub title_status: Option<u8>,
}

impl VehicleParameters {
    /// True when no flag or attribute was resolved
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything the deterministic extractors recovered from the user's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalFindings {
    pub city_code: String,
    pub category_code: Option<String>,
    pub zip_code: Option<String>,
    pub radius_miles: Option<u32>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub vehicle_params: Option<VehicleParameters>,
}

/// Structured intent proposed by the language model (or salvaged from its text)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelIntent {
    pub recommendations: Vec<String>,
    pub category_code: Option<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub explanation: String,
}

/// Fully resolved search request, ready to be rendered into links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchIntent {
    pub city_code: String,
    pub category_code: String,
    pub recommendations: Vec<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub zip_code: Option<String>,
    pub radius_miles: Option<u32>,
    pub vehicle_params: Option<VehicleParameters>,
    pub explanation: String,
}

/// One marketplace search link per recommended item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkSpec {
    pub item: String,
    pub url: String,
}
