//! HTTP surface: link generation and liveness.

use crate::engine::{GeneratedLinks, LinkEngine};
use crate::error::EngineError;
use crate::models::{LinkSpec, VehicleParameters};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

pub const SERVICE_NAME: &str = "listing-scout";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LinkEngine>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateLinkRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateLinkResponse {
    pub success: bool,
    pub query: String,
    pub recommendations: Vec<String>,
    pub explanation: String,
    pub links: Vec<LinkSpec>,
    pub city: String,
    pub category: String,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub zip_code: Option<String>,
    pub radius: Option<u32>,
    pub vehicle_params: Option<VehicleParameters>,
    pub generated_at: DateTime<Utc>,
}

impl From<GeneratedLinks> for GenerateLinkResponse {
    fn from(generated: GeneratedLinks) -> Self {
        let intent = generated.intent;
        Self {
            success: true,
            query: generated.query,
            recommendations: intent.recommendations,
            explanation: intent.explanation,
            links: generated.links,
            city: intent.city_code,
            category: intent.category_code,
            min_price: intent.min_price,
            max_price: intent.max_price,
            zip_code: intent.zip_code,
            radius: intent.radius_miles,
            vehicle_params: intent.vehicle_params,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-link", post(generate_link))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn generate_link(
    State(state): State<AppState>,
    payload: Result<Json<GenerateLinkRequest>, JsonRejection>,
) -> Result<Json<GenerateLinkResponse>, EngineError> {
    // an unreadable body carries no query
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection);
            GenerateLinkRequest::default()
        }
    };

    let generated = state.engine.generate(&request.query).await?;
    Ok(Json(generated.into()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
