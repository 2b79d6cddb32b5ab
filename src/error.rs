//! Error types for the link engine.
//!
//! Only [`EngineError`] ever reaches a caller. [`MalformedModelOutput`] is
//! recovered inside the synthesis stage by the salvage parser.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the language model
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The model did not answer within the configured wait
    #[error("model did not answer within {0:?}")]
    Timeout(Duration),

    /// Connection failure or non-2xx status
    #[error("model transport failed: {0}")]
    Transport(String),

    /// The transport answered but without the expected envelope
    #[error("invalid response from model: {0}")]
    InvalidResponse(String),
}

/// The model answered, but not with a usable JSON object
#[derive(Debug, Error)]
pub enum MalformedModelOutput {
    #[error("no JSON object in model output")]
    NoObject,

    #[error("JSON value is not an object")]
    NotAnObject,

    #[error("invalid JSON: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// User-visible failures of a link generation request
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Query is required")]
    EmptyQuery,

    #[error(
        "Request timed out after {0:?}. The model is still processing, try again in a moment."
    )]
    SynthesisTimeout(Duration),

    #[error("Model API error: {0}")]
    SynthesisTransport(String),
}

impl From<SynthesisError> for EngineError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Timeout(waited) => EngineError::SynthesisTimeout(waited),
            SynthesisError::Transport(msg) | SynthesisError::InvalidResponse(msg) => {
                EngineError::SynthesisTransport(msg)
            }
        }
    }
}

impl EngineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::EmptyQuery => StatusCode::BAD_REQUEST,
            EngineError::SynthesisTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            EngineError::SynthesisTransport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Body returned with every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
