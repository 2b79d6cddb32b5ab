use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplingOptions {
    /// Low temperature keeps the JSON shape stable
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_k: 10,
            top_p: 0.9,
            repeat_penalty: 1.1,
            max_tokens: 150,
        }
    }
}

/// One request to the model: fixed instructions plus the user's text
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub system: String,
    pub user: String,
    pub sampling: SamplingOptions,
}

/// Raw reply text; may or may not contain the JSON object we asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub content: String,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
