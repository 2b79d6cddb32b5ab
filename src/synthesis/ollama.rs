use crate::error::SynthesisError;
use crate::synthesis::traits::ModelTransport;
use crate::synthesis::types::{ModelRequest, ModelResponse, SamplingOptions};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Ollama chat API transport
pub struct OllamaTransport {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
    top_k: u32,
    top_p: f32,
    repeat_penalty: f32,
}

impl From<&SamplingOptions> for ChatOptions {
    fn from(sampling: &SamplingOptions) -> Self {
        Self {
            temperature: sampling.temperature,
            num_predict: sampling.max_tokens,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            repeat_penalty: sampling.repeat_penalty,
        }
    }
}

#[derive(Deserialize)]
struct ChatReply {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl OllamaTransport {
    /// Create a new transport for `model` served at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> SynthesisError {
        if err.is_timeout() {
            SynthesisError::Timeout(self.timeout)
        } else {
            SynthesisError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ModelTransport for OllamaTransport {
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, SynthesisError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatPayload {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            stream: false,
            options: ChatOptions::from(&request.sampling),
        };

        debug!("Posting chat request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Model endpoint returned status: {}", status);
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Transport(format!("status {}: {}", status, body.trim())));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!("Received {} bytes from model", body.len());

        let reply: ChatReply = serde_json::from_str(&body)
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        Ok(ModelResponse::new(reply.message.content.trim()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
