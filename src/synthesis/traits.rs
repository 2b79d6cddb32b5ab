use crate::error::SynthesisError;
use crate::synthesis::types::{ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Common trait for language model backends
/// This allows swapping Ollama for another chat API (or a test double)
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Send one instruction + user message and return the raw reply text
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, SynthesisError>;

    /// Get the name of the model answering requests
    fn model_name(&self) -> &str;
}
