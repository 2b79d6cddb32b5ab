//! Intent synthesis: ask the language model for structured intent and
//! recover whatever it answered into a [`ModelIntent`].

pub mod json;
pub mod ollama;
pub mod prompt;
pub mod salvage;
pub mod traits;
pub mod types;

use crate::error::SynthesisError;
use crate::extractors::Lexicon;
use crate::models::ModelIntent;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use ollama::OllamaTransport;
pub use traits::ModelTransport;
pub use types::{ModelRequest, ModelResponse, SamplingOptions};

/// Result of interpreting a model reply. Both variants carry a usable intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// A JSON object was found and converted
    Parsed(ModelIntent),
    /// No usable JSON; recovered heuristically from the text
    Salvaged(ModelIntent),
}

impl SynthesisOutcome {
    pub fn is_salvaged(&self) -> bool {
        matches!(self, SynthesisOutcome::Salvaged(_))
    }

    pub fn into_intent(self) -> ModelIntent {
        match self {
            SynthesisOutcome::Parsed(intent) | SynthesisOutcome::Salvaged(intent) => intent,
        }
    }
}

/// Sends one query to the model and waits at most `timeout` for an answer
pub struct IntentSynthesizer {
    transport: Arc<dyn ModelTransport>,
    sampling: SamplingOptions,
    timeout: Duration,
}

impl IntentSynthesizer {
    pub fn new(
        transport: Arc<dyn ModelTransport>,
        sampling: SamplingOptions,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            sampling,
            timeout,
        }
    }

    /// Ask the model about `query`. Not retried on failure.
    pub async fn synthesize(&self, query: &str) -> Result<ModelResponse, SynthesisError> {
        let request = prompt::build_request(query, &self.sampling);

        info!("Asking {} for search intent", self.transport.model_name());
        let started = Instant::now();

        let response = tokio::time::timeout(self.timeout, self.transport.complete(&request))
            .await
            .map_err(|_| SynthesisError::Timeout(self.timeout))??;

        info!("Model answered in {:.2?}", started.elapsed());
        debug!("Raw model reply: {}", response.content);

        Ok(response)
    }
}

/// Turn a raw reply into an intent, falling back to salvage when no JSON
/// object can be recovered. `known_category` is the lexically resolved one.
pub fn interpret(
    response: &ModelResponse,
    known_category: Option<&str>,
    lexicon: &Lexicon,
) -> SynthesisOutcome {
    match json::recover_object(&response.content) {
        Ok(object) => {
            let mut intent = json::intent_from_object(&object, lexicon);
            if intent.recommendations.is_empty() {
                debug!("Parsed reply has no recommendations, using fallback list");
                let category = intent.category_code.as_deref().or(known_category);
                intent.recommendations = salvage::fallback_recommendations(category);
            }
            SynthesisOutcome::Parsed(intent)
        }
        Err(err) => {
            warn!("Could not parse model reply ({}), salvaging", err);
            SynthesisOutcome::Salvaged(salvage::salvage(&response.content, known_category))
        }
    }
}
