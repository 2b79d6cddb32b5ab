#![allow(dead_code)]

use async_trait::async_trait;
use listing_scout::error::SynthesisError;
use listing_scout::synthesis::{ModelRequest, ModelResponse, SamplingOptions};
use listing_scout::{IntentSynthesizer, Lexicon, LinkEngine, LinkRenderer, ModelTransport};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the scripted transport does when called
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
    Hang,
}

/// Transport double answering every request with the same scripted reply
pub struct ScriptedTransport {
    reply: Reply,
    pub requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn answering(text: &str) -> Arc<Self> {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, SynthesisError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(ModelResponse::new(text.clone())),
            Reply::Fail(msg) => Err(SynthesisError::Transport(msg.clone())),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(SynthesisError::Transport("unreachable".to_string()))
            }
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn engine_with(transport: Arc<ScriptedTransport>, timeout: Duration) -> LinkEngine {
    let synthesizer = IntentSynthesizer::new(transport, SamplingOptions::default(), timeout);
    LinkEngine::new(Lexicon::default(), synthesizer, LinkRenderer::default())
}

pub fn engine(transport: Arc<ScriptedTransport>) -> LinkEngine {
    engine_with(transport, Duration::from_secs(5))
}
