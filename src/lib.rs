//! Turns free-text shopping requests into marketplace search links.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod links;
pub mod merge;
pub mod models;
pub mod synthesis;

pub use config::AppConfig;
pub use engine::{GeneratedLinks, LinkEngine};
pub use error::{EngineError, Result};
pub use extractors::Lexicon;
pub use links::LinkRenderer;
pub use synthesis::{IntentSynthesizer, ModelTransport, OllamaTransport};
