//! Layered configuration: defaults, then `listing-scout.toml`, then the
//! environment (`LISTING_SCOUT_MODEL__BASE_URL=...`).

use crate::links::DEFAULT_HOST_TEMPLATE;
use crate::synthesis::SamplingOptions;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "listing-scout.toml";
const ENV_PREFIX: &str = "LISTING_SCOUT_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub marketplace: MarketplaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Language model endpoint and sampling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    /// Seconds to wait for one reply
    pub timeout_secs: u64,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let sampling = SamplingOptions::default();
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral:latest".to_string(),
            timeout_secs: 120,
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            repeat_penalty: sampling.repeat_penalty,
            max_tokens: sampling.max_tokens,
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            repeat_penalty: self.repeat_penalty,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Region used when the query names no known city
    pub default_city: String,
    pub host_template: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            default_city: "sfbay".to_string(),
            host_template: DEFAULT_HOST_TEMPLATE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default file in the working directory
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            // OLLAMA_BASE_URL / OLLAMA_MODEL are still honoured
            .merge(
                Env::raw()
                    .only(&["OLLAMA_BASE_URL", "OLLAMA_MODEL"])
                    .map(|key| {
                        if key == "OLLAMA_BASE_URL" {
                            "model.base_url".into()
                        } else {
                            "model.model".into()
                        }
                    }),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
