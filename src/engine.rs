use crate::error::{EngineError, Result};
use crate::extractors::{self, Lexicon};
use crate::links::LinkRenderer;
use crate::merge::merge;
use crate::models::{LinkSpec, SearchIntent};
use crate::synthesis::{self, IntentSynthesizer};
use tracing::{debug, info};

/// Everything produced for one query
#[derive(Debug, Clone)]
pub struct GeneratedLinks {
    pub query: String,
    pub intent: SearchIntent,
    pub links: Vec<LinkSpec>,
    /// True when the model reply had to be salvaged
    pub salvaged: bool,
}

/// Runs the full pipeline: extract, synthesize, merge, render
pub struct LinkEngine {
    lexicon: Lexicon,
    synthesizer: IntentSynthesizer,
    renderer: LinkRenderer,
}

impl LinkEngine {
    pub fn new(lexicon: Lexicon, synthesizer: IntentSynthesizer, renderer: LinkRenderer) -> Self {
        Self {
            lexicon,
            synthesizer,
            renderer,
        }
    }

    pub async fn generate(&self, query: &str) -> Result<GeneratedLinks> {
        let query = query.trim();
        if query.is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        info!("Generating links for: {}", query);

        let findings = extractors::extract_all(query, &self.lexicon);
        debug!("Lexical findings: {:?}", findings);

        let response = self.synthesizer.synthesize(query).await?;
        let outcome =
            synthesis::interpret(&response, findings.category_code.as_deref(), &self.lexicon);
        let salvaged = outcome.is_salvaged();

        let intent = merge(findings, outcome.into_intent());
        let links = self.renderer.render(&intent);

        info!(
            "Generated {} links in category {} for {}",
            links.len(),
            intent.category_code,
            intent.city_code
        );

        Ok(GeneratedLinks {
            query: query.to_string(),
            intent,
            links,
            salvaged,
        })
    }
}
