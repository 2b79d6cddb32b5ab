use anyhow::Context;
use listing_scout::api::{create_router, AppState};
use listing_scout::{
    AppConfig, IntentSynthesizer, Lexicon, LinkEngine, LinkRenderer, OllamaTransport,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let engine = Arc::new(build_engine(&config)?);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        serve(&config, engine).await
    } else {
        run_once(&engine, &args.join(" ")).await
    }
}

fn build_engine(config: &AppConfig) -> anyhow::Result<LinkEngine> {
    let transport = OllamaTransport::new(
        config.model.base_url.clone(),
        config.model.model.clone(),
        config.model.timeout(),
    )?;

    info!("🔎 Listing Scout using {} at {}", config.model.model, config.model.base_url);

    let synthesizer = IntentSynthesizer::new(
        Arc::new(transport),
        config.model.sampling(),
        config.model.timeout(),
    );

    Ok(LinkEngine::new(
        Lexicon::craigslist(config.marketplace.default_city.clone()),
        synthesizer,
        LinkRenderer::new(config.marketplace.host_template.clone()),
    ))
}

async fn serve(config: &AppConfig, engine: Arc<LinkEngine>) -> anyhow::Result<()> {
    let app = create_router(AppState { engine });
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn run_once(engine: &LinkEngine, query: &str) -> anyhow::Result<()> {
    let generated = engine.generate(query).await?;
    let intent = &generated.intent;

    info!("✅ Generated {} links", generated.links.len());

    println!("Query: {}", generated.query);
    println!("City: {}  Category: {}", intent.city_code, intent.category_code);
    if intent.min_price.is_some() || intent.max_price.is_some() {
        let bound = |p: Option<u32>| p.map_or("-".to_string(), |p| format!("${}", p));
        println!("Price: {} to {}", bound(intent.min_price), bound(intent.max_price));
    }
    if let Some(zip) = &intent.zip_code {
        let radius = intent
            .radius_miles
            .map_or("-".to_string(), |r| r.to_string());
        println!("Near: {} ({} mi)", zip, radius);
    }
    if !intent.explanation.is_empty() {
        println!("Why: {}", intent.explanation);
    }
    println!();

    for (i, link) in generated.links.iter().enumerate() {
        println!("{}. {}", i + 1, link.item);
        println!("   {}", link.url);
    }

    Ok(())
}
