mod analysis;
mod config;
mod errors;
mod keyphrase;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::orchestrator::{AnalysisConfig, Analyzer};
use crate::config::Config;
use crate::keyphrase::{
    KeyphraseBackend, KeyphraseExtractor, LlmKeyphraseExtractor, RakeExtractor,
};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed or missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-match API v{}", env!("CARGO_PKG_VERSION"));

    // Validate built-in catalogs once; a drift here is fatal
    let analysis_config = AnalysisConfig::builtin().context("built-in analysis catalogs are invalid")?;

    // Initialize keyphrase extractor (RakeExtractor by default; swap via KEYPHRASE_BACKEND)
    let extractor = build_extractor(&config)?;
    info!(
        "Keyphrase backend: {} (limit {})",
        extractor.backend(),
        config.extractor.limit
    );

    // Build app state
    let state = AppState {
        analyzer: Analyzer::new(analysis_config, extractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_extractor(config: &Config) -> Result<Arc<dyn KeyphraseExtractor>> {
    match config.keyphrase_backend {
        KeyphraseBackend::Rake => Ok(Arc::new(RakeExtractor::new(config.extractor))),
        KeyphraseBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required when KEYPHRASE_BACKEND=llm")?;
            let llm = LlmClient::new(api_key).context("failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmKeyphraseExtractor::new(
                llm,
                config.extractor.limit,
            )))
        }
    }
}
