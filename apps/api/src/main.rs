mod career;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod regenerate;
mod routes;
mod state;
mod storage;
mod templates;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::client::HttpTextGenerator;
use crate::llm_client::{LanguageModel, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DraftStore, FileDraftStore};
use crate::templates::renderer::Renderer;
use crate::wizard::controller::WizardController;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Draft storage and the wizard session rehydrated from it
    let store: Arc<dyn DraftStore> = Arc::new(FileDraftStore::open(&config.data_dir)?);
    info!("Draft storage at {}", config.data_dir.display());
    let wizard = WizardController::load(store.clone());

    // Client the editors use to reach /api/regenerate
    let generator = HttpTextGenerator::new(&config.api_base_url, config.generation_timeout)?;
    info!("Text generation endpoint: {}", generator.endpoint());

    // Gemini backs /api/regenerate when a key is configured
    let llm: Option<Arc<dyn LanguageModel>> = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.gemini_models.clone(),
                config.generation_timeout,
            )?;
            info!("LLM client initialized (models: {})", client.models().join(", "));
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY is not set; /api/regenerate will report a configuration error");
            None
        }
    };

    let renderer = Renderer::new()?;

    let state = AppState {
        config: config.clone(),
        store,
        wizard: Arc::new(Mutex::new(wizard)),
        generator: Arc::new(generator),
        llm,
        renderer: Arc::new(renderer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
