mod application;
mod cache;
mod config;
mod email;
mod errors;
mod extraction;
mod fetch;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fetch::{FetchConfig, HttpFetcher, PageFetcher};
use crate::llm_client::{EmailBackend, LlmClient};
use crate::matching::catalog::PortfolioCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coldflow API v{}", env!("CARGO_PKG_VERSION"));

    // Load (or seed) the portfolio catalog once; it is immutable afterwards
    let catalog = PortfolioCatalog::load_or_seed(config.portfolio_csv.as_deref())
        .context("Failed to load portfolio catalog")?;
    if catalog.is_empty() {
        warn!("Portfolio catalog has no usable entries; every match will come back empty");
    } else {
        info!("Portfolio catalog loaded ({} entries)", catalog.len());
    }

    // Initialize page fetcher
    let fetcher: Arc<dyn PageFetcher> = Arc::new(
        HttpFetcher::new(&FetchConfig {
            timeout_secs: config.fetch_timeout_secs,
            ..FetchConfig::default()
        })
        .context("Failed to build HTTP fetcher")?,
    );

    // Initialize generative email backend (optional)
    let email_backend: Option<Arc<dyn EmailBackend>> = match config.llm.clone() {
        Some(llm_config) => {
            let client = LlmClient::new(llm_config).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            warn!("LLM_API_KEY not set; generative email mode is disabled");
            None
        }
    };

    info!("Match scorer: {:?}", config.scorer);

    // Build app state
    let state = AppState::new(config.clone(), catalog, fetcher, email_backend);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
