mod config;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod readiness;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{BoundedInvoker, LlmClient};
use crate::matching::catalog::reference_catalog;
use crate::readiness::locks::StartupLocks;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Match Engine v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs pending migrations)
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize LLM client behind the bounded invoker
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    let invoker = BoundedInvoker::new(Arc::new(llm), config.llm_timeout);
    info!(
        "LLM client initialized (model: {}, deadline: {}s)",
        llm_client::MODEL,
        config.llm_timeout.as_secs()
    );

    let catalog = reference_catalog();
    info!("Reference catalog loaded: {} investors", catalog.len());

    // Build app state
    let state = AppState {
        startups: store.clone(),
        investors: store.clone(),
        tasks: store,
        invoker,
        catalog: Arc::new(catalog),
        locks: StartupLocks::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
