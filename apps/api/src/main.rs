mod catalog;
mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod storage;
mod tracker;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::load_jobs;
use crate::config::Config;
use crate::db::{create_pool, migrate};
use crate::matching::RuleBasedScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{KvStore, MemoryStore, SqliteStore};
use crate::tracker::Tracker;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Tracker API v{}", env!("CARGO_PKG_VERSION"));

    // Static job list
    let jobs = load_jobs(&config.jobs_path).await?;

    // User-state store
    let store: Arc<dyn KvStore> = if config.uses_memory_store() {
        info!("Using in-memory store; user state will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let pool = create_pool(&config.database_url).await?;
        migrate(&pool).await?;
        Arc::new(SqliteStore::new(pool))
    };
    let tracker = Tracker::load(store).await;

    let state = AppState {
        jobs: Arc::new(jobs),
        tracker: Arc::new(tracker),
        scorer: Arc::new(RuleBasedScorer),
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
