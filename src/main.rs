//! Customer Churn Intelligence Dashboard
//!
//! Report server over precomputed churn predictions.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 CHURN INTELLIGENCE DASHBOARD              │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌───────────────┐  │
//! │  │  Pages       │   │  Report API  │   │  Health       │  │
//! │  │  (HTML)      │   │  (JSON)      │   │               │  │
//! │  └──────┬───────┘   └──────┬───────┘   └───────┬───────┘  │
//! │         └──────────────────┼───────────────────┘          │
//! │                            ▼                              │
//! │                 ┌─────────────────────┐                   │
//! │                 │  Artifacts (Arc)    │  loaded once      │
//! │                 └──────────┬──────────┘                   │
//! │                ┌───────────┴───────────┐                  │
//! │           report table       attribution bundle           │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod artifacts;
mod config;
mod constants;
mod error;
mod format;
mod handlers;
mod models;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use artifacts::{ArtifactCache, ArtifactPaths, Artifacts};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "churn_dashboard=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = config::Config::from_env();
    tracing::info!("Churn dashboard starting ({})", config.environment);

    // Nothing can render without both artifacts
    let cache = ArtifactCache::new(ArtifactPaths::from(&config));
    tracing::info!("Report data: {}", cache.paths().report_data.display());
    tracing::info!("Attribution bundle: {}", cache.paths().attribution.display());
    let artifacts = cache.load().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    tracing::debug!("Artifact cache populated after {} disk load(s)", cache.disk_loads());

    let state = AppState {
        artifacts,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<Artifacts>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::render))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/summary", get(handlers::reports::summary))
        .route("/api/v1/drivers/contract", get(handlers::reports::contract_drivers))
        .route("/api/v1/drivers/internet-service", get(handlers::reports::internet_service_drivers))
        .route("/api/v1/interpretation", get(handlers::reports::interpretation))
        .route("/api/v1/high-risk", get(handlers::reports::high_risk))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
