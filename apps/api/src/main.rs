mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::index::CatalogIndex;
use crate::catalog::loader::refresh_catalog;
use crate::config::{CatalogSource, Config};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill-Match API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL is only needed when the catalog lives there
    let db = match (&config.catalog_source, &config.database_url) {
        (CatalogSource::Database, Some(url)) => Some(create_pool(url).await?),
        _ => None,
    };

    // Initial catalog load — refuse to start on an invalid catalog
    let catalog = Arc::new(CatalogIndex::new());
    let snapshot = refresh_catalog(&catalog, &config.catalog_source, db.as_ref())
        .await
        .context("Initial catalog load failed")?;
    info!(
        "Catalog ready: {} postings from {} source",
        snapshot.len(),
        config.catalog_source.label()
    );
    if snapshot.is_empty() {
        warn!("Catalog is empty; every recommendation will be empty until a reload");
    }

    let state = AppState {
        catalog,
        db,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
