use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::index::CatalogIndex;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Live job catalog. Reloads swap the snapshot inside; the handle never changes.
    pub catalog: Arc<CatalogIndex>,
    /// Only present when the catalog is backed by Postgres.
    pub db: Option<PgPool>,
    pub config: Config,
}
