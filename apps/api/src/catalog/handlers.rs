//! Axum route handlers for the Catalog API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::index::CatalogSnapshot;
use crate::catalog::loader::refresh_catalog;
use crate::errors::AppError;
use crate::models::posting::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogStatusResponse {
    pub version: u64,
    pub posting_count: usize,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub postings: Vec<JobPosting>,
}

fn status_of(snapshot: &CatalogSnapshot, state: &AppState) -> CatalogStatusResponse {
    CatalogStatusResponse {
        version: snapshot.version(),
        posting_count: snapshot.len(),
        loaded_at: snapshot.loaded_at(),
        source: state.config.catalog_source.label().to_string(),
    }
}

/// GET /api/v1/catalog
pub async fn handle_catalog_status(State(state): State<AppState>) -> Json<CatalogStatusResponse> {
    let snapshot = state.catalog.snapshot();
    Json(status_of(&snapshot, &state))
}

/// GET /api/v1/catalog/search?q=...
///
/// Substring search over titles and skills, in catalog order. A blank query
/// returns no postings.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let postings = state.catalog.search(&params.q);
    Json(SearchResponse {
        query: params.q,
        postings,
    })
}

/// GET /api/v1/catalog/postings/:id
pub async fn handle_get_posting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    state
        .catalog
        .snapshot()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Posting {id} not found")))
}

/// POST /api/v1/catalog/reload
///
/// Re-reads the configured source. A rejected catalog leaves the current one live.
pub async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<CatalogStatusResponse>, AppError> {
    let snapshot = refresh_catalog(
        &state.catalog,
        &state.config.catalog_source,
        state.db.as_ref(),
    )
    .await?;
    Ok(Json(status_of(&snapshot, &state)))
}
