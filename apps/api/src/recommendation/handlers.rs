//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::recommendation::engine::{query_terms, recommend, RankedJob, RecommendOptions};
use crate::recommendation::skills::SkillSet;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Kept untyped so a missing, null or mistyped list produces a precise
    /// validation error.
    #[serde(default)]
    pub skills: Value,
    pub limit: Option<usize>,
    pub company_diversity_cap: Option<usize>,
    #[serde(default)]
    pub seed_terms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub jobs: Vec<RankedJob>,
    pub query_terms_used: Vec<String>,
    pub catalog_version: u64,
}

/// POST /api/v1/recommendations
///
/// Ranks catalog postings against the caller's skills. No matches is a
/// successful, empty response.
pub async fn handle_recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) = payload?;
    let skills = SkillSet::from_json(&request.skills)?;

    let options = RecommendOptions {
        limit: request.limit.unwrap_or(state.config.recommendation_limit),
        company_diversity_cap: request.company_diversity_cap,
        seed_terms: request.seed_terms,
        max_query_terms: state.config.max_query_terms,
    };

    // One snapshot for the whole request, even if a reload lands mid-way.
    let catalog = state.catalog.snapshot();
    let jobs = recommend(&skills, &catalog, &options)?;

    let query_terms_used = if skills.is_empty() {
        Vec::new()
    } else {
        query_terms(&skills, &options)
    };

    Ok(Json(RecommendResponse {
        jobs,
        query_terms_used,
        catalog_version: catalog.version(),
    }))
}
