//! Catalog sources. Every source yields raw postings; validation happens in
//! `CatalogIndex::load`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::catalog::index::{CatalogIndex, CatalogSnapshot};
use crate::catalog::seed::seed_postings;
use crate::config::CatalogSource;
use crate::errors::AppError;
use crate::models::posting::{JobPosting, JobPostingRow};

/// Reads the configured source and publishes it into `index`.
///
/// Database failures surface as `AppError::Database`, other read failures as
/// `AppError::Internal`, validation failures as `AppError::UnprocessableEntity`.
/// The live snapshot is untouched on any of them.
pub async fn refresh_catalog(
    index: &CatalogIndex,
    source: &CatalogSource,
    db: Option<&PgPool>,
) -> Result<Arc<CatalogSnapshot>, AppError> {
    let postings = fetch_postings(source, db).await?;
    index.load(postings).map_err(|e| {
        warn!("Rejected catalog from {} source: {e}", source.label());
        AppError::from(e)
    })
}

/// Reads postings from the configured source.
///
/// `db` must be present when the source is `CatalogSource::Database`.
pub async fn fetch_postings(
    source: &CatalogSource,
    db: Option<&PgPool>,
) -> Result<Vec<JobPosting>, AppError> {
    match source {
        CatalogSource::Builtin => Ok(seed_postings()),
        CatalogSource::File(path) => Ok(read_postings_file(path).await?),
        CatalogSource::Database => {
            let Some(pool) = db else {
                return Err(anyhow!(
                    "Catalog source is 'database' but no database pool is configured"
                )
                .into());
            };
            Ok(fetch_postings_from_db(pool).await?)
        }
    }
}

/// Reads a JSON array of postings from disk.
pub async fn read_postings_file(path: &Path) -> Result<Vec<JobPosting>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog file '{}'", path.display()))?;

    let postings: Vec<JobPosting> = serde_json::from_str(&raw)
        .with_context(|| format!("Catalog file '{}' is not a JSON array of postings", path.display()))?;

    info!(
        "Read {} postings from catalog file {}",
        postings.len(),
        path.display()
    );
    Ok(postings)
}

pub async fn fetch_postings_from_db(pool: &PgPool) -> Result<Vec<JobPosting>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobPostingRow>(
        "SELECT id, title, company, location, salary_range, required_skills \
         FROM job_postings ORDER BY position, id",
    )
    .fetch_all(pool)
    .await?;

    info!("Fetched {} postings from job_postings", rows.len());
    Ok(rows.into_iter().map(JobPosting::from).collect())
}
