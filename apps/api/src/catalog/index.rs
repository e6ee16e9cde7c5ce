//! Catalog Index — holds the current snapshot of job postings and answers
//! free-text search over it.
//!
//! A snapshot is immutable once built. `load` builds the replacement outside the
//! lock and only swaps the `Arc` while holding it, so readers see either the old
//! or the new catalog in full.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::catalog::normalize::{normalize_token, normalize_tokens};
use crate::models::posting::JobPosting;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid posting at index {index}: {reason}")]
    InvalidPosting { index: usize, reason: String },

    #[error("Duplicate posting id '{0}'")]
    DuplicateId(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot
// ────────────────────────────────────────────────────────────────────────────

/// One complete, validated version of the catalog.
#[derive(Debug)]
pub struct CatalogSnapshot {
    version: u64,
    loaded_at: DateTime<Utc>,
    postings: Vec<JobPosting>,
    /// Posting id → position in `postings` (catalog insertion order).
    by_id: HashMap<String, usize>,
}

impl CatalogSnapshot {
    fn empty() -> Self {
        CatalogSnapshot {
            version: 0,
            loaded_at: Utc::now(),
            postings: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Validates and normalizes `postings` into a snapshot.
    pub fn build(postings: Vec<JobPosting>, version: u64) -> Result<Self, CatalogError> {
        let mut normalized = Vec::with_capacity(postings.len());
        let mut by_id = HashMap::with_capacity(postings.len());

        for (index, posting) in postings.into_iter().enumerate() {
            let id = posting.id.trim().to_string();
            if id.is_empty() {
                return Err(CatalogError::InvalidPosting {
                    index,
                    reason: "id is empty".to_string(),
                });
            }

            let required_skills = normalize_tokens(&posting.required_skills);
            if required_skills.is_empty() {
                return Err(CatalogError::InvalidPosting {
                    index,
                    reason: format!("posting '{id}' has no required skills"),
                });
            }

            if by_id.insert(id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }

            normalized.push(JobPosting {
                id,
                required_skills,
                ..posting
            });
        }

        Ok(CatalogSnapshot {
            version,
            loaded_at: Utc::now(),
            postings: normalized,
            by_id,
        })
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn get(&self, id: &str) -> Option<&JobPosting> {
        self.by_id.get(id).map(|&i| &self.postings[i])
    }

    /// Position of a posting in catalog insertion order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Substring search over titles and skill tokens.
    ///
    /// The query is trimmed and case-folded; a blank query matches nothing.
    /// Results keep catalog insertion order — ranking happens elsewhere.
    pub fn search(&self, query: &str) -> Vec<&JobPosting> {
        let Some(query) = normalize_token(query) else {
            return Vec::new();
        };

        self.postings
            .iter()
            .filter(|posting| {
                posting.title.to_lowercase().contains(&query)
                    || posting
                        .required_skills
                        .iter()
                        .any(|skill| skill.contains(&query))
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Index
// ────────────────────────────────────────────────────────────────────────────

/// Shared handle to the live catalog. Cheap to read from many tasks at once.
#[derive(Debug)]
pub struct CatalogIndex {
    current: RwLock<Arc<CatalogSnapshot>>,
    /// Serializes loaders so versions are published in order.
    loading: Mutex<()>,
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogIndex {
    /// Starts with an empty catalog (version 0).
    pub fn new() -> Self {
        CatalogIndex {
            current: RwLock::new(Arc::new(CatalogSnapshot::empty())),
            loading: Mutex::new(()),
        }
    }

    /// Replaces the whole catalog. On error the previous snapshot stays live.
    pub fn load(&self, postings: Vec<JobPosting>) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let _loading = self.loading.lock().unwrap_or_else(PoisonError::into_inner);

        let version = self.snapshot().version + 1;
        let snapshot = Arc::new(CatalogSnapshot::build(postings, version)?);

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);

        info!(
            "Catalog loaded: version {} with {} postings",
            snapshot.version,
            snapshot.len()
        );
        Ok(snapshot)
    }

    /// The current complete snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Searches the current snapshot, returning owned postings.
    pub fn search(&self, query: &str) -> Vec<JobPosting> {
        self.snapshot().search(query).into_iter().cloned().collect()
    }
}
