//! Recommendation Engine — deterministic skill-to-job matching.
//!
//! Algorithm:
//! 1. Normalized user skills `U` (empty → no recommendations)
//! 2. Query terms = `U` then caller seed terms, deduplicated and bounded
//! 3. `catalog.search(term)` per term, candidates keyed by posting id
//! 4. score = round(100 × |required ∩ U| / |required|); score 0 is dropped
//! 5. Rank: score desc → matched count desc → catalog order asc
//! 6. Company cap while filling `limit` slots; relaxed if slots would stay empty
//!
//! No LLM call and no randomness: the same catalog and input always produce
//! the same output.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::index::CatalogSnapshot;
use crate::catalog::normalize::normalize_token;
use crate::models::posting::JobPosting;
use crate::recommendation::skills::SkillSet;

pub const DEFAULT_LIMIT: usize = 4;
pub const DEFAULT_MAX_QUERY_TERMS: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Invalid skill at index {index}: {reason}")]
    InvalidSkillSet { index: usize, reason: String },

    #[error("Invalid recommendation options: {0}")]
    InvalidOptions(String),
}

/// Knobs for one `recommend` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Maximum number of results.
    pub limit: usize,
    /// Maximum results per company. `None` means `ceil(limit / 2)`.
    pub company_diversity_cap: Option<usize>,
    /// Extra search terms issued after the user's skills. Scoring only ever
    /// counts the user's skills.
    pub seed_terms: Vec<String>,
    /// Upper bound on the number of catalog searches per call.
    pub max_query_terms: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        RecommendOptions {
            limit: DEFAULT_LIMIT,
            company_diversity_cap: None,
            seed_terms: Vec::new(),
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
        }
    }
}

impl RecommendOptions {
    pub fn company_cap(&self) -> usize {
        self.company_diversity_cap
            .unwrap_or_else(|| self.limit.div_ceil(2))
    }

    fn validate(&self) -> Result<(), RecommendError> {
        if self.limit == 0 {
            return Err(RecommendError::InvalidOptions(
                "limit must be greater than zero".to_string(),
            ));
        }
        if self.company_diversity_cap == Some(0) {
            return Err(RecommendError::InvalidOptions(
                "company_diversity_cap must be greater than zero".to_string(),
            ));
        }
        if self.max_query_terms == 0 {
            return Err(RecommendError::InvalidOptions(
                "max_query_terms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// One recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedJob {
    pub posting: JobPosting,
    pub score: u32, // 0 – 100
    /// Required skills the user has, in catalog order.
    pub matched_skills: Vec<String>,
    /// Required skills the user lacks, in catalog order.
    pub missing_skills: Vec<String>,
}

/// Catalog searches issued for `skills`: each skill, then each seed term,
/// deduplicated and cut at `max_query_terms`.
pub fn query_terms(skills: &SkillSet, options: &RecommendOptions) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let seeds = options.seed_terms.iter().filter_map(|t| normalize_token(t));

    for term in skills.as_slice().iter().cloned().chain(seeds) {
        if terms.len() == options.max_query_terms {
            break;
        }
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// `round(100 × matched / required)`, halves rounded up.
pub fn match_score(matched: usize, required: usize) -> u32 {
    if required == 0 {
        return 0;
    }
    let matched = matched.min(required);
    ((200 * matched + required) / (2 * required)) as u32
}

/// A scored candidate, still borrowing from the snapshot.
#[derive(Debug)]
struct Candidate<'a> {
    posting: &'a JobPosting,
    score: u32,
    matched: usize,
    position: usize,
}

/// Produces up to `options.limit` ranked, company-diverse recommendations.
pub fn recommend(
    skills: &SkillSet,
    catalog: &CatalogSnapshot,
    options: &RecommendOptions,
) -> Result<Vec<RankedJob>, RecommendError> {
    options.validate()?;

    if skills.is_empty() {
        return Ok(Vec::new());
    }

    let user: HashSet<&str> = skills.as_slice().iter().map(String::as_str).collect();
    let terms = query_terms(skills, options);

    // Keyed by id: a posting reachable from several terms is considered once.
    let mut reachable: HashMap<&str, &JobPosting> = HashMap::new();
    for term in &terms {
        for posting in catalog.search(term) {
            reachable.entry(posting.id.as_str()).or_insert(posting);
        }
    }

    let mut candidates: Vec<Candidate<'_>> = reachable
        .into_values()
        .filter_map(|posting| {
            let matched = posting
                .required_skills
                .iter()
                .filter(|s| user.contains(s.as_str()))
                .count();
            if matched == 0 {
                return None;
            }
            Some(Candidate {
                posting,
                score: match_score(matched, posting.required_skills.len()),
                matched,
                position: catalog.position(&posting.id)?,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.matched.cmp(&a.matched))
            .then_with(|| a.position.cmp(&b.position))
    });

    debug!(
        "Recommendation: {} skills, {} query terms, {} scored candidates (catalog v{})",
        skills.len(),
        terms.len(),
        candidates.len(),
        catalog.version()
    );

    let selected = apply_company_cap(candidates, options.limit, options.company_cap());

    Ok(selected
        .into_iter()
        .map(|candidate| to_ranked_job(candidate, &user))
        .collect())
}

/// Walks the ranking filling `limit` slots with at most `cap` postings per
/// company. If the ranking runs out first, postings held back by the cap fill
/// the remaining slots in ranking order. Output keeps ranking order.
fn apply_company_cap(ranked: Vec<Candidate<'_>>, limit: usize, cap: usize) -> Vec<Candidate<'_>> {
    let mut per_company: HashMap<String, usize> = HashMap::new();
    let mut selected: Vec<(usize, Candidate<'_>)> = Vec::with_capacity(limit.min(ranked.len()));
    let mut deferred: Vec<(usize, Candidate<'_>)> = Vec::new();

    for (rank, candidate) in ranked.into_iter().enumerate() {
        if selected.len() == limit {
            break;
        }
        let count = per_company
            .entry(company_key(&candidate.posting.company))
            .or_insert(0);
        if *count < cap {
            *count += 1;
            selected.push((rank, candidate));
        } else {
            deferred.push((rank, candidate));
        }
    }

    let open_slots = limit - selected.len();
    if open_slots > 0 && !deferred.is_empty() {
        debug!(
            "Relaxing company cap of {cap}: {open_slots} open slots, {} deferred",
            deferred.len()
        );
        selected.extend(deferred.into_iter().take(open_slots));
        selected.sort_by_key(|(rank, _)| *rank);
    }

    selected.into_iter().map(|(_, candidate)| candidate).collect()
}

fn company_key(company: &str) -> String {
    company.trim().to_lowercase()
}

fn to_ranked_job(candidate: Candidate<'_>, user: &HashSet<&str>) -> RankedJob {
    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = candidate
        .posting
        .required_skills
        .iter()
        .cloned()
        .partition(|s| user.contains(s.as_str()));

    RankedJob {
        posting: candidate.posting.clone(),
        score: candidate.score,
        matched_skills,
        missing_skills,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
