// Recommendation: deterministic skill-to-job matching over a catalog snapshot.
// Scoring, ranking and the company diversity cap live in `engine`; no LLM
// participates in ranking.

pub mod engine;
pub mod handlers;
pub mod skills;
