use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single job listing as held by the catalog.
///
/// `required_skills` is normalized (trimmed, lower-cased, deduplicated) when the
/// posting is loaded into a `CatalogIndex`; postings handed out by the index are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(deserialize_with = "deserialize_posting_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "salary")]
    pub salary_range: String,
    #[serde(alias = "skills")]
    pub required_skills: Vec<String>,
}

/// Columns of `job_postings` that make up a posting. Ordering columns stay in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_range: String,
    pub required_skills: Vec<String>,
}

impl From<JobPostingRow> for JobPosting {
    fn from(row: JobPostingRow) -> Self {
        JobPosting {
            id: row.id.to_string(),
            title: row.title,
            company: row.company,
            location: row.location,
            salary_range: row.salary_range,
            required_skills: row.required_skills,
        }
    }
}

/// Catalog files in the wild use both `"id": "abc"` and `"id": 42`.
fn deserialize_posting_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
