use serde_json::Value;

use crate::catalog::normalize::normalize_tokens;
use crate::recommendation::engine::RecommendError;

/// A caller's skills, normalized: trimmed, lower-cased, deduplicated, blanks
/// dropped, first-seen order kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SkillSet {
            skills: normalize_tokens(raw),
        }
    }

    /// Builds a skill set from a raw JSON field. Anything but an array of
    /// strings is rejected; a missing field arrives here as `null`.
    pub fn from_json(value: &Value) -> Result<Self, RecommendError> {
        match value {
            Value::Array(values) => Self::from_json_values(values),
            other => Err(RecommendError::InvalidSkillSet {
                index: 0,
                reason: format!("skills must be an array of strings, got {}", json_kind(other)),
            }),
        }
    }

    /// Builds a skill set from untyped JSON input, rejecting anything that
    /// is not a string (nulls, numbers, nested values).
    pub fn from_json_values(values: &[Value]) -> Result<Self, RecommendError> {
        let mut raw = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match value {
                Value::String(s) => raw.push(s.as_str()),
                Value::Null => {
                    return Err(RecommendError::InvalidSkillSet {
                        index,
                        reason: "entry is null".to_string(),
                    })
                }
                other => {
                    return Err(RecommendError::InvalidSkillSet {
                        index,
                        reason: format!("expected a string, got {}", json_kind(other)),
                    })
                }
            }
        }
        Ok(SkillSet::new(raw))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.skills.iter().any(|s| s == token)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
