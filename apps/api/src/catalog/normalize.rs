//! Skill token normalization shared by the catalog and the recommendation engine.

/// Trims and case-folds a single token. Returns `None` for blank input.
pub fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes a list of tokens, dropping blanks and duplicates.
/// First-seen order is kept so results stay deterministic.
pub fn normalize_tokens<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for token in raw {
        if let Some(token) = normalize_token(token.as_ref()) {
            if !out.contains(&token) {
                out.push(token);
            }
        }
    }
    out
}
