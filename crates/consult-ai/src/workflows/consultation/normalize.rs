/// Case-fold and trim a symptom token or catalog keyword.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trim a closed-vocabulary field (duration, severity) without changing its case.
pub(crate) fn normalize_field(raw: &str) -> String {
    raw.trim().to_string()
}
