use regex::Regex;
use std::sync::LazyLock;

/// Upper bound for free-text fields, in characters.
pub const MAX_FIELD_CHARS: usize = 2000;

/// Upper bound for the email field, in characters.
pub const MAX_EMAIL_CHARS: usize = 254;

static RE_HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Strips tag-shaped substrings, trims surrounding whitespace and caps the
/// result at `max_chars` characters.
pub fn sanitize(value: &str, max_chars: usize) -> String {
    let stripped = RE_HTML_TAG.replace_all(value, "");
    let trimmed = stripped.trim();

    match trimmed.char_indices().nth(max_chars) {
        Some((end, _)) => trimmed[..end].to_owned(),
        None => trimmed.to_owned(),
    }
}

/// Sanitizes an optional field, treating absence as the empty string.
pub fn sanitize_opt(value: Option<&str>, max_chars: usize) -> String {
    value.map(|v| sanitize(v, max_chars)).unwrap_or_default()
}
