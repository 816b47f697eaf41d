/// Pure string processing utilities

/// Trim and normalize whitespace in a string
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Return the trimmed value if it is present and not blank
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

/// Case-insensitive substring check
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Escape LIKE wildcards so the text is matched literally
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%needle%` LIKE pattern with wildcards in the needle escaped
pub fn like_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}
