//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Take the first `n` characters of a string.
///
/// Counts characters, not bytes, so result comparisons behave the same for
/// sensor dumps in any script.
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Preview of a step result for review screens and prompts.
///
/// Appends `...` only when the text was actually cut.
pub fn preview(s: &str, n: usize) -> String {
    let head = char_prefix(s, n);
    if head.len() < s.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}
