//! Splitting a composite target into URLs.

/// Split `target` on `|`, trimming whitespace and dropping empty segments.
pub fn split_target(target: &str) -> Vec<String> {
    target
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
