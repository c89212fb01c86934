//! Query normalization applied before any rule runs.

/// Lower-case and collapse every whitespace run to a single space.
pub fn normalize(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The last `max_chars` characters of `text[..end]`, on a char boundary.
pub fn window_before(text: &str, end: usize, max_chars: usize) -> &str {
    let end = end.min(text.len());
    let head = match text.get(..end) {
        Some(head) => head,
        None => return "",
    };
    let start = head
        .char_indices()
        .rev()
        .nth(max_chars.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    &head[start..]
}

/// The first `max_chars` characters of `text[start..]`, on a char boundary.
pub fn window_after(text: &str, start: usize, max_chars: usize) -> &str {
    let tail = match text.get(start.min(text.len())..) {
        Some(tail) => tail,
        None => return "",
    };
    let end = tail
        .char_indices()
        .nth(max_chars)
        .map_or(tail.len(), |(i, _)| i);
    &tail[..end]
}
