//! Shared string helpers.

/// Truncate `s` to at most `max_bytes`, backing up to a UTF-8 boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Like [`truncate_str`] but marks the cut with `...`.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let cut = truncate_str(s, max_bytes);
    if cut.len() < s.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}
