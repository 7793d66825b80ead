//! Tool-name sanitization
//!
//! Providers only accept tool names matching `^[a-zA-Z0-9_-]+$`. Agent names
//! come from free-form config ("New York Agent!"), so they are rewritten
//! before an agent is exposed as a tool.

/// Name used when nothing survives sanitization.
pub const FALLBACK_TOOL_NAME: &str = "tool";

/// Make `name` acceptable as a provider tool name.
///
/// Spaces become underscores, every other character outside
/// `[A-Za-z0-9_-]` is dropped, and an empty result becomes
/// [`FALLBACK_TOOL_NAME`]. Case is preserved. Distinct names can map to the
/// same output; callers that care must detect the collision themselves.
pub fn sanitize_tool_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if sanitized.is_empty() {
        FALLBACK_TOOL_NAME.to_string()
    } else {
        sanitized
    }
}

/// Whether `name` already satisfies the provider constraint.
pub fn is_valid_tool_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
