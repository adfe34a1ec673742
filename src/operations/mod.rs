//! Operations module provides the research commands run against Reddit

pub mod apps;
pub mod comments;
pub mod search;
pub mod search_all;

/// Treat empty or whitespace-only flag values as missing.
pub(crate) fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
