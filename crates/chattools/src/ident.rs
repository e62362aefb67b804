//! Canonical video identifier extraction

use regex::Regex;
use std::sync::LazyLock;

/// An already-canonical 11-character video id
static CANONICAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Known watch-page URL shapes, in priority order. The capture ends at the
/// first `#`, `&`, or `?`, which is where share links append extra parameters.
static URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*(?:youtu\.be/|v/|vi/|u/\w/|embed/|shorts/|(?:watch)?\?vi?=|&vi?=)([^#&?]*).*$",
    )
    .unwrap()
});

/// True if `input` is already a canonical 11-character video id.
pub fn is_canonical_id(input: &str) -> bool {
    CANONICAL_ID.is_match(input)
}

/// Extract the canonical video id from a URL or bare id.
///
/// Total over non-empty input: unrecognized strings come back verbatim, so
/// callers must treat an unchanged result as "extraction failed silently"
/// rather than an error.
pub fn extract_video_id(input: &str) -> String {
    if is_canonical_id(input) {
        return input.to_string();
    }

    if let Some(id) = URL_ID
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
    {
        return id.to_string();
    }

    input.to_string()
}
