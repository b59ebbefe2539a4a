//! Whitespace and comment filter applied to raw HTML before parsing.
//!
//! This is not a sanitizer in the security sense. It only removes the
//! formatting noise of hand-written HTML so that indentation does not turn
//! into text nodes.

use std::sync::LazyLock;

use regex::Regex;

static REPEATED_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|\t|(?:\r?\n[ \t]*)+").unwrap());

/// Collapse runs of spaces, then strip comments, tabs and line breaks
/// together with the indentation that follows them.
pub fn sanitize_html(html: &str) -> String {
    let collapsed = REPEATED_SPACES.replace_all(html, " ");
    NOISE.replace_all(&collapsed, "").into_owned()
}

/// Check if text holds nothing but ASCII whitespace and NUL.
///
/// A non-breaking space counts as content.
pub fn is_blank(text: &str) -> bool {
    text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
        .is_empty()
}
