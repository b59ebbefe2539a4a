//! Raw HTML: `<div data-special="html">&lt;iframe ...&gt;</div>`.

use super::{default_layout_type, LayoutTypeFn, Matcher, SPECIAL_ATTRIBUTE};
use crate::dom::Element;
use crate::id::IdSource;
use crate::model::{Component, Html};
use quick_xml::escape::resolve_html5_entity;
use std::fmt;
use std::sync::Arc;

/// `data-special` value marking raw HTML.
pub const HTML_MARKER: &str = "html";

/// Configuration of the [`HtmlMatcher`].
#[derive(Clone)]
pub struct HtmlConfig {
    /// Layout type for layouts opened by raw HTML
    pub layout_type: LayoutTypeFn,
}

impl HtmlConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout-type callback.
    pub fn with_layout_type<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Element<'_>) -> String + Send + Sync + 'static,
    {
        self.layout_type = Arc::new(callback);
        self
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            layout_type: default_layout_type(),
        }
    }
}

impl fmt::Debug for HtmlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlConfig").finish_non_exhaustive()
    }
}

/// Matches `div`s marked as raw HTML. The element text, entity-decoded, is
/// the HTML source.
#[derive(Debug, Clone, Default)]
pub struct HtmlMatcher {
    config: HtmlConfig,
}

impl HtmlMatcher {
    /// Create a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom configuration.
    pub fn with_config(config: HtmlConfig) -> Self {
        Self { config }
    }
}

impl Matcher for HtmlMatcher {
    fn kind(&self) -> &str {
        "HTML"
    }

    fn tags(&self) -> &[&str] {
        &["div"]
    }

    fn matches(&self, element: &Element<'_>) -> bool {
        element.tag_name() == "div" && element.attribute(SPECIAL_ATTRIBUTE) == HTML_MARKER
    }

    fn requires_new_layout(&self, _element: &Element<'_>) -> bool {
        true
    }

    fn layout_type(&self, element: &Element<'_>) -> String {
        (self.config.layout_type)(element)
    }

    fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component {
        Component::Html(Html {
            name: ids.next_id(),
            html: decode_entities(&element.value()),
        })
    }
}

// Upper bound on the `;` offset; the longest HTML5 entity name has 31 characters.
const MAX_REFERENCE_LEN: usize = 33;

/// Decode HTML character references: every HTML5 named entity plus
/// decimal and hex numeric ones. Unknown references are left untouched.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let end = rest.find(';').filter(|end| *end <= MAX_REFERENCE_LEN);

        match end.and_then(|end| push_reference(&mut out, &rest[1..end]).then_some(end)) {
            Some(end) => rest = &rest[end + 1..],
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn push_reference(out: &mut String, reference: &str) -> bool {
    if let Some(numeric) = reference.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse().ok(),
        };
        return match code.and_then(char::from_u32) {
            Some(c) => {
                out.push(c);
                true
            }
            None => false,
        };
    }

    match resolve_html5_entity(reference) {
        Some(text) => {
            out.push_str(text);
            true
        }
        None => false,
    }
}
