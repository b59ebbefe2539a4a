//! Component matchers: classify section children and render them.
//!
//! A [`Matcher`] recognises the elements of one component type and renders
//! them into [`Component`] JSON. Matchers are tried in registration order
//! through a [`ComponentRegistry`]; the first one that claims an element
//! wins.
//!
//! Matchers are stateless. A successful match is returned as a [`Matched`]
//! value binding the matcher to the element, so the same matcher instance
//! can serve any number of elements (and threads) without interference.
//!
//! # Example
//!
//! ```
//! use html2carbon::components::{ComponentRegistry, Matcher};
//! use html2carbon::dom::Element;
//! use html2carbon::id::IdSource;
//! use html2carbon::model::{Component, Html};
//! use std::sync::Arc;
//!
//! /// Renders `<figure>` elements as raw HTML.
//! struct FigureMatcher;
//!
//! impl Matcher for FigureMatcher {
//!     fn kind(&self) -> &str {
//!         "Figure"
//!     }
//!
//!     fn tags(&self) -> &[&str] {
//!         &["figure"]
//!     }
//!
//!     fn layout_type(&self, _element: &Element<'_>) -> String {
//!         "layout-single-column".to_string()
//!     }
//!
//!     fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component {
//!         Component::Html(Html { name: ids.next_id(), html: element.value() })
//!     }
//! }
//!
//! let mut registry = ComponentRegistry::with_defaults();
//! registry.register("figure", Arc::new(FigureMatcher));
//! assert_eq!(registry.names(), vec!["paragraph", "embed", "html", "figure"]);
//! ```

mod embed;
mod html;
mod paragraph;

pub use embed::{EmbedConfig, EmbedMatcher, ProviderFn, ProviderInfo, EMBED_MARKER};
pub use html::{decode_entities, HtmlConfig, HtmlMatcher, HTML_MARKER};
pub use paragraph::{
    text_position, MinimumHeading, ParagraphConfig, ParagraphMatcher, BOXOUT_LAYOUT_TYPE,
};

use crate::dom::Element;
use crate::id::IdSource;
use crate::model::{Component, Layout};
use std::sync::Arc;

/// Layout type used when no callback decides otherwise.
pub const DEFAULT_LAYOUT_TYPE: &str = "layout-single-column";

/// Attribute carrying the embed / raw-HTML marker on a `div`.
pub const SPECIAL_ATTRIBUTE: &str = "data-special";

/// Computes a layout type for the element that opens a layout.
pub type LayoutTypeFn = Arc<dyn Fn(&Element<'_>) -> String + Send + Sync>;

/// Layout-type callback that always answers [`DEFAULT_LAYOUT_TYPE`].
pub fn default_layout_type() -> LayoutTypeFn {
    Arc::new(|_| DEFAULT_LAYOUT_TYPE.to_string())
}

/// Classifier and renderer for one component type.
///
/// Implement this trait to add support for a new component.
pub trait Matcher: Send + Sync {
    /// Component type used for layout grouping. Consecutive components of
    /// different kinds never share a layout.
    fn kind(&self) -> &str;

    /// Tag names this matcher can service.
    fn tags(&self) -> &[&str];

    /// Check whether this matcher claims the element.
    fn matches(&self, element: &Element<'_>) -> bool {
        self.tags().contains(&element.tag_name())
    }

    /// Check whether a claimed element has nothing to render: its text is
    /// empty or the single digit `"0"`.
    fn is_empty(&self, element: &Element<'_>) -> bool {
        matches!(element.value().as_str(), "" | "0")
    }

    /// Whether the element must open a new layout even after a component of
    /// the same kind.
    fn requires_new_layout(&self, element: &Element<'_>) -> bool {
        let _ = element;
        false
    }

    /// Layout type for a layout opened by this element.
    fn layout_type(&self, element: &Element<'_>) -> String;

    /// Create a fresh, empty layout for this element.
    fn layout(&self, element: &Element<'_>, ids: &dyn IdSource) -> Layout {
        Layout::new(ids.next_id(), self.layout_type(element))
    }

    /// Render the element. Must not depend on anything but the element and
    /// the matcher's configuration.
    fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component;
}

/// A matcher bound to the element it claimed.
#[derive(Clone, Copy)]
pub struct Matched<'r, 'a> {
    name: &'r str,
    matcher: &'r dyn Matcher,
    element: Element<'a>,
}

impl<'r, 'a> Matched<'r, 'a> {
    /// Registry name of the matcher.
    pub fn name(&self) -> &'r str {
        self.name
    }

    /// Component kind of the matcher.
    pub fn kind(&self) -> &'r str {
        self.matcher.kind()
    }

    /// The claimed element.
    pub fn element(&self) -> Element<'a> {
        self.element
    }

    /// See [`Matcher::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty(&self.element)
    }

    /// See [`Matcher::requires_new_layout`].
    pub fn requires_new_layout(&self) -> bool {
        self.matcher.requires_new_layout(&self.element)
    }

    /// See [`Matcher::layout`].
    pub fn layout(&self, ids: &dyn IdSource) -> Layout {
        self.matcher.layout(&self.element, ids)
    }

    /// See [`Matcher::render`].
    pub fn render(&self, ids: &dyn IdSource) -> Component {
        self.matcher.render(&self.element, ids)
    }
}

/// Ordered set of named matchers.
///
/// Registration order is match priority. Registering under an existing
/// name replaces that matcher in place, keeping its priority.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    matchers: Vec<(String, Arc<dyn Matcher>)>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the default matchers: paragraph, embed, html.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("paragraph", Arc::new(ParagraphMatcher::new()))
            .register("embed", Arc::new(EmbedMatcher::new()))
            .register("html", Arc::new(HtmlMatcher::new()));
        registry
    }

    /// Add or replace a matcher.
    pub fn register(&mut self, name: impl Into<String>, matcher: Arc<dyn Matcher>) -> &mut Self {
        let name = name.into();
        if let Some(position) = self.matchers.iter().position(|(n, _)| *n == name) {
            self.matchers[position].1 = matcher;
        } else {
            self.matchers.push((name, matcher));
        }
        self
    }

    /// Remove a matcher by name, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Matcher>> {
        let position = self.matchers.iter().position(|(n, _)| n == name)?;
        Some(self.matchers.remove(position).1)
    }

    /// Get a matcher by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Matcher>> {
        self.matchers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m.clone())
    }

    /// Registered names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.matchers.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of registered matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Check if no matcher is registered.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Find the first matcher, in priority order, that claims the element.
    pub fn find<'r, 'a>(&'r self, element: Element<'a>) -> Option<Matched<'r, 'a>> {
        self.matchers
            .iter()
            .find(|(_, matcher)| matcher.matches(&element))
            .map(|(name, matcher)| Matched {
                name: name.as_str(),
                matcher: matcher.as_ref(),
                element,
            })
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("matchers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;
    use crate::id::SequentialIds;

    struct Stub(&'static str);

    impl Matcher for Stub {
        fn kind(&self) -> &str {
            self.0
        }

        fn tags(&self) -> &[&str] {
            &["p"]
        }

        fn layout_type(&self, _element: &Element<'_>) -> String {
            "stub".to_string()
        }

        fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component {
            Component::Html(crate::model::Html {
                name: ids.next_id(),
                html: element.value(),
            })
        }
    }

    #[test]
    fn test_default_order() {
        let registry = ComponentRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["paragraph", "embed", "html"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ComponentRegistry::with_defaults();
        registry.register("paragraph", Arc::new(Stub("Stub")));
        assert_eq!(registry.names(), vec!["paragraph", "embed", "html"]);
        assert_eq!(registry.get("paragraph").unwrap().kind(), "Stub");
    }

    #[test]
    fn test_first_match_wins() {
        let parsed = parse_document("<p>x</p>");
        let p = parsed.dom.find_first(parsed.dom.root(), "p").unwrap();
        let element = parsed.dom.element(p);

        let mut registry = ComponentRegistry::new();
        registry
            .register("first", Arc::new(Stub("First")))
            .register("second", Arc::new(Stub("Second")));

        let matched = registry.find(element).unwrap();
        assert_eq!(matched.name(), "first");
        assert_eq!(matched.kind(), "First");

        registry.remove("first");
        assert_eq!(registry.find(element).unwrap().kind(), "Second");
    }

    #[test]
    fn test_matched_delegates() {
        let parsed = parse_document("<p>x</p>");
        let p = parsed.dom.find_first(parsed.dom.root(), "p").unwrap();
        let registry = {
            let mut r = ComponentRegistry::new();
            r.register("stub", Arc::new(Stub("Stub")));
            r
        };
        let ids = SequentialIds::new();

        let matched = registry.find(parsed.dom.element(p)).unwrap();
        assert!(!matched.is_empty());
        assert!(!matched.requires_new_layout());
        let layout = matched.layout(&ids);
        assert_eq!(layout.layout_type, "stub");
        assert_eq!(layout.name, "00000001");
        assert_eq!(matched.render(&ids).name(), Some("00000002"));
    }

    #[test]
    fn test_zero_text_is_empty() {
        let parsed = parse_document("<p>0</p><p>00</p><p> 0</p>");
        let body = parsed.dom.element(parsed.body().unwrap());
        let stub = Stub("Stub");

        let empty: Vec<bool> = body.children().iter().map(|p| stub.is_empty(p)).collect();
        assert_eq!(empty, vec![true, false, false]);
    }

    #[test]
    fn test_no_match() {
        let parsed = parse_document("<span>x</span>");
        let span = parsed.dom.find_first(parsed.dom.root(), "span").unwrap();
        let registry = ComponentRegistry::with_defaults();
        assert!(registry.find(parsed.dom.element(span)).is_none());
    }
}
