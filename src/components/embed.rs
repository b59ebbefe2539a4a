//! Embedded media: `<div data-special="embed">URL</div>`.

use super::{default_layout_type, LayoutTypeFn, Matcher, SPECIAL_ATTRIBUTE};
use crate::dom::Element;
use crate::id::IdSource;
use crate::model::{Component, EmbedSize, Embedded};
use std::fmt;
use std::sync::Arc;

/// `data-special` value marking an embed.
pub const EMBED_MARKER: &str = "embed";

/// Metadata resolved for an embed URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Service resolving the embed (e.g. an oEmbed proxy)
    pub provider: Option<String>,

    /// Embed type: rich, video, link or image
    pub embed_type: Option<String>,

    /// Media service name, e.g. YouTube
    pub service_name: Option<String>,

    /// Available sizes
    pub sizes: Vec<EmbedSize>,
}

/// Resolves provider metadata for an embed URL.
pub type ProviderFn = Arc<dyn Fn(&str) -> ProviderInfo + Send + Sync>;

/// Configuration of the [`EmbedMatcher`].
#[derive(Clone)]
pub struct EmbedConfig {
    /// Layout type for layouts opened by an embed
    pub layout_type: LayoutTypeFn,

    /// Provider lookup, keyed by URL
    pub provider: ProviderFn,
}

impl EmbedConfig {
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

    /// Set the provider lookup.
    pub fn with_provider<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> ProviderInfo + Send + Sync + 'static,
    {
        self.provider = Arc::new(callback);
        self
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            layout_type: default_layout_type(),
            provider: Arc::new(|_| ProviderInfo::default()),
        }
    }
}

impl fmt::Debug for EmbedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedConfig").finish_non_exhaustive()
    }
}

/// Matches `div`s marked as embeds. The element text is the media URL.
#[derive(Debug, Clone, Default)]
pub struct EmbedMatcher {
    config: EmbedConfig,
}

impl EmbedMatcher {
    /// Create a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom configuration.
    pub fn with_config(config: EmbedConfig) -> Self {
        Self { config }
    }
}

impl Matcher for EmbedMatcher {
    fn kind(&self) -> &str {
        "Embedded"
    }

    fn tags(&self) -> &[&str] {
        &["div"]
    }

    fn matches(&self, element: &Element<'_>) -> bool {
        element.tag_name() == "div" && element.attribute(SPECIAL_ATTRIBUTE) == EMBED_MARKER
    }

    fn requires_new_layout(&self, _element: &Element<'_>) -> bool {
        true
    }

    fn layout_type(&self, element: &Element<'_>) -> String {
        (self.config.layout_type)(element)
    }

    fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component {
        let url = element.value();
        let info = (self.config.provider)(&url);

        Component::Embedded(Embedded {
            name: ids.next_id(),
            url,
            caption: String::new(),
            provider: info.provider,
            embed_type: info.embed_type,
            service_name: info.service_name,
            sizes: info.sizes,
        })
    }
}
