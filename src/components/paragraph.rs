//! Text components: paragraphs, headings, quotes, boxouts and lists.

use super::{default_layout_type, LayoutTypeFn, Matcher};
use crate::dom::Element;
use crate::error::Error;
use crate::id::IdSource;
use crate::model::{Component, Format, FormatAttrs, List, Paragraph};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Layout type of boxout layouts.
pub const BOXOUT_LAYOUT_TYPE: &str = "boxout";

/// Attribute marking a `div` as a boxout.
const BOXOUT_ATTRIBUTE: &str = "data-boxout";

const PARAGRAPH_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "code",
    "ul",
    "div",
];

/// Highest heading level the target editor toolbar offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimumHeading {
    /// Only `h1` headings
    H1,
    /// `h1` and `h2`
    H2,
    /// `h1` to `h3`
    #[default]
    H3,
}

impl MinimumHeading {
    /// Tag name of this heading level.
    pub fn as_str(&self) -> &'static str {
        match self {
            MinimumHeading::H1 => "h1",
            MinimumHeading::H2 => "h2",
            MinimumHeading::H3 => "h3",
        }
    }
}

impl fmt::Display for MinimumHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MinimumHeading {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h1" => Ok(MinimumHeading::H1),
            "h2" => Ok(MinimumHeading::H2),
            "h3" => Ok(MinimumHeading::H3),
            other => Err(Error::Other(format!(
                "Invalid minimum heading '{}': expected h1, h2 or h3",
                other
            ))),
        }
    }
}

/// Configuration of the [`ParagraphMatcher`].
#[derive(Clone)]
pub struct ParagraphConfig {
    /// Heading clamp applied to `h2`..`h6`
    pub minimum_heading: MinimumHeading,

    /// Inline tag name → emitted format type
    pub formatting_tags: BTreeMap<String, String>,

    /// Layout type for non-boxout layouts
    pub layout_type: LayoutTypeFn,
}

impl ParagraphConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading clamp.
    pub fn with_minimum_heading(mut self, heading: MinimumHeading) -> Self {
        self.minimum_heading = heading;
        self
    }

    /// Add or override one formatting tag.
    pub fn with_formatting_tag(
        mut self,
        tag: impl Into<String>,
        format_type: impl Into<String>,
    ) -> Self {
        self.formatting_tags
            .insert(tag.into().to_ascii_lowercase(), format_type.into());
        self
    }

    /// Stop recognising a formatting tag.
    pub fn without_formatting_tag(mut self, tag: &str) -> Self {
        self.formatting_tags.remove(&tag.to_ascii_lowercase());
        self
    }

    /// Replace the whole formatting table.
    pub fn with_formatting_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.formatting_tags = tags;
        self
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

impl Default for ParagraphConfig {
    fn default() -> Self {
        let formatting_tags = [
            ("a", "a"),
            ("strong", "strong"),
            ("em", "em"),
            ("s", "s"),
            ("u", "u"),
            ("b", "strong"),
            ("i", "em"),
            ("ins", "u"),
            ("del", "s"),
        ]
        .into_iter()
        .map(|(tag, format)| (tag.to_string(), format.to_string()))
        .collect();

        Self {
            minimum_heading: MinimumHeading::default(),
            formatting_tags,
            layout_type: default_layout_type(),
        }
    }
}

impl fmt::Debug for ParagraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParagraphConfig")
            .field("minimum_heading", &self.minimum_heading)
            .field("formatting_tags", &self.formatting_tags)
            .finish_non_exhaustive()
    }
}

/// Matches text blocks, boxout `div`s and `ul` lists.
#[derive(Debug, Clone, Default)]
pub struct ParagraphMatcher {
    config: ParagraphConfig,
}

impl ParagraphMatcher {
    /// Create a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom configuration.
    pub fn with_config(config: ParagraphConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ParagraphConfig {
        &self.config
    }

    /// Map a tag name to the editor's paragraph type.
    pub fn paragraph_type(&self, tag: &str) -> String {
        let minimum = self.config.minimum_heading;
        match tag {
            "h2" => {
                if minimum == MinimumHeading::H1 {
                    "h1".to_string()
                } else {
                    "h2".to_string()
                }
            }
            "h3" | "h4" | "h5" | "h6" => {
                if minimum != MinimumHeading::H3 {
                    minimum.as_str().to_string()
                } else {
                    "h3".to_string()
                }
            }
            "code" => "blockquote".to_string(),
            other => other.to_string(),
        }
    }

    /// Collect formatting spans from the element's direct children.
    ///
    /// Offsets come from the first occurrence of each child's text in the
    /// parent text, so two spans over identical text both point at the
    /// first occurrence.
    pub fn detect_formatting(&self, element: &Element<'_>) -> Vec<Format> {
        if !element.has_children() {
            return Vec::new();
        }

        let context = element.value();
        let mut formats = Vec::new();

        for node in element.children() {
            if node.is_text() {
                continue;
            }
            let Some(format_type) = self.config.formatting_tags.get(node.tag_name()) else {
                continue;
            };

            let text = node.value();
            if text.is_empty() {
                continue;
            }

            let Some((from, to)) = text_position(&context, &text) else {
                log::debug!("Format text {:?} not found in {:?}", text, context);
                continue;
            };

            let attrs = (format_type == "a").then(|| FormatAttrs {
                href: node.attribute("href").to_string(),
            });

            formats.push(Format {
                format_type: format_type.clone(),
                from,
                to,
                attrs,
            });
        }

        formats
    }

    fn make_paragraph(&self, element: &Element<'_>, ids: &dyn IdSource) -> Paragraph {
        Paragraph::new(
            ids.next_id(),
            element.value(),
            self.paragraph_type(element.tag_name()),
        )
        .with_formats(self.detect_formatting(element))
    }

    fn make_list(&self, element: &Element<'_>, ids: &dyn IdSource) -> List {
        let name = ids.next_id();
        let items = element
            .children()
            .iter()
            .filter(|item| !item.is_whitespace())
            .map(|item| self.make_paragraph(item, ids))
            .collect();
        List::new(name, items)
    }
}

impl Matcher for ParagraphMatcher {
    fn kind(&self) -> &str {
        "Paragraph"
    }

    fn tags(&self) -> &[&str] {
        PARAGRAPH_TAGS
    }

    fn matches(&self, element: &Element<'_>) -> bool {
        match element.tag_name() {
            "ul" => element.has_children(),
            "div" => element.attribute(BOXOUT_ATTRIBUTE) == "true",
            tag => PARAGRAPH_TAGS.contains(&tag),
        }
    }

    fn requires_new_layout(&self, element: &Element<'_>) -> bool {
        !element.attribute(BOXOUT_ATTRIBUTE).is_empty()
    }

    fn layout_type(&self, element: &Element<'_>) -> String {
        if element.attribute(BOXOUT_ATTRIBUTE) == "true" {
            BOXOUT_LAYOUT_TYPE.to_string()
        } else {
            (self.config.layout_type)(element)
        }
    }

    fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component {
        if element.tag_name() == "ul" {
            Component::List(self.make_list(element, ids))
        } else {
            Component::Paragraph(self.make_paragraph(element, ids))
        }
    }
}

/// Character offsets `(from, to)` of the first occurrence of `text` in `context`.
pub fn text_position(context: &str, text: &str) -> Option<(usize, usize)> {
    let byte_offset = context.find(text)?;
    let from = context[..byte_offset].chars().count();
    Some((from, from + text.chars().count()))
}
