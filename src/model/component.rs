//! Component types: the leaves of the document tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A rendered component, discriminated by its `component` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component")]
pub enum Component {
    /// Text block: paragraph, heading, quote, list item
    Paragraph(Paragraph),

    /// Unordered list of paragraphs
    List(List),

    /// Embedded media resolved from a URL
    Embedded(Embedded),

    /// Raw HTML passed through to the editor
    #[serde(rename = "HTML")]
    Html(Html),

    /// Output of a custom matcher, serialised as-is
    #[serde(untagged)]
    Custom(Map<String, Value>),
}

impl Component {
    /// Get the component's unique name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Component::Paragraph(p) => Some(p.name.as_str()),
            Component::List(l) => Some(l.name.as_str()),
            Component::Embedded(e) => Some(e.name.as_str()),
            Component::Html(h) => Some(h.name.as_str()),
            Component::Custom(map) => map.get("name").and_then(Value::as_str),
        }
    }

    /// Get the `component` discriminator as emitted in JSON.
    pub fn kind(&self) -> &str {
        match self {
            Component::Paragraph(_) => "Paragraph",
            Component::List(_) => "List",
            Component::Embedded(_) => "Embedded",
            Component::Html(_) => "HTML",
            Component::Custom(map) => map
                .get("component")
                .and_then(Value::as_str)
                .unwrap_or("Custom"),
        }
    }

    /// Get the paragraph, if this is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Component::Paragraph(p) => Some(p),
            _ => None,
        }
    }
}

/// A text component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Unique name
    pub name: String,

    /// Plain text content
    pub text: String,

    /// Placeholder shown by the editor; always null on conversion
    pub placeholder_text: Option<String>,

    /// Paragraph type, e.g. `p`, `h2`, `blockquote`, `li`
    pub paragraph_type: String,

    /// Inline formatting spans over `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<Format>>,
}

impl Paragraph {
    /// Create an unformatted paragraph.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        paragraph_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            placeholder_text: None,
            paragraph_type: paragraph_type.into(),
            formats: None,
        }
    }

    /// Attach formats; an empty list leaves the paragraph unformatted.
    pub fn with_formats(mut self, formats: Vec<Format>) -> Self {
        self.formats = if formats.is_empty() {
            None
        } else {
            Some(formats)
        };
        self
    }

    /// Get the formats, or an empty slice.
    pub fn formats(&self) -> &[Format] {
        self.formats.as_deref().unwrap_or(&[])
    }
}

/// An inline formatting span, in character offsets over the paragraph text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// Format type, e.g. `strong`, `em`, `a`
    #[serde(rename = "type")]
    pub format_type: String,

    /// Start offset (inclusive)
    pub from: usize,

    /// End offset (exclusive)
    pub to: usize,

    /// Extra attributes; only links carry them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<FormatAttrs>,
}

/// Attributes of a link format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatAttrs {
    /// Link target
    pub href: String,
}

/// An unordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Unique name
    pub name: String,

    /// Always `ul`
    pub tag_name: String,

    /// One paragraph component per list item
    pub components: Vec<Component>,
}

impl List {
    /// Create a `ul` list from its item paragraphs.
    pub fn new(name: impl Into<String>, items: Vec<Paragraph>) -> Self {
        Self {
            name: name.into(),
            tag_name: "ul".to_string(),
            components: items.into_iter().map(Component::Paragraph).collect(),
        }
    }

    /// Iterate over the item paragraphs.
    pub fn items(&self) -> impl Iterator<Item = &Paragraph> {
        self.components.iter().filter_map(Component::as_paragraph)
    }
}

/// Embedded media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embedded {
    /// Unique name
    pub name: String,

    /// Media URL
    pub url: String,

    /// Caption; always empty on conversion
    pub caption: String,

    /// Service resolving the embed for us (e.g. an oEmbed proxy)
    pub provider: Option<String>,

    /// Embed type: rich, video, link or image
    #[serde(rename = "type")]
    pub embed_type: Option<String>,

    /// Name of the media service, e.g. YouTube
    pub service_name: Option<String>,

    /// Available embed sizes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<EmbedSize>,
}

/// One available embed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Raw HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    /// Unique name
    pub name: String,

    /// Decoded HTML source
    pub html: String,
}
