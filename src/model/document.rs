//! Document, section and layout types.

use super::Component;
use serde::{Deserialize, Serialize};

/// Tag name every layout is rendered with.
pub const DEFAULT_LAYOUT_TAG: &str = "div";

/// A converted document: `{ "sections": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Sections in source order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Iterate over every component of every layout, in order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.sections
            .iter()
            .flat_map(|s| s.components.iter())
            .flat_map(|l| l.components.iter())
    }
}

/// One independently renderable block of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component")]
pub struct Section {
    /// Unique name
    pub name: String,

    /// Layouts in source order
    pub components: Vec<Layout>,
}

impl Section {
    /// Create a section from finished layouts.
    pub fn new(name: impl Into<String>, components: Vec<Layout>) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }

    /// Get the layouts of this section.
    pub fn layouts(&self) -> &[Layout] {
        &self.components
    }
}

/// A run of components sharing one visual arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "camelCase")]
pub struct Layout {
    /// Unique name
    pub name: String,

    /// HTML tag the editor renders the layout with
    pub tag_name: String,

    /// Layout type, e.g. `layout-single-column` or `boxout`
    #[serde(rename = "type")]
    pub layout_type: String,

    /// Components in source order
    pub components: Vec<Component>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new(name: impl Into<String>, layout_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag_name: DEFAULT_LAYOUT_TAG.to_string(),
            layout_type: layout_type.into(),
            components: Vec::new(),
        }
    }

    /// Append a component.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Check if the layout holds no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
