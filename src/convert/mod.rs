//! HTML to Carbon JSON conversion.
//!
//! The [`Converter`] drives the pipeline: sanitize, parse, carve the body
//! into sections, classify each section's children through the
//! [`ComponentRegistry`] and group the rendered components into layouts.
//!
//! # Example
//!
//! ```
//! use html2carbon::convert::{ConvertOptions, Converter};
//! use html2carbon::components::{MinimumHeading, ParagraphConfig, ParagraphMatcher};
//! use std::sync::Arc;
//!
//! fn main() -> html2carbon::Result<()> {
//!     let paragraphs = ParagraphConfig::new().with_minimum_heading(MinimumHeading::H2);
//!
//!     let mut converter = Converter::with_options(ConvertOptions::new().pretty());
//!     converter.add_component("paragraph", Arc::new(ParagraphMatcher::with_config(paragraphs)));
//!
//!     let json = converter.convert("<h4>Intro</h4><p>Hello</p>")?;
//!     assert!(json.contains("\"paragraphType\": \"h2\""));
//!     Ok(())
//! }
//! ```

mod layout;
mod section;

pub use layout::{convert_section, LayoutAssembler};
pub use section::{extract_next, extract_sections, Extraction};

use crate::components::{ComponentRegistry, Matcher};
use crate::dom::parse_document;
use crate::error::{Error, Result};
use crate::id::{IdSource, RandomIds};
use crate::model::Document;
use crate::render::{self, JsonFormat};
use crate::sanitize::{is_blank, sanitize_html};
use rayon::prelude::*;
use std::sync::Arc;

/// Options for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Swallow recoverable HTML parse errors instead of logging them
    pub suppress_errors: bool,

    /// Output JSON layout
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether parse errors are suppressed.
    pub fn with_suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    /// Set the JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Pretty-print the output.
    pub fn pretty(self) -> Self {
        self.with_json_format(JsonFormat::Pretty)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            suppress_errors: true,
            json_format: JsonFormat::Compact,
        }
    }
}

/// HTML to Carbon JSON converter.
///
/// Configuration is fixed once conversion starts; a converter can be shared
/// across threads and every call works on its own DOM.
#[derive(Clone)]
pub struct Converter {
    options: ConvertOptions,
    registry: ComponentRegistry,
    ids: Arc<dyn IdSource>,
}

impl Converter {
    /// Create a converter with default options and components.
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create a converter with the default components.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            registry: ComponentRegistry::with_defaults(),
            ids: Arc::new(RandomIds::new()),
        }
    }

    /// Replace the component registry.
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the id source.
    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Add or override a component matcher.
    pub fn add_component(&mut self, name: impl Into<String>, matcher: Arc<dyn Matcher>) -> &mut Self {
        self.registry.register(name, matcher);
        self
    }

    /// Get the conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get the component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Convert HTML into a JSON string.
    ///
    /// Empty or whitespace-only input yields an empty string rather than an
    /// empty document. Whitespace here is the ASCII set of
    /// [`is_blank`](crate::sanitize::is_blank).
    pub fn convert(&self, html: &str) -> Result<String> {
        if is_blank(html) {
            return Ok(String::new());
        }

        let document = self.to_document(html)?;
        render::to_json(&document, self.options.json_format)
    }

    /// Convert HTML into a [`Document`].
    ///
    /// Empty or whitespace-only input yields a document with no sections.
    pub fn to_document(&self, html: &str) -> Result<Document> {
        let mut document = Document::new();
        if is_blank(html) {
            return Ok(document);
        }

        let mut parsed = parse_document(&sanitize_html(html));

        if !self.options.suppress_errors {
            for error in &parsed.errors {
                log::warn!("HTML parse error: {}", error);
            }
        }

        let body = parsed
            .body()
            .ok_or_else(|| Error::InvalidInput("no body element".into()))?;

        let sections = extract_sections(&mut parsed.dom, body)?;

        for section in sections {
            let element = parsed.dom.element(section);
            if let Some(converted) = convert_section(element, &self.registry, self.ids.as_ref())? {
                document.add_section(converted);
            }
        }

        log::debug!(
            "converted {} sections with {} components",
            document.section_count(),
            document.components().count()
        );
        Ok(document)
    }

    /// Convert several independent documents in parallel.
    ///
    /// Results are returned in input order.
    pub fn convert_batch(&self, documents: &[&str]) -> Vec<Result<String>> {
        documents.par_iter().map(|html| self.convert(html)).collect()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
