//! # html2carbon
//!
//! Convert article HTML into the JSON document model of the Carbon block
//! editor.
//!
//! The flat stream of block elements in an HTML body is carved into
//! *sections*; each section's children are classified by component
//! matchers and grouped into *layouts* of typed *components* (paragraphs,
//! lists, embeds, raw HTML).
//!
//! ## Quick Start
//!
//! ```
//! fn main() -> html2carbon::Result<()> {
//!     let json = html2carbon::convert("<p>Hello <strong>world</strong></p>")?;
//!
//!     let value: serde_json::Value = serde_json::from_str(&json).unwrap();
//!     let paragraph = &value["sections"][0]["components"][0]["components"][0];
//!     assert_eq!(paragraph["text"], "Hello world");
//!     assert_eq!(paragraph["formats"][0]["from"], 6);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Section extraction**: innermost-first carving of the body into sections
//! - **Pluggable components**: ordered [`ComponentRegistry`] of [`Matcher`]s
//! - **Inline formatting**: links and emphasis become character-offset spans
//! - **Injectable ids**: random by default, sequential for reproducible output
//! - **Parallel batches**: independent documents convert on Rayon's pool

pub mod components;
pub mod convert;
pub mod dom;
pub mod error;
pub mod id;
pub mod model;
pub mod render;
pub mod sanitize;

// Re-export commonly used types
pub use components::{
    ComponentRegistry, EmbedConfig, EmbedMatcher, HtmlConfig, HtmlMatcher, Matcher,
    MinimumHeading, ParagraphConfig, ParagraphMatcher, ProviderInfo,
};
pub use convert::{ConvertOptions, Converter};
pub use error::{Error, Result};
pub use id::{IdSource, RandomIds, SequentialIds};
pub use model::{Component, Document, Layout, Section};
pub use render::JsonFormat;

/// Convert HTML to Carbon JSON with the default options and components.
///
/// Empty or whitespace-only input yields an empty string.
///
/// # Example
///
/// ```
/// let json = html2carbon::convert("<h2>Title</h2>").unwrap();
/// assert!(json.contains("\"paragraphType\":\"h2\""));
///
/// assert_eq!(html2carbon::convert("  ").unwrap(), "");
/// ```
pub fn convert(html: &str) -> Result<String> {
    Converter::new().convert(html)
}

/// Convert HTML to Carbon JSON with custom options.
///
/// # Example
///
/// ```
/// use html2carbon::{convert_with_options, ConvertOptions};
///
/// let json = convert_with_options("<p>Hi</p>", ConvertOptions::new().pretty()).unwrap();
/// assert!(json.contains('\n'));
/// ```
pub fn convert_with_options(html: &str, options: ConvertOptions) -> Result<String> {
    Converter::with_options(options).convert(html)
}
