//! Output model for Carbon editor JSON.
//!
//! A [`Document`] holds [`Section`]s, each section holds [`Layout`]s and
//! each layout holds typed [`Component`]s. All types serialise to the exact
//! JSON shape the editor consumes.

mod component;
mod document;

pub use component::{
    Component, EmbedSize, Embedded, Format, FormatAttrs, Html, List, Paragraph,
};
pub use document::{Document, Layout, Section, DEFAULT_LAYOUT_TAG};
