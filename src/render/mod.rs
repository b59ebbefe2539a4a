//! Rendering module for serialising converted documents.

mod json;

pub use json::{to_json, to_value, JsonFormat};
