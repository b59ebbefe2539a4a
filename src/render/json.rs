//! JSON rendering for Carbon documents.

use crate::error::{Error, Result};
use crate::model::Document;
use std::fmt;
use std::str::FromStr;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    Pretty,
    /// Compact JSON without extra whitespace
    #[default]
    Compact,
}

impl fmt::Display for JsonFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonFormat::Pretty => f.write_str("pretty"),
            JsonFormat::Compact => f.write_str("compact"),
        }
    }
}

impl FromStr for JsonFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(JsonFormat::Pretty),
            "compact" => Ok(JsonFormat::Compact),
            other => Err(Error::Other(format!("Unknown JSON format: {}", other))),
        }
    }
}

/// Convert a document to a JSON string.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a document to a JSON value tree.
pub fn to_value(doc: &Document) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(doc)?)
}
