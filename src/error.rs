//! Error types for html2carbon library.

use thiserror::Error;

/// Result type alias for html2carbon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HTML conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// The input has no document body, or the document root would have to
    /// become a section.
    #[error("Invalid HTML was provided: {0}")]
    InvalidInput(String),

    /// A section child carries text but no registered component claims it.
    #[error("No component loaded to render '{tag}' tags")]
    UnclassifiableElement {
        /// Reconstructed opening tag, including attributes
        tag: String,
    },

    /// A DOM operation violated a structural precondition.
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// Error during JSON rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
