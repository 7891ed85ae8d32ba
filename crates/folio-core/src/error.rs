//! Error types for Folio operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Folio crates. Uses `thiserror` for derive macros.

use std::path::Path;

use thiserror::Error;

/// Boxed error source carried by fetch failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in Folio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoPath {
        /// Path that was being read or written.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Page not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The CMS answered with a non-success status.
    #[error("CMS returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, or the status reason.
        message: String,
    },

    /// The request could not be completed or its body could not be decoded.
    #[error("Fetch failed: {message}")]
    Fetch {
        /// What was being attempted.
        message: String,
        /// Underlying transport or decode error.
        #[source]
        source: Option<BoxError>,
    },

    /// The `content_sections` payload could not be parsed.
    #[error("Section parse error: {0}")]
    SectionParse(String),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an HTTP status error.
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: msg.into(),
        }
    }

    /// Create a fetch error without an underlying source.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a fetch error wrapping the underlying transport error.
    pub fn fetch_with_source<E>(msg: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fetch {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a section parse error.
    pub fn section_parse(msg: impl Into<String>) -> Self {
        Self::SectionParse(msg.into())
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoPath {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Returns true if the CMS reported that the page does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Http { status: 404, .. })
    }

    /// Returns true if this error came from talking to the CMS
    /// (transport, status, or decode failure).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Http { .. } | Self::Fetch { .. }
        )
    }
}

/// Result type alias using Folio's Error type.
pub type Result<T> = std::result::Result<T, Error>;
