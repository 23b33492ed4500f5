// src/error.rs

//! Unified error handling for the sitemap generator.

use std::fmt;

use thiserror::Error;

/// Result type alias for sitemap operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// XML document rendering failed
    #[error("XML write error: {0}")]
    Xml(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider error with context
    #[error("Provider error for {context}: {message}")]
    Provider { context: String, message: String },

    /// Requested document does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Create an XML rendering error.
    pub fn xml(message: impl fmt::Display) -> Self {
        Self::Xml(message.to_string())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a provider error with context.
    pub fn provider(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Provider {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
