// src/error.rs

//! Unified error handling for the watcher application.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Page fetch failed (listing or detail page)
    #[error("Fetch error for {context}: {message}")]
    Fetch { context: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
