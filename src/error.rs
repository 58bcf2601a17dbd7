//! Error types for the websearch component
//!
//! Matching never fails; these errors only surface from registry edits,
//! icon import and URL launching.

use thiserror::Error;

/// Errors that can occur while managing or activating search engines
#[derive(Debug, Error)]
pub enum WebsearchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Engine list could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// No engine with the given id exists in the registry
    #[error("Unknown search engine: {0}")]
    UnknownEngine(String),

    /// An engine failed validation (e.g. empty name)
    #[error("Invalid search engine: {0}")]
    InvalidEngine(String),

    /// Icon import or discard errors
    #[error("Icon error: {0}")]
    Icon(String),

    /// Launch errors (failed to open a URL)
    #[error("Launch error: {0}")]
    Launch(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("Engine list parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for websearch operations
pub type WebsearchResult<T> = Result<T, WebsearchError>;
