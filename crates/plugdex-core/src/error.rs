//! Error types for plugdex.
//!
//! Failures are converted to fallback values at the loader boundary; these
//! types travel between the fetch, cache, and render layers underneath it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plugdex operations.
#[derive(Debug, Error)]
pub enum PlugdexError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for plugdex operations.
pub type Result<T> = std::result::Result<T, PlugdexError>;

// Conversion implementations for common error types

impl From<std::io::Error> for PlugdexError {
    fn from(err: std::io::Error) -> Self {
        PlugdexError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for PlugdexError {
    fn from(err: serde_json::Error) -> Self {
        PlugdexError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for PlugdexError {
    fn from(err: reqwest::Error) -> Self {
        PlugdexError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl PlugdexError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        PlugdexError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// True for failures the loader may paper over with a stale snapshot.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            PlugdexError::Network { .. } | PlugdexError::Http { .. } | PlugdexError::Json { .. }
        )
    }
}
