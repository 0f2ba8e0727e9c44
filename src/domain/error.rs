//! Error types for blog search operations.
//!
//! This module defines the search failure type [`SearchFailed`], the crate-wide
//! error type [`BlogSearchError`], and a [`Result`] alias. All errors are
//! implemented using the `thiserror` crate.

use thiserror::Error;

/// The single failure kind a search can produce.
///
/// Network failures, unexpected HTTP statuses, malformed responses and invalid
/// request URLs all collapse into this type. The `reason` is a human-readable
/// description meant for logs and alert details, not for matching on.
///
/// # Examples
///
/// ```
/// use blogsearch::SearchFailed;
///
/// let failure = SearchFailed::invalid_json("expected value at line 1");
/// assert!(failure.reason.starts_with("invalid JSON"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("search failed: {reason}")]
pub struct SearchFailed {
    /// Description of what went wrong.
    pub reason: String,
}

impl SearchFailed {
    /// Creates a failure with a free-form reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The request URL could not be built from the endpoint and query.
    #[must_use]
    pub fn invalid_url(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("invalid URL: {detail}"))
    }

    /// The transport failed before a response body was read.
    #[must_use]
    pub fn network(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("network error: {detail}"))
    }

    /// The API answered with a non-success status.
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::new(format!("unexpected status {status}: {body}"))
    }

    /// The response body was not the expected JSON document.
    #[must_use]
    pub fn invalid_json(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("invalid JSON: {detail}"))
    }
}

/// The main error type for blog search operations.
///
/// Search failures never surface here: the pipeline turns them into alerts.
/// These variants cover setup and runtime plumbing.
#[derive(Debug, Error)]
pub enum BlogSearchError {
    /// Configuration is invalid or missing.
    ///
    /// Occurs when required values such as the API key are absent or when a
    /// configuration file cannot be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication with the search worker failed.
    ///
    /// Occurs when the worker's response channel is closed or a search task
    /// could not be joined.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for blog search operations.
pub type Result<T> = std::result::Result<T, BlogSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_failure_display_includes_reason() {
        assert_eq!(
            SearchFailed::network("connection reset").to_string(),
            "search failed: network error: connection reset"
        );
    }

    #[test]
    fn status_failure_keeps_body() {
        let failure = SearchFailed::status(401, "{\"errorType\":\"AccessDeniedError\"}");
        assert!(failure.reason.contains("401"));
        assert!(failure.reason.contains("AccessDeniedError"));
    }
}
