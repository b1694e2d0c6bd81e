//! Error types for the Studio client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Longest slice of a non-JSON body kept in the error message
const SNIPPET_LEN: usize = 120;

/// Errors that can occur when using the Studio client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response body was read
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a body that is not JSON (usually an HTML error page)
    #[error(
        "Server returned a non-JSON response (status {status}); the backend may be down or behind an error page: {snippet}"
    )]
    NonJson {
        /// HTTP status code
        status: u16,
        /// Start of the offending body
        snippet: String,
    },

    /// API returned an error status code with a JSON body
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Server answered `ok: false`
    #[error("Request rejected by server: {0}")]
    Rejected(String),

    /// JSON body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Base URL cannot carry the requested path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create a non-JSON error, keeping only the start of the body
    pub fn non_json(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let snippet = match trimmed.char_indices().nth(SNIPPET_LEN) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        };
        Self::NonJson { status, snippet }
    }

    /// Whether this error happened at the transport level
    ///
    /// Transport errors are the only ones a poll loop may ride out.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_json_truncates_body() {
        let body = format!("<html>{}</html>", "x".repeat(500));
        let err = ClientError::non_json(502, &body);

        match &err {
            ClientError::NonJson { status, snippet } => {
                assert_eq!(*status, 502);
                assert!(snippet.starts_with("<html>"));
                assert!(snippet.ends_with("..."));
                assert_eq!(snippet.chars().count(), SNIPPET_LEN + 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("non-JSON"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_only_request_failures_are_transport() {
        assert!(!ClientError::api_error(503, "busy").is_transport());
        assert!(!ClientError::Rejected("no".to_string()).is_transport());
        assert!(!ClientError::ParseError("bad".to_string()).is_transport());
    }
}
