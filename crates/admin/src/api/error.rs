//! API client errors.

use thiserror::Error;

/// Fallback message used when an error body can't be parsed.
pub(crate) const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, bad TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the server-supplied `message` field when the error body
    /// parsed, or a generic fallback when it didn't.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A 2xx response body failed to parse.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Extract the `message` field from a backend error body.
///
/// The backend reports errors as `{"message": "..."}`; anything else
/// (HTML error pages, truncated bodies) yields `None` and callers fall back
/// to [`UNKNOWN_ERROR_MESSAGE`].
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
}
