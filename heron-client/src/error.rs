//! Client error types

use thiserror::Error;

/// Client error type
///
/// HTTP-layer failures map onto fixed categories (400/401/403/404/500);
/// a well-formed envelope with a non-success code becomes [`ClientError::Business`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed or shape-violating response body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (HTTP 401)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (HTTP 403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business failure reported inside a successful HTTP response
    #[error("Business error {code}: {message}")]
    Business { code: i32, message: String },

    /// Server-side or unclassified failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation requires a logged-in session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Token storage I/O failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether this failure invalidates the current session
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized | ClientError::Business { code: 401, .. }
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
