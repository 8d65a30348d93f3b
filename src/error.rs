//! Error types for reqtrace
//!
//! Every failure a request can hit maps to one `HttpError` variant. Nothing
//! is retried and nothing is swallowed: each variant is returned directly to
//! the caller of the entry point that triggered it.

use thiserror::Error;

/// Errors produced while building, dispatching, or classifying a request.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The destination URL could not be parsed. Raised before any logging or
    /// network activity.
    #[error("invalid destination URL: {0}")]
    InvalidUrl(String),

    /// A structured payload could not be encoded to JSON.
    #[error("failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request timed out before a response arrived.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Network-level failure: DNS, connection refused, TLS handshake, or a
    /// broken connection while reading the body.
    #[error("connection error: {0}")]
    Connection(String),

    /// A response arrived but its status code was outside [200, 300).
    /// Carries the full response body, which was already read and logged.
    #[error("received non-2xx response code: {code}, response: {body}")]
    Status { code: u16, body: String },

    /// Invalid client or request configuration (bad proxy URL, header name
    /// or value that cannot go on the wire).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HttpError {
    /// HTTP status code for `Status` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Response body carried by a `Status` error.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Whether this is a transport timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Result type for reqtrace operations
pub type Result<T> = std::result::Result<T, HttpError>;
