//! Default Configuration Values
//!
//! Centralizes the default values used by `HttpConfig` so they are easy to
//! find, document, and adjust.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    ///
    /// The call fails with a timeout error once this elapses; without it a
    /// stalled server could block the caller indefinitely.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("reqtrace/", env!("CARGO_PKG_VERSION"));
}
