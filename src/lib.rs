//! # Reqtrace — a small traced HTTP request helper
//!
//! Reqtrace sends outbound HTTP requests across the common verbs and writes
//! a wire-level trace of every request/response pair. One execution path is
//! shared by all entry points, so payload placement, logging, and status
//! classification never diverge between verbs.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Seven verbs, one core**: GET, POST, PUT, DELETE, PATCH, HEAD and
//!   OPTIONS all normalize into the same internal request description.
//! - **Method-driven payload placement**: query-parameter methods (GET,
//!   DELETE, HEAD, OPTIONS) carry structured payloads in the URL;
//!   body-bearing methods (POST, PUT, PATCH) serialize them as JSON, or send
//!   raw string payloads verbatim.
//! - **Injected logging**: request and response blocks go through a
//!   [`WireLogger`] trait object (backed by `tracing` by default), so tests
//!   can capture or silence output.
//! - **Explicit configuration**: the `reqwest` client is built from an
//!   [`HttpConfig`] owned by the caller; TLS verification is on by default
//!   and skippable only by explicit opt-in.
//! - **Typed failures**: URL parse, serialization, transport (with timeouts
//!   split out) and non-2xx status errors are distinct [`HttpError`]
//!   variants; status errors carry the response body for diagnostics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reqtrace::{HttpConfig, RequestExecutor};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = RequestExecutor::new(&HttpConfig::default())?;
//!
//!     let mut query = HashMap::new();
//!     query.insert("id".to_string(), "42".to_string());
//!
//!     let response = executor
//!         .get("fetch item", "http://api.test/items", &query, &HashMap::new())
//!         .await?;
//!     println!("{}", response.body);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod executor;
pub mod request;
pub mod wire;

pub use config::{HttpConfig, HttpConfigBuilder, build_http_client_from_config};
pub use error::{HttpError, Result};
pub use executor::RequestExecutor;
pub use request::{HttpResponse, Method, Payload, RequestSpec};
pub use wire::{NullWireLogger, TracingWireLogger, WireLogger};
