//! Request and response types
//!
//! `RequestSpec` is the uniform description every verb entry point normalizes
//! into before handing off to the shared executor. The payload is a tagged
//! variant so the structured and raw body paths cannot diverge.

use std::collections::HashMap;

/// HTTP methods supported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// Canonical uppercase name, as sent on the wire and logged.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether a structured payload belongs in the URL query string rather
    /// than the request body. Fixed by method semantics, never configurable.
    pub const fn carries_query_payload(&self) -> bool {
        matches!(self, Self::Get | Self::Delete | Self::Head | Self::Options)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Request payload variants.
///
/// `Structured` is merged into the query string on query-parameter methods
/// and JSON-serialized into the body on body-bearing methods. `Raw` is sent
/// verbatim as the body on body-bearing methods and placed nowhere on
/// query-parameter methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    Structured(serde_json::Map<String, serde_json::Value>),
    Raw(String),
    #[default]
    Empty,
}

impl Payload {
    /// Build a structured payload from a plain string-to-string query map.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        if query.is_empty() {
            return Self::Empty;
        }
        let map = query
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        Self::Structured(map)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Payload {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Structured(map)
    }
}

impl From<String> for Payload {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for Payload {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// Uniform internal request description shared by all verb entry points.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Human-readable label for the trace log, not sent on the wire.
    pub description: String,
    pub url: String,
    pub payload: Payload,
    pub headers: HashMap<String, String>,
}

impl RequestSpec {
    pub fn new(method: Method, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method,
            description: description.into(),
            url: url.into(),
            payload: Payload::Empty,
            headers: HashMap::new(),
        }
    }

    pub fn payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// A classified successful response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Status classification per the [200, 300) convention.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
