//! Request executor
//!
//! One shared execution path serves every verb entry point: parse the URL,
//! place the payload (query string or body, fixed by method semantics),
//! attach headers, log, dispatch once, read the whole body, log again, and
//! classify by status code. No retries; a single attempt is surfaced
//! directly to the caller.

use crate::config::{HttpConfig, build_http_client_from_config};
use crate::error::{HttpError, Result};
use crate::request::{HttpResponse, Method, Payload, RequestSpec};
use crate::wire::{TracingWireLogger, WireLogger};
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::sync::Arc;

/// Executes HTTP requests over an owned `reqwest::Client`, tracing each
/// request/response pair through an injected [`WireLogger`].
///
/// Cheap to clone; clones share the same connection pool and logger. All
/// methods are reentrant and may run concurrently across tasks.
#[derive(Clone)]
pub struct RequestExecutor {
    client: reqwest::Client,
    logger: Arc<dyn WireLogger>,
}

impl RequestExecutor {
    /// Build an executor from config with the default `tracing`-backed logger.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Self::with_logger(config, Arc::new(TracingWireLogger))
    }

    /// Build an executor from config with a caller-supplied logger.
    pub fn with_logger(config: &HttpConfig, logger: Arc<dyn WireLogger>) -> Result<Self> {
        Ok(Self {
            client: build_http_client_from_config(config)?,
            logger,
        })
    }

    /// Wrap an already-built client. Mostly useful in tests, where the
    /// client and logger both need to be controlled.
    pub fn from_client(client: reqwest::Client, logger: Arc<dyn WireLogger>) -> Self {
        Self { client, logger }
    }

    /// GET request; `query` is merged into the URL query string.
    pub async fn get(
        &self,
        description: &str,
        url: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_query_method(Method::Get, description, url, query, headers)
            .await
    }

    /// DELETE request; `query` is merged into the URL query string.
    pub async fn delete(
        &self,
        description: &str,
        url: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_query_method(Method::Delete, description, url, query, headers)
            .await
    }

    /// HEAD request; `query` is merged into the URL query string.
    pub async fn head(
        &self,
        description: &str,
        url: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_query_method(Method::Head, description, url, query, headers)
            .await
    }

    /// OPTIONS request; `query` is merged into the URL query string.
    pub async fn options(
        &self,
        description: &str,
        url: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_query_method(Method::Options, description, url, query, headers)
            .await
    }

    /// POST request; a structured payload becomes a JSON body, a raw payload
    /// is the body verbatim.
    pub async fn post(
        &self,
        description: &str,
        url: &str,
        payload: impl Into<Payload>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_body_method(Method::Post, description, url, payload.into(), headers)
            .await
    }

    /// PUT request; payload placement as for `post`.
    pub async fn put(
        &self,
        description: &str,
        url: &str,
        payload: impl Into<Payload>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_body_method(Method::Put, description, url, payload.into(), headers)
            .await
    }

    /// PATCH request; payload placement as for `post`.
    pub async fn patch(
        &self,
        description: &str,
        url: &str,
        payload: impl Into<Payload>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        self.execute_body_method(Method::Patch, description, url, payload.into(), headers)
            .await
    }

    async fn execute_query_method(
        &self,
        method: Method,
        description: &str,
        url: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        let spec = RequestSpec::new(method, description, url)
            .payload(Payload::from_query(query))
            .headers(headers.clone());
        self.execute(spec).await
    }

    async fn execute_body_method(
        &self,
        method: Method,
        description: &str,
        url: &str,
        payload: Payload,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse> {
        let spec = RequestSpec::new(method, description, url)
            .payload(payload)
            .headers(headers.clone());
        self.execute(spec).await
    }

    /// Shared core every entry point delegates to.
    pub async fn execute(&self, spec: RequestSpec) -> Result<HttpResponse> {
        let mut url = Url::parse(&spec.url)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {e}", spec.url)))?;

        let mut body_text: Option<String> = None;
        if spec.method.carries_query_payload() {
            if let Payload::Structured(params) = &spec.payload {
                merge_query_params(&mut url, params);
            }
            // A raw payload on a query-parameter method is placed nowhere.
        } else {
            match &spec.payload {
                Payload::Structured(map) => {
                    body_text = Some(serde_json::to_string(map)?);
                }
                Payload::Raw(text) => body_text = Some(text.clone()),
                Payload::Empty => {}
            }
        }

        let header_map = build_header_map(&spec.headers)?;

        self.logger.log_request(
            spec.method.as_str(),
            url.as_str(),
            &spec.description,
            &spec.headers,
            body_text.as_deref().unwrap_or(""),
        );

        let mut builder = self
            .client
            .request(spec.method.into(), url)
            .headers(header_map);
        if let Some(body) = body_text {
            builder = builder.body(body);
        }

        // Transport failures abort before any response logging.
        let response = builder.send().await.map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        // Read the whole body eagerly so the connection is released before
        // control returns to the caller.
        let body = response.text().await.map_err(classify_transport_error)?;

        self.logger.log_response(&spec.description, &body, status);

        if !(200..300).contains(&status) {
            return Err(HttpError::Status { code: status, body });
        }
        Ok(HttpResponse { status, body })
    }
}

/// Merge structured payload entries into the URL query string. Duplicate
/// keys are overwritten (last-key-wins); parameters the payload does not
/// name are left untouched.
fn merge_query_params(url: &mut Url, params: &serde_json::Map<String, serde_json::Value>) {
    if params.is_empty() {
        return;
    }
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    for (key, value) in params {
        pairs.retain(|(k, _)| k != key);
        pairs.push((key.clone(), display_value(value)));
    }
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

/// Natural textual representation of a query value: strings unquoted,
/// everything else via its JSON text.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn build_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| HttpError::Configuration(format!("Invalid header name '{k}': {e}")))?;
        let value = HeaderValue::from_str(v)
            .map_err(|e| HttpError::Configuration(format!("Invalid header value for '{k}': {e}")))?;
        // append keeps repeated names additive rather than overwriting
        map.append(name, value);
    }
    Ok(map)
}

fn classify_transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout(e.to_string())
    } else {
        HttpError::Connection(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CaptureLogger(Mutex<Vec<String>>);

    impl WireLogger for CaptureLogger {
        fn log_request(
            &self,
            method: &str,
            endpoint: &str,
            _description: &str,
            _headers: &HashMap<String, String>,
            payload: &str,
        ) {
            self.0
                .lock()
                .unwrap()
                .push(format!("request {method} {endpoint} payload={payload}"));
        }

        fn log_response(&self, _description: &str, body: &str, status: u16) {
            self.0
                .lock()
                .unwrap()
                .push(format!("response {status} body={body}"));
        }
    }

    fn structured(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn merge_overwrites_duplicate_keys() {
        let mut url = Url::parse("http://api.test/items?id=1&keep=yes").unwrap();
        let params = structured(&[("id", serde_json::json!("42"))]);
        merge_query_params(&mut url, &params);

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("keep".to_string(), "yes".to_string())));
        assert!(pairs.contains(&("id".to_string(), "42".to_string())));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "id").count(), 1);
    }

    #[test]
    fn merge_replaces_all_values_of_a_repeated_key() {
        let mut url = Url::parse("http://api.test/items?tag=a&tag=b").unwrap();
        let params = structured(&[("tag", serde_json::json!("c"))]);
        merge_query_params(&mut url, &params);
        assert_eq!(url.query(), Some("tag=c"));
    }

    #[test]
    fn merge_with_empty_params_leaves_url_alone() {
        let mut url = Url::parse("http://api.test/items").unwrap();
        merge_query_params(&mut url, &serde_json::Map::new());
        assert_eq!(url.as_str(), "http://api.test/items");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn display_value_natural_representation() {
        assert_eq!(display_value(&serde_json::json!("abc")), "abc");
        assert_eq!(display_value(&serde_json::json!(42)), "42");
        assert_eq!(display_value(&serde_json::json!(true)), "true");
        assert_eq!(display_value(&serde_json::json!(1.5)), "1.5");
    }

    #[test]
    fn header_map_is_additive() {
        let mut headers = HashMap::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());
        let map = build_header_map(&headers).unwrap();
        assert_eq!(map.get("x-trace").unwrap(), "abc");

        let mut bad = HashMap::new();
        bad.insert("bad name".to_string(), "v".to_string());
        assert!(matches!(
            build_header_map(&bad),
            Err(HttpError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn malformed_url_fails_before_any_logging() {
        let logger = Arc::new(CaptureLogger::default());
        let executor = RequestExecutor::from_client(reqwest::Client::new(), logger.clone());

        let res = executor
            .get("broken", "ht!tp://api.test", &HashMap::new(), &HashMap::new())
            .await;

        assert!(matches!(res, Err(HttpError::InvalidUrl(_))));
        assert!(logger.0.lock().unwrap().is_empty(), "no log entries expected");
    }

    #[tokio::test]
    async fn raw_payload_on_query_method_is_not_placed() {
        // Unreachable through the public verb methods; a hand-built spec
        // documents the behavior: nothing in the query, nothing in the body.
        let logger = Arc::new(CaptureLogger::default());
        let executor = RequestExecutor::from_client(reqwest::Client::new(), logger.clone());

        let spec = RequestSpec::new(Method::Get, "raw on get", "http://127.0.0.1:1/none")
            .payload("ignored");
        // Port 1 refuses the connection, but the request log runs first.
        let res = executor.execute(spec).await;
        assert!(matches!(res, Err(HttpError::Connection(_))));

        let lines = logger.0.lock().unwrap();
        assert_eq!(lines.len(), 1, "transport failure aborts before response log");
        assert!(lines[0].contains("http://127.0.0.1:1/none payload="));
        assert!(!lines[0].contains("ignored"));
    }
}
