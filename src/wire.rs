//! Wire-level trace logging
//!
//! Defines a small injectable logger the executor calls once before dispatch
//! and once after the response body is read. Injecting the trait (rather
//! than calling an ambient logger) lets tests capture or silence output
//! deterministically. Hooks are best-effort: they never fail and never panic.

use std::collections::HashMap;

/// One dispatched request and its response are each logged as a delimited
/// block of `[timestamp] label value` lines.
pub trait WireLogger: Send + Sync {
    /// Called with the final resolved URL and the payload text actually sent
    /// (empty when the request carries no body).
    fn log_request(
        &self,
        method: &str,
        endpoint: &str,
        description: &str,
        headers: &HashMap<String, String>,
        payload: &str,
    );

    /// Called after the response body has been read, for every response
    /// regardless of status classification.
    fn log_response(&self, description: &str, body: &str, status: u16);
}

const DOTTED_SEPARATOR: &str = ".................................................";
const NULL_VALUE: &str = "null";

const LABEL_REQUEST_DESC: &str = "Request Description:";
const LABEL_HTTP_METHOD: &str = "HTTP Method:";
const LABEL_DEST_ENDPOINT: &str = "Destination Endpoint:";
const LABEL_PAYLOAD: &str = "Payload:";
const LABEL_HEADERS: &str = "Headers:";
const LABEL_RESPONSE_DESC: &str = "Response Description:";
const LABEL_RESPONSE_STATUS: &str = "Response Status:";
const LABEL_RESPONSE: &str = "Response:";

fn trace_line(timestamp: &str, label: &str, value: &str) -> String {
    format!("[{timestamp}] {label:<20} {value}")
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a request block. Exposed to the module for testing; the timestamp
/// is passed in so formatting stays pure.
fn request_block(
    timestamp: &str,
    method: &str,
    endpoint: &str,
    description: &str,
    headers: &HashMap<String, String>,
    payload: &str,
) -> Vec<String> {
    let mut lines = vec![DOTTED_SEPARATOR.to_string()];
    lines.push(trace_line(timestamp, LABEL_REQUEST_DESC, description));
    lines.push(trace_line(timestamp, LABEL_HTTP_METHOD, method));
    lines.push(trace_line(timestamp, LABEL_DEST_ENDPOINT, endpoint));
    let payload = if payload.is_empty() { NULL_VALUE } else { payload };
    lines.push(trace_line(timestamp, LABEL_PAYLOAD, payload));
    lines.push(trace_line(timestamp, LABEL_HEADERS, ""));
    for (key, value) in headers {
        lines.push(trace_line(timestamp, key, value));
    }
    lines.push(DOTTED_SEPARATOR.to_string());
    lines
}

/// Format a response block. A status of 0 means "no status" and its line is
/// omitted; an empty body logs the `null` sentinel.
fn response_block(timestamp: &str, description: &str, body: &str, status: u16) -> Vec<String> {
    let mut lines = vec![DOTTED_SEPARATOR.to_string()];
    lines.push(trace_line(timestamp, LABEL_RESPONSE_DESC, description));
    if status != 0 {
        lines.push(trace_line(timestamp, LABEL_RESPONSE_STATUS, &status.to_string()));
    }
    let body = if body.is_empty() { NULL_VALUE } else { body };
    lines.push(trace_line(timestamp, LABEL_RESPONSE, body));
    lines.push(DOTTED_SEPARATOR.to_string());
    lines
}

/// Default logger backed by `tracing`, one event per trace line under the
/// `reqtrace::wire` target. The crate never installs a subscriber; the
/// embedding application decides where these lines go.
#[derive(Clone, Default)]
pub struct TracingWireLogger;

impl WireLogger for TracingWireLogger {
    fn log_request(
        &self,
        method: &str,
        endpoint: &str,
        description: &str,
        headers: &HashMap<String, String>,
        payload: &str,
    ) {
        for line in request_block(&now(), method, endpoint, description, headers, payload) {
            tracing::info!(target: "reqtrace::wire", "{line}");
        }
    }

    fn log_response(&self, description: &str, body: &str, status: u16) {
        for line in response_block(&now(), description, body, status) {
            tracing::info!(target: "reqtrace::wire", "{line}");
        }
    }
}

/// Logger that drops everything. Useful in tests and for callers that want
/// the executor without the trace output.
#[derive(Clone, Default)]
pub struct NullWireLogger;

impl WireLogger for NullWireLogger {
    fn log_request(&self, _: &str, _: &str, _: &str, _: &HashMap<String, String>, _: &str) {}

    fn log_response(&self, _: &str, _: &str, _: u16) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-08-30 12:00:00";

    #[test]
    fn trace_line_pads_label_to_twenty_chars() {
        let line = trace_line(TS, "HTTP Method:", "GET");
        assert_eq!(line, "[2026-08-30 12:00:00] HTTP Method:         GET");
    }

    #[test]
    fn request_block_layout() {
        let mut headers = HashMap::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());
        let lines = request_block(TS, "GET", "http://api.test/items?id=42", "fetch item", &headers, "");

        assert_eq!(lines.first().unwrap(), DOTTED_SEPARATOR);
        assert_eq!(lines.last().unwrap(), DOTTED_SEPARATOR);
        assert!(lines[1].contains("Request Description:") && lines[1].ends_with("fetch item"));
        assert!(lines[2].ends_with("GET"));
        assert!(lines[3].ends_with("http://api.test/items?id=42"));
        // empty payload logs the null sentinel
        assert!(lines[4].contains("Payload:") && lines[4].ends_with("null"));
        assert!(lines[5].contains("Headers:"));
        assert!(lines[6].contains("X-Trace") && lines[6].ends_with("abc"));
    }

    #[test]
    fn request_block_keeps_nonempty_payload_verbatim() {
        let lines = request_block(TS, "POST", "http://api.test/items", "create", &HashMap::new(), "{\"name\":\"widget\"}");
        assert!(lines[4].ends_with("{\"name\":\"widget\"}"));
    }

    #[test]
    fn response_block_with_status() {
        let lines = response_block(TS, "fetch item", "{\"ok\":true}", 200);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("Response Description:"));
        assert!(lines[2].contains("Response Status:") && lines[2].ends_with("200"));
        assert!(lines[3].contains("Response:") && lines[3].ends_with("{\"ok\":true}"));
    }

    #[test]
    fn response_block_omits_zero_status_and_marks_empty_body() {
        let lines = response_block(TS, "fetch item", "", 0);
        assert_eq!(lines.len(), 4);
        assert!(!lines.iter().any(|l| l.contains("Response Status:")));
        assert!(lines[2].ends_with("null"));
    }

    #[test]
    fn tracing_logger_emits_blocks_under_wire_target() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct SharedBuf(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for SharedBuf {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingWireLogger;
            let mut headers = HashMap::new();
            headers.insert("X-Trace".to_string(), "abc".to_string());
            logger.log_request("GET", "http://api.test/items?id=42", "fetch item", &headers, "");
            logger.log_response("fetch item", "{\"ok\":true}", 200);
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("reqtrace::wire"));
        assert!(output.contains("Request Description: fetch item"));
        assert!(output.contains("http://api.test/items?id=42"));
        // empty payload logs the null sentinel
        assert!(output.contains("Payload:             null"));
        assert!(output.contains("X-Trace"));
        assert!(output.contains("Response Status:     200"));
        assert!(output.contains("{\"ok\":true}"));
        assert_eq!(output.matches(DOTTED_SEPARATOR).count(), 4);
    }

    #[test]
    fn null_logger_is_silent() {
        // Only checks the calls don't panic; there is no output to observe.
        let logger = NullWireLogger;
        logger.log_request("GET", "http://api.test", "d", &HashMap::new(), "");
        logger.log_response("d", "", 0);
    }
}
