//! Function dispatch module
//!
//! Pure request-to-response mapping: exact suffix match on the normalized
//! path, then method. No side effects beyond the returned response.

use hyper::StatusCode;
use serde_json::{json, Value};

use super::context::InvocationContext;
use crate::http::response::build_function_response;

/// Status and JSON body produced by one invocation
///
/// The fixed response headers (`content-type`, CORS, `no-store`) are applied
/// when the response is rendered to HTTP, so every outcome carries them.
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl FunctionResponse {
    /// Render to an HTTP response with the fixed function headers
    pub fn into_http(self) -> hyper::Response<http_body_util::Full<hyper::body::Bytes>> {
        build_function_response(self.status, &self.body)
    }
}

/// Dispatch one invocation
///
/// Suffix matching is deliberate: the function sits behind a routing prefix
/// it does not know about, so `/api/ping` and `/v2/api/ping` both reach the
/// ping handler.
pub fn dispatch(
    method: &hyper::Method,
    path: &str,
    body: Option<&str>,
    ctx: &InvocationContext,
) -> FunctionResponse {
    if path.ends_with("/ping") && method == hyper::Method::GET {
        return FunctionResponse {
            status: StatusCode::OK,
            body: diagnostics(method, path, ctx),
        };
    }

    if path.ends_with("/echo") && method == hyper::Method::POST {
        // A malformed body is treated as absent, never surfaced as a failure
        let parsed = body
            .and_then(|b| serde_json::from_str::<Value>(b).ok())
            .unwrap_or(Value::Null);

        let mut payload = diagnostics(method, path, ctx);
        if let Value::Object(map) = &mut payload {
            map.insert("echo".to_string(), parsed);
        }
        return FunctionResponse {
            status: StatusCode::OK,
            body: payload,
        };
    }

    FunctionResponse {
        status: StatusCode::NOT_FOUND,
        body: json!({
            "ok": false,
            "error": "not found",
            "path": path,
            "method": method.as_str(),
        }),
    }
}

/// Diagnostic payload common to the ping and echo handlers
fn diagnostics(method: &hyper::Method, path: &str, ctx: &InvocationContext) -> Value {
    json!({
        "ok": true,
        "method": method.as_str(),
        "path": path,
        "ts": chrono::Utc::now().timestamp_millis(),
        "region": ctx.region,
        "functionName": ctx.function_name,
        "memory": ctx.memory_mb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    fn test_ctx() -> InvocationContext {
        InvocationContext::new("local-1".to_string(), "edge-fn".to_string(), 128)
    }

    #[test]
    fn test_ping_returns_diagnostics() {
        let resp = dispatch(&Method::GET, "/api/ping", None, &test_ctx());
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["ok"], true);
        assert_eq!(resp.body["method"], "GET");
        assert_eq!(resp.body["path"], "/api/ping");
        assert_eq!(resp.body["region"], "local-1");
        assert_eq!(resp.body["functionName"], "edge-fn");
        assert_eq!(resp.body["memory"], 128);
        assert!(resp.body["ts"].is_i64());
    }

    #[test]
    fn test_ping_suffix_match() {
        let resp = dispatch(&Method::GET, "/v2/api/ping", None, &test_ctx());
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["path"], "/v2/api/ping");
    }

    #[test]
    fn test_ping_ts_strictly_increasing() {
        let ctx = test_ctx();
        let first = dispatch(&Method::GET, "/api/ping", None, &ctx);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = dispatch(&Method::GET, "/api/ping", None, &ctx);
        assert!(second.body["ts"].as_i64() > first.body["ts"].as_i64());
    }

    #[test]
    fn test_ping_idempotent_except_ts() {
        let ctx = test_ctx();
        let mut first = dispatch(&Method::GET, "/api/ping", None, &ctx).body;
        let mut second = dispatch(&Method::GET, "/api/ping", None, &ctx).body;
        first["ts"] = Value::Null;
        second["ts"] = Value::Null;
        assert_eq!(first, second);
    }

    #[test]
    fn test_echo_roundtrip() {
        let resp = dispatch(&Method::POST, "/api/echo", Some(r#"{"a":1}"#), &test_ctx());
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["echo"], serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_echo_malformed_body_recovers() {
        let resp = dispatch(&Method::POST, "/api/echo", Some("{"), &test_ctx());
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["echo"], Value::Null);
    }

    #[test]
    fn test_echo_absent_body() {
        let resp = dispatch(&Method::POST, "/api/echo", None, &test_ctx());
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["echo"], Value::Null);
    }

    #[test]
    fn test_unknown_path_is_404() {
        let resp = dispatch(&Method::GET, "/api/unknown", None, &test_ctx());
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.body["ok"], false);
        assert_eq!(resp.body["error"], "not found");
        assert_eq!(resp.body["path"], "/api/unknown");
        assert_eq!(resp.body["method"], "GET");
    }

    #[test]
    fn test_wrong_method_is_404() {
        // /ping only answers GET; everything else falls to the 404 arm
        let resp = dispatch(&Method::POST, "/api/ping", None, &test_ctx());
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }
}
