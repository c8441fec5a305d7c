//! Edge routing dispatch module
//!
//! The only component with branching logic: classifies each inbound
//! request against the route rule table and applies the matched class's
//! method, caching and header-forwarding policy before dispatching to the
//! static origin or the function backend.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use super::static_files::{StaticObject, StaticOrigin};
use crate::function::{FunctionBackend, FunctionRequest};
use crate::http::cache::{check_etag_match, generate_etag, CachePolicy};
use crate::http::response;
use crate::routing::{RouteRule, RouteTable, RouteTarget};

/// Inbound request as seen by the edge router, immutable once received
#[derive(Debug, Clone)]
pub struct EdgeRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub if_none_match: Option<String>,
}

impl EdgeRequest {
    fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Per-request classifier and dispatcher
///
/// Holds the read-only rule table plus the two origins; no mutable state is
/// shared between concurrent requests.
pub struct EdgeRouter<O, B> {
    table: RouteTable,
    origin: O,
    backend: B,
    default_document: String,
}

impl<O: StaticOrigin, B: FunctionBackend> EdgeRouter<O, B> {
    pub fn new(table: RouteTable, origin: O, backend: B, default_document: String) -> Self {
        Self {
            table,
            origin,
            backend,
            default_document,
        }
    }

    /// Whether a path classifies as function traffic
    ///
    /// Only function-class requests carry a body to the target; callers use
    /// this to skip body collection for static traffic.
    pub fn forwards_body(&self, path: &str) -> bool {
        self.table.matched(path).target == RouteTarget::FunctionApi
    }

    /// Classify and dispatch one request
    pub async fn route(&self, req: &EdgeRequest) -> Response<Full<Bytes>> {
        let rule = self.table.matched(&req.path);

        // CORS preflight for the function class is answered at the edge,
        // without invoking the backend
        if req.method == Method::OPTIONS && rule.target == RouteTarget::FunctionApi {
            return response::build_preflight_response();
        }

        // Fail closed before any origin contact
        if !rule.allows(&req.method) {
            return response::build_405_response(&rule.allow_header());
        }

        if req.method == Method::OPTIONS {
            // Static class OPTIONS never reaches the store either
            return response::build_options_response(&rule.allow_header());
        }

        match rule.target {
            RouteTarget::StaticSite => self.serve_static(req, rule).await,
            RouteTarget::FunctionApi => self.invoke_function(req, rule),
        }
    }

    /// Static class: key lookup with SPA fallback on missing documents
    async fn serve_static(&self, req: &EdgeRequest, rule: &RouteRule) -> Response<Full<Bytes>> {
        let key = self.object_key(rule, &req.path);

        match self.origin.get(&key).await {
            Ok(obj) => build_hit(&obj, req, rule.cache_policy),
            Err(err) if err.spa_fallback() && key != self.default_document => {
                // Deep links under client-side routing have no stored object;
                // serve the default document with status 200 and a zero TTL so
                // the rewrite is never frozen into a cache
                match self.origin.get(&self.default_document).await {
                    Ok(obj) => build_hit(&obj, req, CachePolicy::OptimizedPublic(0)),
                    Err(_) => response::build_error_response(err.status()),
                }
            }
            Err(err) => response::build_error_response(err.status()),
        }
    }

    /// Function class: forward per policy, return the response untouched
    fn invoke_function(&self, req: &EdgeRequest, rule: &RouteRule) -> Response<Full<Bytes>> {
        let forwarded = FunctionRequest {
            method: req.method.clone(),
            path: req.path.clone(),
            query: req.query.clone(),
            headers: rule.header_forward.filter(&req.headers),
            body: req.body.clone(),
        };
        self.backend.invoke(&forwarded).into_http()
    }

    /// Derive the origin object key from a request path
    fn object_key(&self, rule: &RouteRule, path: &str) -> String {
        let stripped = rule.pattern.strip(path).trim_start_matches('/');
        if stripped.is_empty() {
            self.default_document.clone()
        } else if stripped.ends_with('/') {
            format!("{stripped}{}", self.default_document)
        } else {
            stripped.to_string()
        }
    }
}

/// Build the response for a successful static lookup
fn build_hit(
    obj: &StaticObject,
    req: &EdgeRequest,
    cache: CachePolicy,
) -> Response<Full<Bytes>> {
    let etag = generate_etag(&obj.content);

    if check_etag_match(req.if_none_match.as_deref(), &etag) {
        return response::build_304_response(&etag, cache);
    }

    response::build_static_response(&obj.content, obj.content_type, &etag, cache, req.is_head())
}
