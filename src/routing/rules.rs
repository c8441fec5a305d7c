//! Route rule table module
//!
//! Each traffic class is described by a declarative rule: path pattern,
//! allowed methods, cache policy, header forwarding policy and target
//! origin. Adding a new class means adding a rule, not touching dispatch.
//!
//! The table is built once at startup and read-only afterwards; rules are
//! evaluated in priority order (most specific first) and a catch-all
//! static rule is stored separately so exactly one rule matches any path.

use hyper::Method;

use crate::http::cache::CachePolicy;

/// Path pattern matched against the raw request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Prefix match, e.g. `/api` matches `/api/ping`
    Prefix(String),
    /// Matches every path; used by the fallback rule
    CatchAll,
}

impl PathPattern {
    /// Check if a path matches this pattern
    ///
    /// Prefix matches are segment-bounded: `/api` matches `/api` and
    /// `/api/ping` but not `/apifoo` or `/api-docs`.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Prefix(prefix) => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
            Self::CatchAll => true,
        }
    }

    /// Remove the routing prefix from a path before origin lookup
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        match self {
            Self::Prefix(prefix) => path.strip_prefix(prefix.as_str()).unwrap_or(path),
            Self::CatchAll => path,
        }
    }
}

/// Set of HTTP methods a rule permits; requests outside the set fail closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedMethods {
    /// Any method is forwarded
    All,
    /// Only the listed methods are accepted
    Only(Vec<Method>),
}

/// Which request headers are forwarded to the target origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderForwardPolicy {
    /// Nothing is forwarded; the origin lookup uses the path alone
    None,
    /// Everything except the hop-by-hop `Host` header
    AllExceptHost,
}

impl HeaderForwardPolicy {
    /// Apply the policy to a set of request headers
    pub fn filter(self, headers: &[(String, String)]) -> Vec<(String, String)> {
        match self {
            Self::None => Vec::new(),
            Self::AllExceptHost => headers
                .iter()
                .filter(|(name, _)| !name.eq_ignore_ascii_case("host"))
                .cloned()
                .collect(),
        }
    }
}

/// Target origin class for a matched rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Key-addressed object store holding the site bundle
    StaticSite,
    /// Stateless compute function behind the API prefix
    FunctionApi,
}

/// Declarative mapping from a path pattern to a per-class policy
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Rule identifier for logging
    pub name: &'static str,
    pub pattern: PathPattern,
    pub allowed_methods: AllowedMethods,
    pub cache_policy: CachePolicy,
    pub header_forward: HeaderForwardPolicy,
    pub target: RouteTarget,
}

impl RouteRule {
    /// Check if a method is permitted by this rule
    pub fn allows(&self, method: &Method) -> bool {
        match &self.allowed_methods {
            AllowedMethods::All => true,
            AllowedMethods::Only(methods) => methods.contains(method),
        }
    }

    /// Render the `Allow` header value for method rejections
    pub fn allow_header(&self) -> String {
        match &self.allowed_methods {
            AllowedMethods::All => "*".to_string(),
            AllowedMethods::Only(methods) => methods
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Priority-ordered rule list with a guaranteed catch-all fallback
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    fallback: RouteRule,
}

impl RouteTable {
    /// Build the standard two-class table: `api_prefix` traffic goes to the
    /// function backend uncached, everything else to the static site.
    pub fn standard(api_prefix: &str, static_max_age: u32) -> Self {
        let api_rule = RouteRule {
            name: "function-api",
            pattern: PathPattern::Prefix(api_prefix.to_string()),
            allowed_methods: AllowedMethods::All,
            cache_policy: CachePolicy::Disabled,
            header_forward: HeaderForwardPolicy::AllExceptHost,
            target: RouteTarget::FunctionApi,
        };

        let fallback = RouteRule {
            name: "static-site",
            pattern: PathPattern::CatchAll,
            allowed_methods: AllowedMethods::Only(vec![Method::GET, Method::HEAD, Method::OPTIONS]),
            cache_policy: CachePolicy::OptimizedPublic(static_max_age),
            header_forward: HeaderForwardPolicy::None,
            target: RouteTarget::StaticSite,
        };

        Self {
            rules: vec![api_rule],
            fallback,
        }
    }

    /// Select the first rule matching the path; the catch-all guarantees a
    /// match always exists.
    pub fn matched(&self, path: &str) -> &RouteRule {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        let pattern = PathPattern::Prefix("/api".to_string());
        assert!(pattern.matches("/api"));
        assert!(pattern.matches("/api/ping"));
        assert!(!pattern.matches("/about"));
    }

    #[test]
    fn test_prefix_requires_segment_boundary() {
        let pattern = PathPattern::Prefix("/api".to_string());
        assert!(!pattern.matches("/apifoo"));
        assert!(!pattern.matches("/api-docs"));
        assert!(!pattern.matches("/api-docs/index.html"));

        let table = RouteTable::standard("/api", 3600);
        assert_eq!(table.matched("/apifoo").target, RouteTarget::StaticSite);
        assert_eq!(table.matched("/api-docs").target, RouteTarget::StaticSite);
        assert_eq!(table.matched("/api/ping").target, RouteTarget::FunctionApi);
    }

    #[test]
    fn test_prefix_strip() {
        let pattern = PathPattern::Prefix("/api".to_string());
        assert_eq!(pattern.strip("/api/ping"), "/ping");
        assert_eq!(pattern.strip("/other"), "/other");
        assert_eq!(PathPattern::CatchAll.strip("/deep/route"), "/deep/route");
    }

    #[test]
    fn test_api_class_selected_before_catch_all() {
        let table = RouteTable::standard("/api", 3600);

        let api = table.matched("/api/ping");
        assert_eq!(api.target, RouteTarget::FunctionApi);
        assert_eq!(api.cache_policy, CachePolicy::Disabled);
        assert_eq!(api.header_forward, HeaderForwardPolicy::AllExceptHost);

        let site = table.matched("/assets/app.js");
        assert_eq!(site.target, RouteTarget::StaticSite);
        assert_eq!(site.cache_policy, CachePolicy::OptimizedPublic(3600));
    }

    #[test]
    fn test_catch_all_always_matches() {
        let table = RouteTable::standard("/api", 0);
        assert_eq!(table.matched("/").target, RouteTarget::StaticSite);
        assert_eq!(
            table.matched("/some/deep/client/route").target,
            RouteTarget::StaticSite
        );
    }

    #[test]
    fn test_method_policy() {
        let table = RouteTable::standard("/api", 3600);

        let site = table.matched("/");
        assert!(site.allows(&Method::GET));
        assert!(site.allows(&Method::HEAD));
        assert!(site.allows(&Method::OPTIONS));
        assert!(!site.allows(&Method::POST));
        assert_eq!(site.allow_header(), "GET, HEAD, OPTIONS");

        let api = table.matched("/api/echo");
        assert!(api.allows(&Method::POST));
        assert!(api.allows(&Method::DELETE));
    }

    #[test]
    fn test_header_forward_policy() {
        let headers = vec![
            ("Host".to_string(), "example.com".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("X-Custom".to_string(), "1".to_string()),
        ];

        assert!(HeaderForwardPolicy::None.filter(&headers).is_empty());

        let forwarded = HeaderForwardPolicy::AllExceptHost.filter(&headers);
        assert_eq!(forwarded.len(), 2);
        assert!(forwarded.iter().all(|(n, _)| !n.eq_ignore_ascii_case("host")));
    }
}
