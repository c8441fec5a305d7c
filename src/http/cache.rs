//! HTTP cache control module
//!
//! Provides per-route cache policies, `ETag` generation and conditional
//! request handling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache policy applied per route class.
///
/// The static site class is cacheable by intermediate layers (keyed by
/// normalized path plus `Accept-Encoding`); the function API class is never
/// cached, whatever the outcome of the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Responses must never be stored by any intermediate cache
    Disabled,
    /// Public cache with the given max-age in seconds
    OptimizedPublic(u32),
}

impl CachePolicy {
    /// Convert to a `Cache-Control` header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Disabled => "no-store".to_string(),
            Self::OptimizedPublic(max_age) => format!("public, max-age={max_age}"),
        }
    }

    /// Whether responses under this policy may be stored and reused
    #[must_use]
    pub const fn cacheable(self) -> bool {
        matches!(self, Self::OptimizedPublic(max_age) if max_age > 0)
    }
}

/// Generate `ETag` using fast hashing
///
/// # Arguments
/// * `content` - Object content
///
/// # Returns
/// Quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Weak validators: `W/"abc123"` (compared by opaque value)
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
///
/// # Returns
/// Returns true if matched (should return 304), false otherwise
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        // Handle multiple ETags separated by comma; intermediaries that
        // transform the body mark the validator weak, so the `W/` prefix is
        // ignored for comparison
        client_etag.split(',').any(|e| {
            let e = e.trim();
            let e = e.strip_prefix("W/").unwrap_or(e);
            e == etag || e == "*"
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_consistency() {
        let etag1 = generate_etag(b"same content");
        let etag2 = generate_etag(b"same content");
        assert_eq!(etag1, etag2);
    }

    #[test]
    fn test_etag_difference() {
        let etag1 = generate_etag(b"content a");
        let etag2 = generate_etag(b"content b");
        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_check_etag_match_weak_validator() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", W/\"abc123\""), etag));
        assert!(!check_etag_match(Some("W/\"different\""), etag));
    }

    #[test]
    fn test_cache_policy_header_values() {
        assert_eq!(CachePolicy::Disabled.to_header_value(), "no-store");
        assert_eq!(
            CachePolicy::OptimizedPublic(3600).to_header_value(),
            "public, max-age=3600"
        );
        // SPA fallback responses are marked with a zero TTL
        assert_eq!(
            CachePolicy::OptimizedPublic(0).to_header_value(),
            "public, max-age=0"
        );
    }

    #[test]
    fn test_cache_policy_cacheable() {
        assert!(CachePolicy::OptimizedPublic(3600).cacheable());
        assert!(!CachePolicy::OptimizedPublic(0).cacheable());
        assert!(!CachePolicy::Disabled.cacheable());
    }
}
