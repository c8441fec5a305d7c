//! Static origin adapter module
//!
//! Translates a router-provided key into object bytes plus content type, or
//! reports absence. The router is the only caller; the backing store is
//! never exposed directly.

use std::fmt;
use std::path::{Path, PathBuf};

use hyper::StatusCode;
use tokio::fs;

use crate::http::mime;
use crate::logger;

/// Object returned by a successful lookup
#[derive(Debug, Clone)]
pub struct StaticObject {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// Lookup failure reported by a static origin
#[derive(Debug)]
pub enum OriginError {
    /// No object stored under the key
    NotFound,
    /// Key resolves outside the store or to an unreadable object
    Forbidden,
    /// Underlying store failure
    Io(std::io::Error),
}

impl OriginError {
    /// HTTP status propagated when the lookup cannot fall back
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Only missing or forbidden objects are rewritten to the SPA fallback;
    /// other errors pass through unchanged.
    #[must_use]
    pub const fn spa_fallback(&self) -> bool {
        matches!(self, Self::NotFound | Self::Forbidden)
    }
}

impl fmt::Display for OriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "object not found"),
            Self::Forbidden => write!(f, "access to object forbidden"),
            Self::Io(e) => write!(f, "origin read failed: {e}"),
        }
    }
}

/// Read-only key-addressed object store
pub trait StaticOrigin: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<StaticObject, OriginError>> + Send;
}

/// Filesystem-backed static origin serving the site bundle
#[derive(Debug, Clone)]
pub struct FsOrigin {
    root: PathBuf,
}

impl FsOrigin {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to a path inside the root, rejecting traversal
    fn resolve(&self, key: &str) -> Result<PathBuf, OriginError> {
        // Keys never carry a leading slash; drop any traversal components
        let clean_key = key.trim_start_matches('/').replace("..", "");
        let file_path = self.root.join(clean_key);

        let root_canonical = self.root.canonicalize().map_err(|e| {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{}': {e}",
                self.root.display()
            ));
            OriginError::Forbidden
        })?;

        // Missing objects are common, no need to log at warning level
        let canonical = match file_path.canonicalize() {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OriginError::NotFound)
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(OriginError::Forbidden)
            }
            Err(e) => return Err(OriginError::Io(e)),
        };

        if !canonical.starts_with(&root_canonical) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {key} -> {}",
                canonical.display()
            ));
            return Err(OriginError::Forbidden);
        }

        if canonical.is_dir() {
            // Directories have no object representation
            return Err(OriginError::NotFound);
        }

        Ok(canonical)
    }
}

impl StaticOrigin for FsOrigin {
    async fn get(&self, key: &str) -> Result<StaticObject, OriginError> {
        let path = self.resolve(key)?;

        let content = match fs::read(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OriginError::NotFound)
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(OriginError::Forbidden)
            }
            Err(e) => {
                logger::log_error(&format!("Failed to read '{}': {e}", path.display()));
                return Err(OriginError::Io(e));
            }
        };

        let content_type =
            mime::get_content_type(Path::new(key).extension().and_then(|e| e.to_str()));

        Ok(StaticObject {
            content,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_existing_object() {
        let dir = std::env::temp_dir().join(format!("edge-origin-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), b"<html></html>").unwrap();
        std::fs::write(dir.join("assets/app.js"), b"console.log(1)").unwrap();

        let origin = FsOrigin::new(&dir);

        let obj = origin.get("index.html").await.unwrap();
        assert_eq!(obj.content, b"<html></html>");
        assert_eq!(obj.content_type, "text/html; charset=utf-8");

        let obj = origin.get("assets/app.js").await.unwrap();
        assert_eq!(obj.content_type, "application/javascript");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let dir = std::env::temp_dir().join(format!("edge-origin-miss-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let origin = FsOrigin::new(&dir);
        let err = origin.get("nope.html").await.unwrap_err();
        assert!(matches!(err, OriginError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.spa_fallback());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let dir = std::env::temp_dir().join(format!("edge-origin-trav-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), b"ok").unwrap();

        let origin = FsOrigin::new(&dir);
        // ".." components are stripped before resolution, so the key cannot
        // escape the root; the mangled key then simply fails to resolve
        let err = origin.get("../../etc/passwd").await.unwrap_err();
        assert!(matches!(
            err,
            OriginError::NotFound | OriginError::Forbidden
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
