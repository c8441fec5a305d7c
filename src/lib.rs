//! Edge request router
//!
//! A single ingress point that serves a static SPA bundle by default and
//! transparently forwards requests under a reserved prefix to a stateless
//! function backend, applying per-class caching, header and method policies.

pub mod config;
pub mod function;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
