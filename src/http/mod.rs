//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! routing decision logic. Shared between the static site class and the
//! function API class.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cache::{check_etag_match, generate_etag, CachePolicy};
pub use response::{
    build_304_response, build_405_response, build_error_response, build_function_response,
    build_options_response, build_preflight_response, build_static_response,
};
