// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub static_site: StaticSiteConfig,
    pub function: FunctionConfig,
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Static site class configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticSiteConfig {
    /// Directory holding the site bundle
    pub root: String,
    /// Document served for `/` and for SPA fallback rewrites
    pub default_document: String,
    /// max-age applied to cacheable static responses, in seconds
    pub max_age: u32,
}

/// Function backend configuration, echoed back in diagnostic payloads
#[derive(Debug, Deserialize, Clone)]
pub struct FunctionConfig {
    pub region: String,
    pub name: String,
    pub memory_mb: u32,
}

/// Route table configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Reserved prefix forwarded to the function backend
    pub api_prefix: String,
}
