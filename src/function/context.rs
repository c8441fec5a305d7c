//! Invocation context module
//!
//! Backend-environment metadata echoed back for diagnostics. Passed in
//! explicitly at construction so tests can supply fixed values instead of
//! reading ambient globals.

/// Read-only metadata describing the backend instance
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Region identifier, e.g. `local-1`
    pub region: String,
    /// Backend instance identifier
    pub function_name: String,
    /// Configured memory limit in megabytes
    pub memory_mb: u32,
}

impl InvocationContext {
    #[must_use]
    pub const fn new(region: String, function_name: String, memory_mb: u32) -> Self {
        Self {
            region,
            function_name,
            memory_mb,
        }
    }
}
