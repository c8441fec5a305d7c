//! Function backend module
//!
//! The stateless compute function behind the API prefix: a pure mapping
//! from (method, path, body, context) to a JSON response, with no state
//! shared across invocations. Kept independent of the deployment wiring so
//! it can be tested on its own and substituted with a double.

pub mod context;
pub mod handler;

pub use context::InvocationContext;
pub use handler::{dispatch, FunctionResponse};

use hyper::Method;

/// Request forwarded to the function backend by the edge router
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    pub method: Method,
    /// Raw path including the matched routing prefix
    pub path: String,
    pub query: Option<String>,
    /// Headers surviving the route's forwarding policy
    pub headers: Vec<(String, String)>,
    /// Raw body text, absent when the request carried none
    pub body: Option<String>,
}

/// Seam between the edge router and the compute function
///
/// Implementations must be pure per invocation; the router treats every
/// response as dynamic and propagates it untouched.
pub trait FunctionBackend: Send + Sync {
    fn invoke(&self, req: &FunctionRequest) -> FunctionResponse;
}

/// Production backend invoking the local dispatch table
#[derive(Debug, Clone)]
pub struct LocalFunction {
    ctx: InvocationContext,
}

impl LocalFunction {
    #[must_use]
    pub const fn new(ctx: InvocationContext) -> Self {
        Self { ctx }
    }
}

impl FunctionBackend for LocalFunction {
    fn invoke(&self, req: &FunctionRequest) -> FunctionResponse {
        dispatch(&req.method, &req.path, req.body.as_deref(), &self.ctx)
    }
}
