//! Routing module
//!
//! Declarative per-class route rules evaluated by the edge router.

mod rules;

pub use rules::{
    AllowedMethods, HeaderForwardPolicy, PathPattern, RouteRule, RouteTable, RouteTarget,
};
