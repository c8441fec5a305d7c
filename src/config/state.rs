// Application state module
// Holds the immutable configuration and the routing components

use super::types::Config;
use crate::function::{InvocationContext, LocalFunction};
use crate::handler::router::EdgeRouter;
use crate::handler::static_files::FsOrigin;
use crate::routing::RouteTable;

/// Application state shared across connections
///
/// The route table and both origins are fixed at startup; request handling
/// only ever reads from this state, so no locking is required.
pub struct AppState {
    pub config: Config,
    pub router: EdgeRouter<FsOrigin, LocalFunction>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let table = RouteTable::standard(&config.routes.api_prefix, config.static_site.max_age);
        let origin = FsOrigin::new(&config.static_site.root);
        let ctx = InvocationContext::new(
            config.function.region.clone(),
            config.function.name.clone(),
            config.function.memory_mb,
        );
        let router = EdgeRouter::new(
            table,
            origin,
            LocalFunction::new(ctx),
            config.static_site.default_document.clone(),
        );

        Self { config, router }
    }
}
