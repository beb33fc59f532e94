//! Type-erased router
//!
//! Transports store routers as `Arc<dyn DynRouter>` so one protocol table can
//! hold routers with different context types.

use super::{core::Router, table::RouteInfo};
use crate::{ProtocolRequest, Response, RouterConfig};
use futures::future::BoxFuture;

/// Type-erased router trait for transport storage
pub trait DynRouter: Send + Sync {
    /// Dispatch a request; always yields a response
    fn dispatch(&self, request: ProtocolRequest) -> BoxFuture<'_, Response>;

    /// List registered routes
    fn routes(&self) -> Vec<RouteInfo>;

    /// Number of registered handlers
    fn handler_count(&self) -> usize;

    /// Returns true if nothing has been registered
    fn is_empty(&self) -> bool {
        self.handler_count() == 0
    }

    /// Router configuration
    fn config(&self) -> &RouterConfig;
}

impl<Ctx: Send + Sync + 'static> DynRouter for Router<Ctx> {
    fn dispatch(&self, request: ProtocolRequest) -> BoxFuture<'_, Response> {
        Box::pin(async move { Router::dispatch(self, request).await })
    }

    fn routes(&self) -> Vec<RouteInfo> {
        Router::routes(self)
    }

    fn handler_count(&self) -> usize {
        Router::handler_count(self)
    }

    fn config(&self) -> &RouterConfig {
        Router::get_config(self)
    }
}
