//! Route builder chains
//!
//! This module contains the fluent API for registering handlers with
//! per-route options.

use super::core::Router;
use crate::{
    IntoResponse,
    handler::{Handler, into_boxed},
    method::{HttpMethod, MethodFilter},
};

// =============================================================================
// Route Chain
// =============================================================================

/// A fluent builder for registering one pattern with options.
///
/// This struct is returned by [`Router::path`]. Terminal methods register the
/// handler and hand the router back.
///
/// # Example
/// ```rust,ignore
/// let router = Router::with_context(session)
///     .path("/public/:page")
///         .optional_context()
///         .get(public_page)
///     .get("/account", account);
/// ```
pub struct RouteChain<Ctx: Send + Sync + 'static> {
    router: Router<Ctx>,
    pattern: String,
    requires_context: bool,
}

impl<Ctx: Send + Sync + 'static> Router<Ctx> {
    /// Start a route chain for `pattern`.
    #[must_use = "This method returns a RouteChain that must be used to register a handler"]
    pub fn path(self, pattern: impl Into<String>) -> RouteChain<Ctx> {
        RouteChain {
            router: self,
            pattern: pattern.into(),
            requires_context: true,
        }
    }
}

impl<Ctx: Send + Sync + 'static> RouteChain<Ctx> {
    /// Invoke the handler even when the context builder fails.
    ///
    /// The handler then receives `None` and the failure is not recorded, so
    /// it cannot turn a later 404 into a 500.
    #[must_use = "This method returns a new RouteChain and does not modify self"]
    pub fn optional_context(mut self) -> Self {
        self.requires_context = false;
        self
    }

    /// Register the handler for a method filter
    pub fn method<O, H>(self, filter: impl Into<MethodFilter>, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.router.add(
            filter.into(),
            self.pattern,
            into_boxed(handler),
            self.requires_context,
        )
    }

    /// Register as a GET handler
    pub fn get<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Get, handler)
    }

    /// Register as a POST handler
    pub fn post<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Post, handler)
    }

    /// Register as a PUT handler
    pub fn put<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Put, handler)
    }

    /// Register as a DELETE handler
    pub fn delete<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Delete, handler)
    }

    /// Register as a PATCH handler
    pub fn patch<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Patch, handler)
    }

    /// Register as a HEAD handler
    pub fn head<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Head, handler)
    }

    /// Register as an OPTIONS handler
    pub fn options<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Options, handler)
    }

    /// Register as a TRACE handler
    pub fn trace<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Trace, handler)
    }

    /// Register as a CONNECT handler
    pub fn connect<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(HttpMethod::Connect, handler)
    }

    /// Register for any method
    pub fn on<O, H>(self, handler: H) -> Router<Ctx>
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.method(MethodFilter::Any, handler)
    }
}
