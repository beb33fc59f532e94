//! Handler traits and utilities

use crate::{Context, IntoResponse, Response, RouteRequest, RouteResult};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace};

/// Boxed handler for type erasure
pub(crate) type BoxedHandler<Ctx> = Arc<
    dyn Fn(RouteRequest, Option<Context<Ctx>>) -> BoxFuture<'static, RouteResult<Option<Response>>>
        + Send
        + Sync,
>;

/// Trait for route handler functions
///
/// Automatically implemented for async functions with the signature:
/// `async fn(RouteRequest, Option<Context<Ctx>>) -> RouteResult<Output>`
/// where `Output: IntoResponse`.
///
/// The context argument is `None` when the router has no context builder,
/// or when the builder failed and the handler was registered as not
/// requiring a context.
pub trait Handler<Ctx, Output>: Clone + Send + Sync + 'static
where
    Ctx: Send + Sync + 'static,
    Output: IntoResponse + Send + 'static,
{
    /// The future type returned by the handler
    type Future: Future<Output = RouteResult<Output>> + Send;

    /// Call the handler with the bound request and context
    fn call(&self, req: RouteRequest, ctx: Option<Context<Ctx>>) -> Self::Future;
}

impl<Ctx, Output, F, Fut> Handler<Ctx, Output> for F
where
    Ctx: Send + Sync + 'static,
    Output: IntoResponse + Send + 'static,
    F: Fn(RouteRequest, Option<Context<Ctx>>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = RouteResult<Output>> + Send + 'static,
{
    type Future = Fut;

    fn call(&self, req: RouteRequest, ctx: Option<Context<Ctx>>) -> Self::Future {
        (self)(req, ctx)
    }
}

/// Convert a handler into a boxed handler for storage
pub(crate) fn into_boxed<Ctx, Output, H>(handler: H) -> BoxedHandler<Ctx>
where
    Ctx: Send + Sync + 'static,
    Output: IntoResponse + Send + 'static,
    H: Handler<Ctx, Output>,
{
    Arc::new(move |req, ctx| {
        let handler = handler.clone();
        Box::pin(async move {
            let output = handler.call(req, ctx).await.inspect_err(|e| {
                debug!(error_code = %e.code, error_message = %e.message, "Handler execution failed");
            })?;

            let response = output.into_response().inspect_err(|e| {
                debug!(error = %e, "Handler output conversion failed");
            })?;
            trace!(responded = response.is_some(), "Handler completed");

            Ok(response)
        })
    })
}

/// A stored handler together with its registration options (internal)
pub(crate) struct RouteHandler<Ctx: Send + Sync + 'static> {
    pub(crate) handler: BoxedHandler<Ctx>,
    /// When false, a failed context build still invokes the handler with `None`
    pub(crate) requires_context: bool,
}
