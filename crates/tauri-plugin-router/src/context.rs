//! Context types for per-request dependency injection

use crate::{ProtocolRequest, Response, RouteError, RouteResult};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// Context wrapper handed to handlers.
///
/// A context is built by the router's context builder for a single handler
/// attempt and dropped afterwards. Cloning only bumps a reference count.
pub struct Context<T: Send + Sync + 'static> {
    inner: Arc<T>,
}

impl<T: Send + Sync + 'static> Context<T> {
    /// Create a new context wrapping the given value
    pub fn new(ctx: T) -> Self {
        Self {
            inner: Arc::new(ctx),
        }
    }

    /// Get a reference to the inner context
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Send + Sync + 'static> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> std::ops::Deref for Context<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Empty context for routers without a context builder
#[derive(Clone, Copy, Default, Debug)]
pub struct EmptyContext;

/// Result of running a context builder.
///
/// `Respond` is not an error: it is a finished response (for example a 401
/// from an authentication check) that ends the dispatch immediately, without
/// trying any further candidates.
///
/// A builder that already has a [`RouteResult`] can return `result.into()`:
/// `Ok` becomes `Ready` and `Err` becomes `Failed`.
pub enum ContextOutcome<C> {
    /// The context was built
    Ready(C),
    /// Stop dispatching and return this response as-is
    Respond(Response),
    /// Building failed; the dispatcher records the error and falls back
    Failed(RouteError),
}

impl<C> From<RouteResult<C>> for ContextOutcome<C> {
    fn from(result: RouteResult<C>) -> Self {
        match result {
            Ok(ctx) => Self::Ready(ctx),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Boxed context builder stored on the router (internal)
pub(crate) type BoxedContextBuilder<C> =
    Arc<dyn Fn(Arc<ProtocolRequest>) -> BoxFuture<'static, ContextOutcome<C>> + Send + Sync>;

/// Box a context builder function for storage
pub(crate) fn into_boxed_builder<C, F, Fut>(builder: F) -> BoxedContextBuilder<C>
where
    C: Send + Sync + 'static,
    F: Fn(Arc<ProtocolRequest>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ContextOutcome<C>> + Send + 'static,
{
    let builder = Arc::new(builder);
    // The call happens inside the future so a panicking builder is caught
    // together with everything it awaits.
    Arc::new(move |request| {
        let builder = builder.clone();
        Box::pin(async move { builder(request).await })
    })
}
