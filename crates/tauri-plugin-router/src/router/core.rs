//! Core router implementation
//!
//! This module contains the [`Router`] type: registration methods, the
//! dispatch loop, and binding to a transport.

use super::{
    matcher::{match_pattern, request_path},
    table::{RouteInfo, RouteTable},
};
use crate::{
    Context, ContextOutcome, EmptyContext, IntoResponse, ProtocolRequest, RegistrationError,
    Response, RouteError, RouteRequest, RouterConfig,
    context::{BoxedContextBuilder, into_boxed_builder},
    handler::{BoxedHandler, Handler, RouteHandler, into_boxed},
    logging::{RequestId, log_route_registered},
    method::{HttpMethod, MethodFilter},
    response::{internal_error_response, not_found_response},
    transport::{Transport, register},
};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Request router with per-method buckets and fallback chains
///
/// Handlers are registered against `/`-separated patterns whose `:name`
/// segments bind path parameters. A request is offered to every matching
/// handler in registration order until one produces a response.
///
/// The router provides no synchronization for state captured by handlers;
/// handlers that share mutable state must guard it themselves.
///
/// # Example
/// ```rust,ignore
/// let router = Router::new()
///     .get("/user/:id", get_user)
///     .post("/user", create_user)
///     .on("/health", health);
///
/// router
///     .register(tauri::Builder::default(), "app")?
///     .run(tauri::generate_context!())?;
/// ```
pub struct Router<Ctx: Send + Sync + 'static = EmptyContext> {
    table: RouteTable<Ctx>,
    context_builder: Option<BoxedContextBuilder<Ctx>>,
    config: RouterConfig,
}

impl Default for Router<EmptyContext> {
    fn default() -> Self {
        Self::new()
    }
}

impl Router<EmptyContext> {
    /// Create a router without a context builder.
    ///
    /// Handlers always receive `None` as their context.
    pub fn new() -> Self {
        Self {
            table: RouteTable::default(),
            context_builder: None,
            config: RouterConfig::default(),
        }
    }
}

impl<Ctx: Send + Sync + 'static> Router<Ctx> {
    /// Create a router whose handlers receive a per-request context.
    ///
    /// The builder runs before every handler attempt; its result is never
    /// cached, not even within one dispatch. Returning
    /// [`ContextOutcome::Respond`] ends the dispatch with that response.
    ///
    /// # Example
    /// ```rust,ignore
    /// let router = Router::with_context(|req: Arc<ProtocolRequest>| async move {
    ///     match req.headers().get("authorization") {
    ///         Some(token) => ContextOutcome::Ready(Session::from(token)),
    ///         None => ContextOutcome::Respond(unauthorized()),
    ///     }
    /// });
    /// ```
    pub fn with_context<F, Fut>(builder: F) -> Self
    where
        F: Fn(Arc<ProtocolRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ContextOutcome<Ctx>> + Send + 'static,
    {
        Self {
            table: RouteTable::default(),
            context_builder: Some(into_boxed_builder(builder)),
            config: RouterConfig::default(),
        }
    }

    /// Replace the router configuration
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the router configuration
    pub fn get_config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a handler for a method filter and pattern.
    ///
    /// Every per-method shortcut delegates here. Registering the same
    /// (method, pattern) again appends to its fallback chain.
    pub fn route<O, H>(
        self,
        filter: impl Into<MethodFilter>,
        pattern: impl Into<String>,
        handler: H,
    ) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.add(filter.into(), pattern.into(), into_boxed(handler), true)
    }

    pub(crate) fn add(
        mut self,
        filter: MethodFilter,
        pattern: String,
        handler: BoxedHandler<Ctx>,
        requires_context: bool,
    ) -> Self {
        let method = filter.to_string();
        let log_pattern = pattern.clone();
        let position = self.table.insert(
            filter,
            pattern,
            RouteHandler {
                handler,
                requires_context,
            },
        );
        log_route_registered(&method, &log_pattern, position);
        self
    }

    /// Register a GET handler
    pub fn get<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Get, pattern, handler)
    }

    /// Register a POST handler
    pub fn post<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Post, pattern, handler)
    }

    /// Register a PUT handler
    pub fn put<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Put, pattern, handler)
    }

    /// Register a DELETE handler
    pub fn delete<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Delete, pattern, handler)
    }

    /// Register a PATCH handler
    pub fn patch<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Patch, pattern, handler)
    }

    /// Register a HEAD handler
    pub fn head<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Head, pattern, handler)
    }

    /// Register an OPTIONS handler
    pub fn options<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Options, pattern, handler)
    }

    /// Register a TRACE handler
    pub fn trace<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Trace, pattern, handler)
    }

    /// Register a CONNECT handler
    pub fn connect<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(HttpMethod::Connect, pattern, handler)
    }

    /// Register a handler for any method.
    ///
    /// Wildcard routes are tried after the request method's own routes, and
    /// take part in the same fallback sequence.
    pub fn on<O, H>(self, pattern: impl Into<String>, handler: H) -> Self
    where
        O: IntoResponse + Send + 'static,
        H: Handler<Ctx, O>,
    {
        self.route(MethodFilter::Any, pattern, handler)
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.table.handler_count()
    }

    /// Returns true if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.table.handler_count() == 0
    }

    /// List registered routes
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.table.routes()
    }

    /// Bind this router to a transport under `scheme`.
    ///
    /// # Errors
    ///
    /// Fails without touching the transport if no handler was registered,
    /// if the scheme name is invalid, or if the configuration is invalid.
    pub fn register<T: Transport>(
        self,
        transport: T,
        scheme: impl Into<String>,
    ) -> Result<T, RegistrationError> {
        register(Arc::new(self), transport, scheme)
    }

    /// Dispatch a request.
    ///
    /// Always produces a response: the first handler response, a
    /// short-circuit response from the context builder, a 404 when nothing
    /// matched, or a 500 carrying the most recent failure.
    pub async fn dispatch(&self, request: ProtocolRequest) -> Response {
        let request_id = RequestId::new();
        let start = Instant::now();
        let method = HttpMethod::from_request_method(request.method().as_str());
        let path = request_path(&request);

        debug!(
            request_id = %request_id,
            method = %request.method(),
            path = %path,
            "Dispatch started"
        );

        let response = self
            .run(request_id, Arc::new(request), method, &path)
            .await;

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            request_id = %request_id,
            path = %path,
            status = %response.status().as_u16(),
            duration_ms = %duration_ms,
            "Dispatch completed"
        );
        if self.config.is_slow(duration_ms) {
            warn!(
                request_id = %request_id,
                path = %path,
                duration_ms = %duration_ms,
                threshold_ms = %self.config.slow_dispatch_threshold_ms,
                "Slow dispatch"
            );
        }

        response
    }

    async fn run(
        &self,
        request_id: RequestId,
        request: Arc<ProtocolRequest>,
        method: Option<HttpMethod>,
        path: &str,
    ) -> Response {
        let mut last_error: Option<RouteError> = None;

        for (filter, entry) in self.table.candidates(method) {
            let params = match match_pattern(&entry.pattern, path) {
                Ok(Some(params)) => params,
                Ok(None) => continue,
                Err(err) => {
                    warn!(
                        request_id = %request_id,
                        pattern = %entry.pattern,
                        error = %err,
                        "Path parameter decoding failed"
                    );
                    last_error = Some(err);
                    continue;
                }
            };

            trace!(
                request_id = %request_id,
                method = %filter,
                pattern = %entry.pattern,
                handlers = entry.handlers.len(),
                "Pattern matched"
            );

            for (position, route) in entry.handlers.iter().enumerate() {
                let ctx = match &self.context_builder {
                    None => None,
                    Some(builder) => match self.build_context(builder, &request).await {
                        ContextOutcome::Ready(ctx) => Some(Context::new(ctx)),
                        ContextOutcome::Respond(response) => {
                            debug!(
                                request_id = %request_id,
                                pattern = %entry.pattern,
                                status = %response.status().as_u16(),
                                "Context builder short-circuited"
                            );
                            return response;
                        }
                        ContextOutcome::Failed(err) if route.requires_context => {
                            warn!(
                                request_id = %request_id,
                                pattern = %entry.pattern,
                                position = position,
                                error_code = %err.code,
                                error_message = %err.message,
                                "Context build failed"
                            );
                            last_error = Some(err);
                            continue;
                        }
                        ContextOutcome::Failed(err) => {
                            debug!(
                                request_id = %request_id,
                                pattern = %entry.pattern,
                                position = position,
                                error = %err,
                                "Context build failed, invoking handler without context"
                            );
                            None
                        }
                    },
                };

                let req = RouteRequest::new(
                    request.clone(),
                    params.clone(),
                    self.config.max_body_size,
                );
                let attempt = AssertUnwindSafe((route.handler)(req, ctx))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| Err(panic_error("Handler", panic)));

                match attempt {
                    Ok(Some(response)) => {
                        trace!(
                            request_id = %request_id,
                            pattern = %entry.pattern,
                            position = position,
                            "Handler responded"
                        );
                        return response;
                    }
                    Ok(None) => {
                        trace!(
                            request_id = %request_id,
                            pattern = %entry.pattern,
                            position = position,
                            "Handler passed"
                        );
                    }
                    Err(err) => {
                        warn!(
                            request_id = %request_id,
                            pattern = %entry.pattern,
                            position = position,
                            error_code = %err.code,
                            error_message = %err.message,
                            "Handler failed, trying next candidate"
                        );
                        last_error = Some(err);
                    }
                }
            }
        }

        match last_error {
            Some(err) => {
                warn!(
                    request_id = %request_id,
                    path = %path,
                    error_code = %err.code,
                    error_message = %err.message,
                    "All candidates exhausted with errors"
                );
                let reason = if self.config.expose_error_reason {
                    err
                } else {
                    err.sanitize()
                };
                internal_error_response(&reason)
            }
            None => {
                debug!(request_id = %request_id, path = %path, "No route matched");
                not_found_response()
            }
        }
    }

    async fn build_context(
        &self,
        builder: &BoxedContextBuilder<Ctx>,
        request: &Arc<ProtocolRequest>,
    ) -> ContextOutcome<Ctx> {
        AssertUnwindSafe(builder(request.clone()))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| ContextOutcome::Failed(panic_error("Context builder", panic)))
    }
}

/// Turn a caught panic payload into a recorded error
fn panic_error(source: &str, panic: Box<dyn Any + Send>) -> RouteError {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    RouteError::internal(format!("{} panicked", source)).with_cause(message)
}
