#![warn(missing_docs)]
//! # Tauri Router Plugin
//!
//! Method- and path-based request routing for Tauri custom URI schemes.
//!
//! ## Overview
//!
//! A [`Router`] maps `(method, pattern)` pairs to ordered lists of handlers:
//! - **Path parameters** bound from `:name` segments and percent-decoded
//! - **Fallback chains** across handlers, patterns and the wildcard bucket
//! - **Optional context builder** that can answer a request on its own
//! - **Uniform failures**: 404 `{"message":"Not found"}` and 500
//!   `{"message":"Internal error","reason":...}`
//!
//! ## Quick Start
//!
//! ### 1. Write Handlers
//!
//! ```rust,ignore
//! use tauri_plugin_router::prelude::*;
//!
//! async fn get_user(req: RouteRequest, _ctx: Option<Context<EmptyContext>>) -> RouteResult<Option<Json<User>>> {
//!     let id: u32 = req.params().parse("id")?;
//!     Ok(USERS.get(id).map(Json))
//! }
//! ```
//!
//! Returning `Ok(None)` passes the request to the next candidate.
//!
//! ### 2. Build a Router
//!
//! ```rust,ignore
//! let router = Router::new()
//!     .get("/user/:id", get_user)
//!     .get("/user/:id", get_remote_user)
//!     .on("/health", health);
//! ```
//!
//! ### 3. Bind It
//!
//! ```rust,ignore
//! router
//!     .register(tauri::Builder::default(), "app")?
//!     .run(tauri::generate_context!())?;
//! ```
//!
//! or as a plugin:
//!
//! ```rust,ignore
//! tauri::Builder::default()
//!     .plugin(tauri_plugin_router::init("app", router)?)
//!     .run(tauri::generate_context!())?;
//! ```
//!
//! The webview then fetches `app://user/42`; the authority is the first path
//! segment, so the request matches `/user/:id`.
//!
//! ## Context
//!
//! ```rust,ignore
//! let router = Router::with_context(|req: Arc<ProtocolRequest>| async move {
//!     match req.headers().get("authorization") {
//!         Some(_) => ContextOutcome::Ready(Session::default()),
//!         None => match json_response(StatusCode::UNAUTHORIZED, &json!({"message": "Unauthorized"})) {
//!             Ok(response) => ContextOutcome::Respond(response),
//!             Err(err) => ContextOutcome::Failed(err),
//!         },
//!     }
//! })
//! .get("/account", account);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

mod config;
mod context;
mod error;
mod handler;
pub mod logging;
mod method;
mod plugin;
mod request;
mod response;
mod router;
mod transport;

#[cfg(test)]
mod tests;

// Public API
pub use config::{ConfigValidationError, RouterConfig};
pub use context::{Context, ContextOutcome, EmptyContext};
pub use error::{RegistrationError, RouteError, RouteErrorCode, RouteResult};
pub use handler::Handler;
pub use logging::RequestId;
pub use method::{HttpMethod, MethodFilter, UnknownMethod};
pub use plugin::{Builder, ProtocolsState, init};
pub use request::{Params, ProtocolRequest, RouteRequest};
pub use response::{
    IntoResponse, Json, Response, internal_error_response, json_response, not_found_response,
};
pub use router::{DynRouter, RouteChain, RouteInfo, Router};
pub use transport::{Transport, register, validate_scheme};

/// Re-exported so handlers can build responses without a direct `http` dependency
pub use tauri::http::StatusCode;

/// Prelude for convenient imports
///
/// ```rust,ignore
/// use tauri_plugin_router::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Context, ContextOutcome, EmptyContext, HttpMethod, IntoResponse, Json, MethodFilter,
        Params, ProtocolRequest, RegistrationError, Response, RouteError, RouteErrorCode,
        RouteRequest, RouteResult, Router, RouterConfig, StatusCode, json_response,
    };
}
