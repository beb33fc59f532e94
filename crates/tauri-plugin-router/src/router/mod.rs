//! Router implementation with builder pattern
//!
//! This module provides the [`Router`] type, which maps `(method, pattern)`
//! pairs to ordered handler lists and dispatches requests through them.
//!
//! ```rust,ignore
//! let router = Router::new()
//!     .get("/user/:id", get_user)
//!     .get("/user/:id", get_user_from_cache)
//!     .post("/user", create_user)
//!     .on("/health", health);
//! ```
//!
//! # Dispatch
//!
//! A request is offered to the patterns of its own method first, then to the
//! wildcard patterns registered with [`Router::on`]. Within a pattern,
//! handlers run in registration order. The first handler that produces a
//! response wins. A handler that returns `None` or fails passes the request
//! on; when every candidate is exhausted the router answers 404, or 500 with
//! the most recent failure if there was one.
//!
//! [`Router`] implements [`DynRouter`] and can be bound with
//! [`Router::register`] or the plugin [`Builder`](crate::Builder).

// Module declarations
mod builder;
mod core;
mod dyn_router;
pub(crate) mod matcher;
mod table;

// Public re-exports
pub use builder::RouteChain;
pub use core::Router;
pub use dyn_router::DynRouter;
pub use table::RouteInfo;

#[cfg(test)]
mod tests;
