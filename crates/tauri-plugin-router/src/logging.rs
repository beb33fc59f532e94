//! Structured logging helpers.
//!
//! The router emits `tracing` events; installing a subscriber is left to the
//! application. Every dispatch is tagged with a [`RequestId`] so the events
//! of one request (candidate matches, handler failures, the final outcome)
//! can be correlated.

use serde::{Deserialize, Serialize};

/// Unique identifier for a dispatched request.
///
/// Uses UUID v7 for time-ordered, sortable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(uuid::Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Lifecycle Logging
// =============================================================================

/// Log a route registration. Logged at Trace level.
pub fn log_route_registered(method: &str, pattern: &str, position: usize) {
    tracing::trace!(
        method = %method,
        pattern = %pattern,
        position = %position,
        "Route registered"
    );
}

/// Log a router being installed as a protocol handler. Logged at Info level.
pub fn log_protocol_registered(scheme: &str, route_count: usize) {
    tracing::info!(
        scheme = %scheme,
        route_count = %route_count,
        "Protocol router registered"
    );
}

/// Log plugin initialization. Logged at Info level.
pub fn log_plugin_init(schemes: &[String]) {
    tracing::info!(
        schemes = ?schemes,
        "Router plugin initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_request_id_is_v7() {
        let id = RequestId::new();
        assert_eq!(id.0.get_version_num(), 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
