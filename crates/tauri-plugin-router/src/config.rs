//! Configuration module for the router.
//!
//! [`RouterConfig`] tunes the behavior around dispatch: what the synthetic
//! internal-error response reveals, when a dispatch counts as slow, and how
//! large a body [`RouteRequest::json`](crate::RouteRequest::json) accepts.
//!
//! # Example
//! ```rust,ignore
//! use tauri_plugin_router::{Router, RouterConfig};
//!
//! let config = RouterConfig::new()
//!     .with_expose_error_reason(cfg!(debug_assertions))
//!     .with_slow_dispatch_threshold(250);
//!
//! let router = Router::new().config(config);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default threshold for slow dispatch logging in milliseconds.
pub const DEFAULT_SLOW_DISPATCH_THRESHOLD_MS: u64 = 1000;

/// Default maximum request body size accepted by JSON decoding (10MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigValidationError {
    /// max_body_size must be greater than 0
    InvalidMaxBodySize,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxBodySize => write!(f, "max_body_size must be greater than 0"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Router configuration.
///
/// All fields have defaults that reproduce the plain routing behavior, so
/// `RouterConfig::default()` is always a valid starting point.
///
/// # Fields
///
/// * `expose_error_reason` - Include the recorded error verbatim in the
///   `reason` of the 500 response. When disabled, server-class errors are
///   sanitized first. Default: true.
///
/// * `slow_dispatch_threshold_ms` - Dispatches taking longer than this are
///   logged at warn level. 0 disables the check. Default: 1000.
///
/// * `max_body_size` - Largest body, in bytes, that `RouteRequest::json`
///   will decode. Default: 10MB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Include the recorded error in internal-error responses (default: true)
    pub expose_error_reason: bool,
    /// Slow dispatch warning threshold in milliseconds (default: 1000)
    pub slow_dispatch_threshold_ms: u64,
    /// Maximum body size for JSON decoding in bytes (default: 10MB)
    pub max_body_size: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            expose_error_reason: true,
            slow_dispatch_threshold_ms: DEFAULT_SLOW_DISPATCH_THRESHOLD_MS,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_body_size` is 0.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_body_size == 0 {
            return Err(ConfigValidationError::InvalidMaxBodySize);
        }
        Ok(())
    }

    /// Choose whether the 500 response carries the unsanitized error.
    pub fn with_expose_error_reason(mut self, expose: bool) -> Self {
        self.expose_error_reason = expose;
        self
    }

    /// Set the slow dispatch threshold in milliseconds (0 disables).
    pub fn with_slow_dispatch_threshold(mut self, threshold_ms: u64) -> Self {
        self.slow_dispatch_threshold_ms = threshold_ms;
        self
    }

    /// Set the maximum body size accepted by JSON decoding.
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Returns true if a dispatch of the given duration should be flagged.
    pub fn is_slow(&self, duration_ms: u64) -> bool {
        self.slow_dispatch_threshold_ms > 0 && duration_ms > self.slow_dispatch_threshold_ms
    }
}
