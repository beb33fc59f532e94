//! Error types for routing operations
//!
//! Two families of errors live here:
//!
//! - [`RouteError`] is raised by handlers and context builders while a request
//!   is being dispatched. The dispatcher never lets it escape; it is recorded
//!   and, if nothing else answers the request, rendered into the `reason` of
//!   the internal-error response.
//! - [`RegistrationError`] is returned when a router is bound to a transport
//!   or collected into the plugin facade with an invalid setup.
//!
//! # Example
//! ```rust,ignore
//! use tauri_plugin_router::{RouteError, RouteErrorCode};
//!
//! let error = RouteError::new(RouteErrorCode::NotFound, "User not found");
//! let error = RouteError::not_found("User not found"); // Convenience method
//! ```

use crate::config::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type-safe error codes for route handlers and context builders.
///
/// When serialized to JSON, codes are converted to SCREAMING_SNAKE_CASE
/// (e.g., `NotFound` becomes `"NOT_FOUND"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteErrorCode {
    // Client errors (4xx equivalent)
    /// The request was malformed or invalid
    BadRequest,
    /// Authentication is required
    Unauthorized,
    /// The authenticated caller lacks permission
    Forbidden,
    /// The requested resource was not found
    NotFound,
    /// Input validation failed
    ValidationError,
    /// The request conflicts with current state
    Conflict,
    /// The request body exceeds size limits
    PayloadTooLarge,

    // Server errors (5xx equivalent)
    /// An unexpected internal error occurred
    InternalError,
    /// The requested functionality is not implemented
    NotImplemented,
    /// The service is temporarily unavailable
    ServiceUnavailable,

    // Router-specific errors
    /// A path parameter could not be decoded
    InvalidParameter,
    /// The context builder failed
    ContextError,
    /// JSON serialization/deserialization failed
    SerializationError,
}

impl RouteErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Conflict => "CONFLICT",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::ContextError => "CONTEXT_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest
                | Self::Unauthorized
                | Self::Forbidden
                | Self::NotFound
                | Self::ValidationError
                | Self::Conflict
                | Self::PayloadTooLarge
                | Self::InvalidParameter
        )
    }

    /// Returns true if this is a server error (5xx equivalent).
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::InternalError
                | Self::NotImplemented
                | Self::ServiceUnavailable
                | Self::ContextError
                | Self::SerializationError
        )
    }
}

impl fmt::Display for RouteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised while building a context or running a handler.
///
/// A handler returning `Err(RouteError)` does not end the dispatch: the
/// router moves on to the next candidate and only reports the most recently
/// recorded error once every candidate has been exhausted.
///
/// # Example
/// ```rust,ignore
/// use tauri_plugin_router::RouteError;
///
/// let error = RouteError::validation("Invalid input")
///     .with_details(serde_json::json!({"field": "email"}))
///     .with_cause("regex mismatch");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct RouteError {
    /// Type-safe error code
    pub code: RouteErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (JSON value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Optional cause for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl RouteError {
    /// Create a new error with code and message.
    pub fn new(code: RouteErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Add a cause string for debugging.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Strip internal details from server errors before they reach a client.
    pub fn sanitize(mut self) -> Self {
        if self.code.is_server_error() {
            self.message = "An internal error occurred".to_string();
            self.details = None;
            self.cause = None;
        }
        self
    }

    // Convenience constructors

    /// Create a NOT_FOUND error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::NotFound, message)
    }

    /// Create a BAD_REQUEST error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::BadRequest, message)
    }

    /// Create a VALIDATION_ERROR error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::ValidationError, message)
    }

    /// Create an INTERNAL_ERROR error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::InternalError, message)
    }

    /// Create a CONFLICT error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::Conflict, message)
    }

    /// Create a PAYLOAD_TOO_LARGE error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::PayloadTooLarge, message)
    }

    /// Create a SERIALIZATION_ERROR error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::SerializationError, message)
    }

    /// Create a CONTEXT_ERROR error.
    pub fn context(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::ContextError, message)
    }

    /// Create an INVALID_PARAMETER error for a segment that failed to decode.
    pub fn invalid_parameter(name: &str, raw: &str) -> Self {
        Self::new(
            RouteErrorCode::InvalidParameter,
            format!("Path parameter '{}' is not valid UTF-8 after decoding", name),
        )
        .with_details(serde_json::json!({ "parameter": name, "segment": raw }))
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<tauri::http::Error> for RouteError {
    fn from(err: tauri::http::Error) -> Self {
        Self::internal(format!("HTTP error: {}", err))
    }
}

/// Result type alias for handlers and context builders.
pub type RouteResult<T> = Result<T, RouteError>;

/// Error returned when binding routers to a transport.
///
/// These are setup mistakes, reported synchronously to whoever performs the
/// binding; they never become responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// The router has no registered handlers
    #[error("cannot register protocol '{scheme}': the router has no routes")]
    EmptyRouteTable {
        /// Scheme the router was being bound to
        scheme: String,
    },
    /// The scheme name is empty or contains characters not allowed in a URI scheme
    #[error("invalid protocol scheme '{0}'")]
    InvalidScheme(String),
    /// The same scheme was registered twice on one plugin
    #[error("protocol scheme '{0}' is registered more than once")]
    DuplicateScheme(String),
    /// The router configuration failed validation
    #[error("invalid router configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),
}
