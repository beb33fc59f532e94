//! Binding routers to a host transport
//!
//! A transport is anything that can accept a dispatcher for a URI scheme.
//! Both `tauri::Builder` and `tauri::plugin::Builder` are transports, which
//! lets a router be bound directly on the app or inside a plugin.

use crate::{DynRouter, RegistrationError, logging::log_protocol_registered};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tauri::{Runtime, UriSchemeResponder};

/// A host that accepts a protocol dispatcher for a scheme.
pub trait Transport: Sized {
    /// Install `router` as the handler for `scheme` and return the transport.
    fn install(self, scheme: &str, router: Arc<dyn DynRouter>) -> Self;
}

impl<R: Runtime> Transport for tauri::Builder<R> {
    fn install(self, scheme: &str, router: Arc<dyn DynRouter>) -> Self {
        self.register_asynchronous_uri_scheme_protocol(scheme, move |_ctx, request, responder| {
            spawn_dispatch(router.clone(), request, responder);
        })
    }
}

impl<R: Runtime, C: DeserializeOwned> Transport for tauri::plugin::Builder<R, C> {
    fn install(self, scheme: &str, router: Arc<dyn DynRouter>) -> Self {
        self.register_asynchronous_uri_scheme_protocol(scheme, move |_ctx, request, responder| {
            spawn_dispatch(router.clone(), request, responder);
        })
    }
}

/// Dispatch on the async runtime and answer through the responder
pub(crate) fn spawn_dispatch(
    router: Arc<dyn DynRouter>,
    request: crate::ProtocolRequest,
    responder: UriSchemeResponder,
) {
    tauri::async_runtime::spawn(async move {
        let response = router.dispatch(request).await;
        responder.respond(response);
    });
}

/// Validate a URI scheme name.
///
/// Scheme names start with a letter followed by letters, digits, `+`, `-`
/// or `.`.
pub fn validate_scheme(scheme: &str) -> Result<(), RegistrationError> {
    let mut chars = scheme.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(RegistrationError::InvalidScheme(scheme.to_string()))
    }
}

/// Check that a router can be bound to `scheme`.
pub(crate) fn check_bindable(scheme: &str, router: &dyn DynRouter) -> Result<(), RegistrationError> {
    validate_scheme(scheme)?;
    if router.is_empty() {
        tracing::warn!(scheme = %scheme, "Refusing to bind a router with no routes");
        return Err(RegistrationError::EmptyRouteTable {
            scheme: scheme.to_string(),
        });
    }
    router.config().validate()?;
    Ok(())
}

/// Bind a type-erased router to a transport.
///
/// Nothing is installed when validation fails.
pub fn register<T: Transport>(
    router: Arc<dyn DynRouter>,
    transport: T,
    scheme: impl Into<String>,
) -> Result<T, RegistrationError> {
    let scheme = scheme.into();
    check_bindable(&scheme, router.as_ref())?;

    let route_count = router.handler_count();
    let transport = transport.install(&scheme, router);
    log_protocol_registered(&scheme, route_count);
    Ok(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_schemes() {
        for scheme in ["app", "my-app", "x.y+z", "a1"] {
            assert!(validate_scheme(scheme).is_ok(), "{scheme}");
        }
    }

    #[test]
    fn test_invalid_schemes() {
        for scheme in ["", "1app", "-app", "my app", "app:", "app/x"] {
            assert!(
                matches!(validate_scheme(scheme), Err(RegistrationError::InvalidScheme(_))),
                "{scheme}"
            );
        }
    }
}
