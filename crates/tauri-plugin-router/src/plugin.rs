//! Tauri plugin integration
//!
//! [`Builder`] binds any number of routers, each to its own URI scheme, and
//! produces a plugin named `router`. The plugin also exposes a `routes`
//! command so the frontend can list what a scheme serves.

use crate::{
    DynRouter, RegistrationError, RouteError, RouteInfo,
    logging::{log_plugin_init, log_protocol_registered},
    transport::{Transport, check_bindable},
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tauri::{
    Manager, Runtime, State,
    plugin::{Builder as PluginBuilder, TauriPlugin},
};
use tracing::debug;

// =============================================================================
// Plugin State
// =============================================================================

/// Routers installed by the plugin, keyed by scheme
pub struct ProtocolsState(HashMap<String, Arc<dyn DynRouter>>);

impl ProtocolsState {
    /// Routes served under `scheme`, if it is bound
    pub fn routes(&self, scheme: &str) -> Option<Vec<RouteInfo>> {
        self.0.get(scheme).map(|router| router.routes())
    }

    /// Bound schemes, sorted
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.0.keys().cloned().collect();
        schemes.sort();
        schemes
    }
}

// =============================================================================
// Tauri Commands
// =============================================================================

#[tauri::command]
fn routes(scheme: String, state: State<'_, ProtocolsState>) -> Result<Vec<RouteInfo>, RouteError> {
    debug!(scheme = %scheme, "Listing routes");
    state
        .routes(&scheme)
        .ok_or_else(|| RouteError::not_found(format!("No router bound to scheme '{}'", scheme)))
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for the router plugin.
///
/// # Example
/// ```rust,ignore
/// tauri::Builder::default()
///     .plugin(
///         tauri_plugin_router::Builder::new()
///             .protocol("app", app_router())
///             .protocol("assets", asset_router())
///             .build()?,
///     )
///     .run(tauri::generate_context!())?;
/// ```
#[derive(Default)]
pub struct Builder {
    protocols: Vec<(String, Arc<dyn DynRouter>)>,
}

impl Builder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `router` to `scheme`
    #[must_use = "This method returns a new Builder and does not modify self"]
    pub fn protocol<D>(mut self, scheme: impl Into<String>, router: D) -> Self
    where
        D: DynRouter + 'static,
    {
        self.protocols.push((scheme.into(), Arc::new(router)));
        self
    }

    /// Check every binding without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first invalid scheme, duplicate scheme, empty router or
    /// invalid router configuration, in binding order.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let mut seen = HashSet::new();
        for (scheme, router) in &self.protocols {
            if !seen.insert(scheme.as_str()) {
                return Err(RegistrationError::DuplicateScheme(scheme.clone()));
            }
            check_bindable(scheme, router.as_ref())?;
        }
        Ok(())
    }

    /// Build the plugin.
    ///
    /// # Errors
    ///
    /// See [`Builder::validate`]. Nothing is installed on failure.
    pub fn build<R: Runtime>(self) -> Result<TauriPlugin<R>, RegistrationError> {
        self.validate()?;

        let mut builder =
            PluginBuilder::<R>::new("router").invoke_handler(tauri::generate_handler![routes]);
        for (scheme, router) in &self.protocols {
            builder = builder.install(scheme, router.clone());
            log_protocol_registered(scheme, router.handler_count());
        }

        let state = ProtocolsState(self.protocols.into_iter().collect());
        Ok(builder
            .setup(move |app, _api| {
                log_plugin_init(&state.schemes());
                app.manage(state);
                Ok(())
            })
            .build())
    }
}

/// Build a plugin serving a single router under `scheme`.
pub fn init<R, D>(scheme: impl Into<String>, router: D) -> Result<TauriPlugin<R>, RegistrationError>
where
    R: Runtime,
    D: DynRouter + 'static,
{
    Builder::new().protocol(scheme, router).build()
}
