//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use tauri::http;
use tauri_plugin_router::{DynRouter, ProtocolRequest, Response, Transport};

/// Transport that records installed routers instead of serving them.
#[derive(Default)]
pub struct RecordingTransport {
    pub installed: HashMap<String, Arc<dyn DynRouter>>,
}

impl Transport for RecordingTransport {
    fn install(mut self, scheme: &str, router: Arc<dyn DynRouter>) -> Self {
        self.installed.insert(scheme.to_string(), router);
        self
    }
}

impl RecordingTransport {
    pub async fn send(&self, scheme: &str, request: ProtocolRequest) -> Response {
        self.installed[scheme].dispatch(request).await
    }
}

pub fn request(method: &str, uri: &str, body: &str) -> ProtocolRequest {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(body.as_bytes().to_vec())
        .unwrap()
}

pub fn body_json(response: &Response) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap()
}
