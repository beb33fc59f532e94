//! Router tests

mod property_tests;

use crate::ProtocolRequest;
use serde_json::Value;
use tauri::http;

pub(super) fn request(method: &str, uri: &str) -> ProtocolRequest {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Vec::new())
        .unwrap()
}

pub(super) fn body_json(response: &crate::Response) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}
