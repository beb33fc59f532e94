//! Request view passed to handlers

use crate::{RouteError, RouteResult, method::HttpMethod};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tauri::http;

/// Request type delivered by a Tauri URI scheme protocol
pub type ProtocolRequest = http::Request<Vec<u8>>;

/// Path parameters bound by a matched pattern.
///
/// Names come from the `:name` segments of the pattern; values are the
/// percent-decoded request segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get a parameter and parse it, failing with BAD_REQUEST if it is
    /// missing or does not parse.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> RouteResult<T> {
        let raw = self
            .get(name)
            .ok_or_else(|| RouteError::bad_request(format!("Missing path parameter '{}'", name)))?;
        raw.parse().map_err(|_| {
            RouteError::bad_request(format!("Invalid value for path parameter '{}'", name))
                .with_details(serde_json::json!({ "parameter": name, "value": raw }))
        })
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameters were bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over name/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// A request bound to the parameters of the pattern that matched it.
///
/// The underlying request is shared between every handler attempt of one
/// dispatch, so cloning a `RouteRequest` is cheap.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    request: Arc<ProtocolRequest>,
    params: Params,
    max_body_size: usize,
}

impl RouteRequest {
    pub(crate) fn new(request: Arc<ProtocolRequest>, params: Params, max_body_size: usize) -> Self {
        Self {
            request,
            params,
            max_body_size,
        }
    }

    /// The original request
    pub fn request(&self) -> &ProtocolRequest {
        &self.request
    }

    /// Bound path parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shortcut for `params().get(name)`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The request method, if it belongs to the supported enumeration
    pub fn method(&self) -> Option<HttpMethod> {
        HttpMethod::from_request_method(self.request.method().as_str())
    }

    /// Raw request body
    pub fn body(&self) -> &[u8] {
        self.request.body()
    }

    /// Decode the request body as JSON.
    ///
    /// Fails with PAYLOAD_TOO_LARGE when the body exceeds the configured
    /// limit and with SERIALIZATION_ERROR when it is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> RouteResult<T> {
        let body = self.body();
        if body.len() > self.max_body_size {
            return Err(RouteError::payload_too_large(format!(
                "Request body of {} bytes exceeds the {} byte limit",
                body.len(),
                self.max_body_size
            )));
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn bound(body: &str, limit: usize) -> RouteRequest {
        let request = http::Request::builder()
            .method("POST")
            .uri("app://user")
            .header("content-type", "application/json")
            .body(body.as_bytes().to_vec())
            .unwrap();
        let params = [("id", "42")].into_iter().collect();
        RouteRequest::new(Arc::new(request), params, limit)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewUser {
        name: String,
    }

    #[test]
    fn test_json_body() {
        let req = bound(r#"{"name":"Ada"}"#, 1024);
        let user: NewUser = req.json().unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.method(), Some(HttpMethod::Post));
    }

    #[test]
    fn test_json_body_too_large() {
        let req = bound(r#"{"name":"Ada"}"#, 4);
        let err = req.json::<NewUser>().unwrap_err();
        assert_eq!(err.code, crate::RouteErrorCode::PayloadTooLarge);
    }

    #[test]
    fn test_json_body_invalid() {
        let req = bound("not json", 1024);
        let err = req.json::<NewUser>().unwrap_err();
        assert_eq!(err.code, crate::RouteErrorCode::SerializationError);
    }

    #[test]
    fn test_param_parse() {
        let req = bound("", 1024);
        assert_eq!(req.params().parse::<u32>("id").unwrap(), 42);
        assert!(req.params().parse::<u32>("missing").is_err());

        let params: Params = [("id", "abc")].into_iter().collect();
        let err = params.parse::<u32>("id").unwrap_err();
        assert_eq!(err.code, crate::RouteErrorCode::BadRequest);
    }
}
