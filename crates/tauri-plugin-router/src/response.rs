//! Response types and conversions
//!
//! Handlers may return anything implementing [`IntoResponse`]. Returning
//! `None` (through `Option<T>`) means "no response from this handler" and
//! lets the dispatcher move on to the next candidate.

use crate::{RouteError, RouteResult};
use serde::Serialize;
use tauri::http::{self, HeaderValue, StatusCode, header::CONTENT_TYPE};

/// Response type returned to the Tauri URI scheme responder
pub type Response = http::Response<Vec<u8>>;

/// Conversion from a handler's output into an optional response.
pub trait IntoResponse {
    /// Convert into a response, or `None` to pass to the next candidate.
    fn into_response(self) -> RouteResult<Option<Response>>;
}

impl IntoResponse for Response {
    fn into_response(self) -> RouteResult<Option<Response>> {
        Ok(Some(self))
    }
}

impl<T: IntoResponse> IntoResponse for Option<T> {
    fn into_response(self) -> RouteResult<Option<Response>> {
        match self {
            Some(inner) => inner.into_response(),
            None => Ok(None),
        }
    }
}

/// Serialize a value as a `200 OK` JSON response.
///
/// Pair it with a status code to answer with something other than 200:
///
/// ```rust,ignore
/// Ok((StatusCode::CREATED, Json(user)))
/// ```
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> RouteResult<Option<Response>> {
        json_response(StatusCode::OK, &self.0).map(Some)
    }
}

impl<T: Serialize> IntoResponse for (StatusCode, Json<T>) {
    fn into_response(self) -> RouteResult<Option<Response>> {
        json_response(self.0, &(self.1).0).map(Some)
    }
}

/// Build a JSON response with the given status.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> RouteResult<Response> {
    let body = serde_json::to_vec(value)?;
    Ok(with_json_body(status, body))
}

/// The 404 response produced when no candidate answered and none failed.
pub fn not_found_response() -> Response {
    let body = serde_json::json!({ "message": "Not found" });
    with_json_body(StatusCode::NOT_FOUND, body.to_string().into_bytes())
}

/// The 500 response produced when every candidate was exhausted and at least
/// one of them failed. `reason` is the most recently recorded error.
pub fn internal_error_response(reason: &RouteError) -> Response {
    let body = serde_json::json!({
        "message": "Internal error",
        "reason": reason,
    });
    with_json_body(StatusCode::INTERNAL_SERVER_ERROR, body.to_string().into_bytes())
}

fn with_json_body(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
