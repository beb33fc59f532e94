//! Error tests - Property-based tests for RouteError

use proptest::prelude::*;

use crate::{RouteError, RouteErrorCode, internal_error_response};

fn any_code() -> impl Strategy<Value = RouteErrorCode> {
    prop_oneof![
        Just(RouteErrorCode::BadRequest),
        Just(RouteErrorCode::Unauthorized),
        Just(RouteErrorCode::Forbidden),
        Just(RouteErrorCode::NotFound),
        Just(RouteErrorCode::ValidationError),
        Just(RouteErrorCode::Conflict),
        Just(RouteErrorCode::PayloadTooLarge),
        Just(RouteErrorCode::InternalError),
        Just(RouteErrorCode::NotImplemented),
        Just(RouteErrorCode::ServiceUnavailable),
        Just(RouteErrorCode::InvalidParameter),
        Just(RouteErrorCode::ContextError),
        Just(RouteErrorCode::SerializationError),
    ]
}

proptest! {
    /// Property: every code is exactly one of client or server class
    #[test]
    fn prop_code_class_is_exclusive(code in any_code()) {
        prop_assert_ne!(code.is_client_error(), code.is_server_error());
    }

    /// Property: codes serialize to their SCREAMING_SNAKE_CASE name
    #[test]
    fn prop_code_serializes_as_str(code in any_code()) {
        let json = serde_json::to_value(code).unwrap();
        prop_assert_eq!(json, serde_json::json!(code.as_str()));
    }

    /// Property: sanitize keeps client errors intact and scrubs server errors
    #[test]
    fn prop_sanitize_only_scrubs_server_errors(
        code in any_code(),
        message in "[a-zA-Z0-9 ]{1,40}",
        cause in "[a-zA-Z0-9 ]{1,40}",
    ) {
        let error = RouteError::new(code, message.clone())
            .with_cause(cause.clone())
            .with_details(serde_json::json!({ "k": 1 }));
        let sanitized = error.sanitize();

        prop_assert_eq!(sanitized.code, code);
        if code.is_server_error() {
            prop_assert_ne!(&sanitized.message, &message);
            prop_assert!(sanitized.cause.is_none());
            prop_assert!(sanitized.details.is_none());
        } else {
            prop_assert_eq!(&sanitized.message, &message);
            prop_assert_eq!(sanitized.cause, Some(cause));
        }
    }

    /// Property: the internal-error body always embeds the error as its reason
    #[test]
    fn prop_internal_error_body_embeds_reason(code in any_code(), message in "[a-z ]{1,30}") {
        let error = RouteError::new(code, message.clone());
        let response = internal_error_response(&error);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();

        prop_assert_eq!(response.status().as_u16(), 500);
        prop_assert_eq!(&body["message"], "Internal error");
        prop_assert_eq!(&body["reason"]["code"], code.as_str());
        prop_assert_eq!(&body["reason"]["message"], message.as_str());
    }
}

#[test]
fn test_display_includes_code_and_message() {
    let error = RouteError::not_found("User 7 not found");
    assert_eq!(error.to_string(), "[NOT_FOUND] User 7 not found");
}

#[test]
fn test_serde_json_error_converts() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: RouteError = err.into();
    assert_eq!(error.code, RouteErrorCode::SerializationError);
}

#[test]
fn test_invalid_parameter_details() {
    let error = RouteError::invalid_parameter("id", "%FF");
    assert_eq!(error.code, RouteErrorCode::InvalidParameter);
    assert_eq!(error.details.unwrap()["segment"], "%FF");
}
