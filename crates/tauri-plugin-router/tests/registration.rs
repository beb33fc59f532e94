//! Binding routers to a transport

mod common;

use common::{RecordingTransport, body_json, request};
use tauri_plugin_router::{
    Context, EmptyContext, Json, RegistrationError, RouteRequest, RouteResult, Router, StatusCode,
};

async fn hello(_req: RouteRequest, _ctx: Option<Context<EmptyContext>>) -> RouteResult<Json<&'static str>> {
    Ok(Json("hello"))
}

#[test]
fn test_empty_router_is_rejected() {
    let result = Router::new().register(RecordingTransport::default(), "app");

    match result {
        Err(RegistrationError::EmptyRouteTable { scheme }) => assert_eq!(scheme, "app"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("empty router must not be installed"),
    }
}

#[test]
fn test_empty_context_router_is_rejected() {
    let router = Router::with_context(|_req| async move {
        tauri_plugin_router::ContextOutcome::Ready(())
    });

    assert!(matches!(
        router.register(RecordingTransport::default(), "app"),
        Err(RegistrationError::EmptyRouteTable { .. })
    ));
}

#[test]
fn test_invalid_scheme_is_rejected() {
    let router = Router::new().get("/hello", hello);

    assert!(matches!(
        router.register(RecordingTransport::default(), "not a scheme"),
        Err(RegistrationError::InvalidScheme(_))
    ));
}

#[tokio::test]
async fn test_registered_router_serves_requests() {
    let transport = Router::new()
        .get("/hello", hello)
        .register(RecordingTransport::default(), "app")
        .unwrap();

    assert_eq!(transport.installed.len(), 1);

    let response = transport.send("app", request("GET", "app://hello", "")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(&response), "hello");

    let response = transport.send("app", request("GET", "app://missing", "")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_several_schemes_on_one_transport() {
    let transport = RecordingTransport::default();
    let transport = Router::new().get("/hello", hello).register(transport, "app").unwrap();
    let transport = Router::new().on("/hello", hello).register(transport, "assets").unwrap();

    assert_eq!(transport.installed.len(), 2);
    let response = transport.send("assets", request("PUT", "assets://hello", "")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.installed["app"].routes()[0].method, "GET");
}
