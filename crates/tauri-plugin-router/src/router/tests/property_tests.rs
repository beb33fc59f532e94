//! Property-based tests for matching and dispatch

use super::{body_json, request};
use crate::{
    Context, EmptyContext, Json, Response, RouteError, RouteRequest, RouteResult, Router,
    StatusCode, router::matcher::match_pattern,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use proptest::prelude::*;

type Ctx = Option<Context<EmptyContext>>;

async fn echo_params(req: RouteRequest, _ctx: Ctx) -> RouteResult<Json<Vec<(String, String)>>> {
    let mut params: Vec<(String, String)> = req
        .params()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    params.sort();
    Ok(Json(params))
}

async fn fails(_req: RouteRequest, _ctx: Ctx) -> RouteResult<Option<Response>> {
    Err(RouteError::internal("always"))
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Property: a pattern of N segments never matches a path of M != N segments
#[test]
fn prop_segment_count_mismatch_never_matches() {
    proptest!(|(
        pattern in prop::collection::vec(segment(), 1..6),
        path in prop::collection::vec(segment(), 1..6),
        as_params in any::<bool>(),
    )| {
        prop_assume!(pattern.len() != path.len());
        let pattern: String = pattern
            .iter()
            .map(|s| if as_params { format!("/:{}", s) } else { format!("/{}", s) })
            .collect();
        let path: String = path.iter().map(|s| format!("/{}", s)).collect();

        prop_assert_eq!(match_pattern(&pattern, &path).unwrap(), None);
    });
}

/// Property: every parameter binds the decoded value of its segment
#[test]
fn prop_params_bind_decoded_values() {
    proptest!(|(values in prop::collection::vec("\\PC{1,12}", 1..5))| {
        let pattern: String = (0..values.len()).map(|i| format!("/:p{}", i)).collect();
        let path: String = values
            .iter()
            .map(|v| format!("/{}", utf8_percent_encode(v, NON_ALPHANUMERIC)))
            .collect();

        let params = match_pattern(&pattern, &path).unwrap().unwrap();
        prop_assert_eq!(params.len(), values.len());
        for (i, value) in values.iter().enumerate() {
            let name = format!("p{}", i);
            prop_assert_eq!(params.get(&name), Some(value.as_str()));
        }
    });
}

/// Property: a registered (method, pattern) is reached with that method and a matching path
#[test]
fn prop_registered_route_is_reachable() {
    proptest!(|(
        literal in segment(),
        id in "[A-Za-z0-9 ]{1,10}",
        method_index in 0usize..crate::HttpMethod::ALL.len(),
    )| {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let method = crate::HttpMethod::ALL[method_index];
        let pattern = format!("/{}/:id", literal);
        let router = Router::new().route(method, pattern, echo_params);

        let uri = format!("/{}/{}", literal, utf8_percent_encode(&id, NON_ALPHANUMERIC));
        let response = rt.block_on(router.dispatch(request(method.as_str(), &uri)));

        prop_assert_eq!(response.status(), StatusCode::OK);
        prop_assert_eq!(body_json(&response), serde_json::json!([["id", id]]));
    });
}

/// Property: fallback order equals registration order
#[test]
fn prop_first_successful_handler_in_order_wins() {
    proptest!(|(failures in 0usize..5)| {
        let rt = tokio::runtime::Runtime::new().unwrap();

        let mut router = Router::new();
        for _ in 0..failures {
            router = router.get("/x/:id", fails);
        }
        let router = router.get("/x/:id", echo_params).get("/x/:id", fails);

        let response = rt.block_on(router.dispatch(request("GET", "/x/1")));
        prop_assert_eq!(response.status(), StatusCode::OK);
        prop_assert_eq!(router.handler_count(), failures + 2);
    });
}
