//! Request helpers shared by the router tests.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pharmacy_storefront::api::{self, AppState, OWNER_HEADER};
use serde_json::Value;
use tower::ServiceExt;

pub async fn app(seed_demo_data: bool) -> Router {
    api::router(AppState::in_memory(seed_demo_data).await.expect("state"))
}

pub async fn send(app: &Router, method: Method, uri: &str, owner: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, owner, body.map(|json| json.to_string())).await
}

/// Sends `body` verbatim as `application/json`; the response must be JSON.
pub async fn send_raw(app: &Router, method: Method, uri: &str, owner: Option<&str>, body: Option<String>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        request = request.header(OWNER_HEADER, owner);
    }
    let body = match body {
        Some(text) => {
            request = request.header("content-type", "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(request.body(body).expect("request")).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
    (status, json)
}
