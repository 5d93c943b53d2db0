#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dietdash::app::build_app;
use dietdash::state::AppState;

/// Full router over a fresh zero-delay state. The state is returned too so
/// tests can inspect the stores directly.
pub fn build_test_app() -> (Router, AppState) {
    let state = AppState::fake();
    (build_app(state.clone()), state)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    send(app, method, uri, Some(body)).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
