//! Photo selection and analysis runs.

mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use common::{body_json, build_test_app, get, send_json};
use serde_json::json;
use tower::ServiceExt;

fn multipart_image(boundary: &str, content_type: &str, bytes: &[u8]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"dinner.png\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Body::from(body)
}

#[tokio::test]
async fn multipart_upload_selects_the_image() {
    let (app, _) = build_test_app();
    let boundary = "dietdash-boundary";

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/analysis/image")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(multipart_image(boundary, "image/png", b"\x89PNG fake"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["image"]["file_name"], "dinner.png");
    assert!(json["cancelled_job"].is_null());

    let status = body_json(get(&app, "/api/v1/analysis").await).await;
    assert_eq!(status["state"], "image_selected");
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let (app, _) = build_test_app();
    let boundary = "dietdash-boundary";

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/analysis/image")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(multipart_image(boundary, "text/plain", b"hello"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let status = body_json(get(&app, "/api/v1/analysis").await).await;
    assert_eq!(status["state"], "idle");
}

#[tokio::test]
async fn analysis_logs_entry_into_selected_meal() {
    let (app, state) = build_test_app();

    send_json(&app, Method::PUT, "/api/v1/food/selected-meal", json!({ "meal": "dinner" })).await;
    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/analysis/image/bytes",
        json!({ "image": [255, 216, 255, 224] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(&app, Method::POST, "/api/v1/analysis/run", json!({ "api_key": "sk-test" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let report = body_json(response).await;
    assert_eq!(report["food"]["name"], "Grilled salmon with vegetables");
    assert_eq!(report["entry"]["meal"], "dinner");
    assert_eq!(report["entry"]["calories"], 385.0);

    let status = body_json(get(&app, "/api/v1/analysis").await).await;
    assert_eq!(status["state"], "idle");
    assert_eq!(status["last_outcome"]["status"], "completed");
    assert_eq!(state.food.read().await.store.entries().len(), 3);
}

#[tokio::test]
async fn analysis_without_image_or_credential_is_rejected() {
    let (app, state) = build_test_app();

    let response = send_json(&app, Method::POST, "/api/v1/analysis/run", json!({ "api_key": "sk-test" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    send_json(&app, Method::POST, "/api/v1/analysis/image/bytes", json!({ "image": [1, 2, 3] })).await;
    let response = send_json(&app, Method::POST, "/api/v1/analysis/run", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let status = body_json(get(&app, "/api/v1/analysis").await).await;
    assert_eq!(status["state"], "image_selected");
    assert_eq!(state.food.read().await.store.entries().len(), 2);
}

#[tokio::test]
async fn clearing_the_image_returns_to_idle() {
    let (app, _) = build_test_app();

    send_json(&app, Method::POST, "/api/v1/analysis/image/bytes", json!({ "image": [1, 2, 3] })).await;
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/v1/analysis/image")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let status = body_json(get(&app, "/api/v1/analysis").await).await;
    assert_eq!(status["state"], "idle");
}
