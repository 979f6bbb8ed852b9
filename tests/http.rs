//! Router tests exercising the HTTP surface against a mock backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use sceneforge::http::{router, AppState};
use sceneforge::{agent, LlmCtx, MockBackend, TextToImagePrompts};

fn test_app(backend: Arc<MockBackend>) -> axum::Router {
    let ctx = LlmCtx::builder("http://unused").backend(backend).build();
    let workflow = TextToImagePrompts::builder()
        .rewriter(agent::text_rewriter())
        .scene_breaker(agent::scene_breaker())
        .prompt_generator(agent::image_prompt_generator())
        .build()
        .unwrap();
    router(Arc::new(AppState { ctx, workflow }))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = test_app(Arc::new(MockBackend::fixed("unused")));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_generate_prompts_success() {
    let backend = Arc::new(MockBackend::new(vec![
        "Rewritten text.".into(),
        "Scene 1: A quiet street at dusk.".into(),
        "Scene 1 - Prompt 1: Empty street at dusk, warm lamplight\n\
         Scene 1 - Prompt 2: Same street from above, drone shot"
            .into(),
    ]));
    let app = test_app(backend.clone());

    let response = app
        .oneshot(post_json(
            "/api/generate-prompts",
            json!({"text": "The street emptied as the sun set."}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls(), 3);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalScenes"], 1);
    assert_eq!(body["data"]["totalPrompts"], 2);
    assert_eq!(body["data"]["scenes"]["scene_1"][0]["number"], 1);
    assert_eq!(
        body["data"]["scenes"]["scene_1"][1]["prompt"],
        "Same street from above, drone shot"
    );
}

#[tokio::test]
async fn test_generate_prompts_empty_text_is_400() {
    let backend = Arc::new(MockBackend::fixed("unused"));
    let app = test_app(backend.clone());

    let response = app
        .oneshot(post_json("/api/generate-prompts", json!({"text": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid input");
    assert_eq!(body["message"], "Text cannot be empty");
}

#[tokio::test]
async fn test_generate_prompts_missing_text_is_400() {
    let backend = Arc::new(MockBackend::fixed("unused"));
    let app = test_app(backend.clone());

    let response = app
        .oneshot(post_json("/api/generate-prompts", json!({"other": 1})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid input");
}

#[tokio::test]
async fn test_generate_prompts_non_string_text_is_400() {
    let backend = Arc::new(MockBackend::fixed("unused"));
    let app = test_app(backend.clone());

    let response = app
        .oneshot(post_json("/api/generate-prompts", json!({"text": 42})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_pipeline_failure_is_500() {
    let backend = Arc::new(MockBackend::failing("model unavailable"));
    let app = test_app(backend.clone());

    let response = app
        .oneshot(post_json("/api/generate-prompts", json!({"text": "Some story."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Workflow execution failed");
    assert!(body["message"].as_str().unwrap().contains("model unavailable"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app(Arc::new(MockBackend::fixed("unused")));
    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["message"], "The requested endpoint does not exist");
}
