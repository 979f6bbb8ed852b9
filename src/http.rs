//! HTTP surface: router, handlers, and error responses.
//!
//! Single endpoint of interest: `POST /api/generate-prompts` runs one
//! workflow per request. Requests are independent and stateless; the
//! shared [`AppState`] holds only the transport context and the
//! constructed workflow.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::format;
use crate::llm_ctx::LlmCtx;
use crate::stats::word_count;
use crate::workflow::TextToImagePrompts;
use crate::PipelineError;

/// Shared state for the HTTP handlers.
pub struct AppState {
    pub ctx: LlmCtx,
    pub workflow: TextToImagePrompts,
}

/// JSON error response body: `{error, message}` with a status code.
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid input",
            message: message.into(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let error = match err {
            PipelineError::InvalidConfig(_) => "Workflow not found",
            _ => "Workflow execution failed",
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-prompts", post(generate_prompts))
        .fallback(not_found)
        .with_state(state)
}

/// `GET /health`
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback for unmatched routes.
async fn not_found() -> Response {
    let body = json!({
        "error": "Not found",
        "message": "The requested endpoint does not exist",
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// `POST /api/generate-prompts`
///
/// Validates the request shape before the pipeline is ever invoked:
/// a missing, non-string, or blank `text` field is a 400.
async fn generate_prompts(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let text = match body.as_ref().ok().and_then(|Json(v)| v.get("text")) {
        Some(Value::String(s)) => s.clone(),
        Some(_) | None => {
            return Err(ApiError::invalid_input(
                "Request body must contain a \"text\" field with a string value",
            ));
        }
    };

    if text.trim().is_empty() {
        return Err(ApiError::invalid_input("Text cannot be empty"));
    }

    tracing::info!(words = word_count(&text), "processing text");

    let run = state.workflow.run(&state.ctx, &text).await?;
    let structured = format::format_prompts(
        &run.prompts.image_prompts_text,
        run.prompts.prompt_count,
    );

    tracing::info!(
        total_prompts = structured.total_prompts,
        total_scenes = structured.total_scenes,
        "generated image prompts"
    );

    Ok(Json(json!({
        "success": true,
        "data": structured,
    })))
}
