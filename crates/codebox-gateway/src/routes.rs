//! Route handlers for the gateway
//!
//! `/run-code/` always answers 200 with the uniform result shape, whatever
//! happened during execution; only a malformed form is a transport-level
//! 4xx. `/save-code/` streams the submitted code back as a downloadable
//! attachment.

use axum::Router;
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use codebox_core::{ExecutionRequest, ExecutionResult, Language};

use crate::state::GatewayState;

/// Form payload for `/run-code/`.
#[derive(Debug, Deserialize)]
pub struct RunCodeForm {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub stdin: String,
}

/// Form payload for `/save-code/`.
#[derive(Debug, Deserialize)]
pub struct SaveCodeForm {
    pub code: String,
    pub language: String,
}

/// One supported language, as reported by `/languages`.
#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    pub extension: &'static str,
    pub compiled: bool,
}

/// Build the gateway router over the shared state.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/run-code/", post(run_code))
        .route("/save-code/", post(save_code))
        .route("/languages", get(languages))
        .route("/health", get(health))
        .with_state(state)
}

/// Execute submitted code through the configured backend.
async fn run_code(
    State(state): State<GatewayState>,
    Form(form): Form<RunCodeForm>,
) -> Json<ExecutionResult> {
    let id = Uuid::new_v4();
    info!(%id, language = %form.language, "run-code request");

    let request = match ExecutionRequest::parse(&form.language, form.code, form.stdin) {
        Ok(request) => request,
        Err(err) => {
            warn!(%id, "run-code rejected: {}", err);
            return Json(err.into_result());
        }
    };

    // Queue behind the deployment-wide execution cap.
    let _permit = match state.limiter.acquire().await {
        Ok(permit) => permit,
        // Only possible if the semaphore is closed during shutdown.
        Err(_) => return Json(ExecutionResult::error("Server is shutting down.")),
    };

    let result = state.runner.execute(&request).await;
    info!(%id, "run-code finished");
    Json(result)
}

/// Return the submitted code as a downloadable `solution.<ext>` file.
async fn save_code(Form(form): Form<SaveCodeForm>) -> Response {
    let extension = form
        .language
        .parse::<Language>()
        .map(|language| language.extension())
        .unwrap_or("txt");
    let filename = format!("solution.{extension}");

    (
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        form.code,
    )
        .into_response()
}

/// List the supported languages and their file extensions.
async fn languages() -> Json<Vec<LanguageInfo>> {
    let list = Language::all()
        .iter()
        .map(|language| LanguageInfo {
            name: language.as_str(),
            display_name: language.display_name(),
            extension: language.extension(),
            compiled: language.is_compiled(),
        })
        .collect();
    Json(list)
}

/// Liveness check; names the active backend.
async fn health(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.runner.name(),
    }))
}
