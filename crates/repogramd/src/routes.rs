//! HTTP request handlers for the Repogram JSON API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use repogram_core::{
    DiagramKind, DiagramPipeline, GenerateRequest, RepoRef, RepogramError,
};

pub struct AppState {
    pub pipeline: DiagramPipeline,
}

/// Build the axum router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

#[derive(Deserialize)]
struct GenerateBody {
    repo_url: Option<String>,
    /// Per-request access token for private repositories.
    pat: Option<String>,
    #[serde(default)]
    force_refresh: bool,
    diagram_type: Option<String>,
}

#[derive(Serialize)]
struct GenerateResponse {
    diagram: String,
    cached: bool,
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorBody>)> {
    let Some(repo_url) = body.repo_url.filter(|s| !s.trim().is_empty()) else {
        warn!("repository reference missing in request");
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Repo URL is required",
        ));
    };

    let repo = RepoRef::parse(&repo_url).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            "Invalid repository format. Use 'username/repo' or full URL.",
        )
    })?;

    let kind = match body.diagram_type.as_deref() {
        None => DiagramKind::default(),
        Some(raw) => raw.parse::<DiagramKind>().map_err(|_| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Unknown diagram type: {raw}"),
            )
        })?,
    };

    let mut request = GenerateRequest::new(repo, kind);
    request.credential = body.pat;
    request.force_refresh = body.force_refresh;

    match state.pipeline.generate(&request).await {
        Ok(outcome) => Ok(Json(GenerateResponse {
            diagram: outcome.diagram,
            cached: outcome.cached,
        })),
        Err(RepogramError::NotFound) => Err(error_response(
            StatusCode::NOT_FOUND,
            "Repository not found. Is it private or misspelled?",
        )),
        Err(RepogramError::EmptyResult) => Err(error_response(
            StatusCode::NOT_FOUND,
            "Could not fetch file tree. Is the repo empty or private?",
        )),
        Err(RepogramError::InvalidInput(message)) => {
            Err(error_response(StatusCode::BAD_REQUEST, message))
        }
        Err(err) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Error: {err}"),
        )),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
