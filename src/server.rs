use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::PayloadError;
use crate::models::api_request::{JiraCreateIssueRequest, PayloadInput};
use crate::models::batch::{BatchRequest, build_batch};

pub struct AppState {
    pub config: Config,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ticket-payload", post(create_payload))
        .route("/ticket-payload/batch", post(create_batch))
        .with_state(state)
}

type HandlerResult<T> = Result<Json<T>, (StatusCode, String)>;

#[tracing::instrument(skip_all, fields(application_id))]
async fn create_payload(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PayloadInput>,
) -> HandlerResult<JiraCreateIssueRequest> {
    tracing::Span::current().record("application_id", input.application_id);
    info!("building payload for category: {}", input.category);

    JiraCreateIssueRequest::from_payload_input(&state.config, &input)
        .map(Json)
        .map_err(reject)
}

#[tracing::instrument(skip_all, fields(application_id, release_id))]
async fn create_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> HandlerResult<Vec<JiraCreateIssueRequest>> {
    let span = tracing::Span::current();
    span.record("application_id", request.application_id);
    span.record("release_id", request.release_id);
    info!("building payloads for {} finding(s)", request.findings.len());

    build_batch(&state.config, request).map(Json).map_err(reject)
}

fn reject(error: PayloadError) -> (StatusCode, String) {
    error!(%error, "failed to build payload");
    let status = match error {
        PayloadError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, error.to_string())
}
