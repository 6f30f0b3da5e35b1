/// Refresh control endpoints
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::refresh::TriggerOutcome;
use crate::webserver::models::responses::{RefreshAcceptedResponse, RefreshStatusResponse};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response, success_response_with_status};

/// Create refresh routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/refresh", post(trigger_refresh))
        .route("/refresh/status", get(refresh_status))
}

/// POST /api/refresh
///
/// 202 when a scrape was started, 409 when one is already running.
async fn trigger_refresh(State(state): State<Arc<AppState>>) -> Response {
    match state.coordinator.trigger() {
        TriggerOutcome::Started => success_response_with_status(
            StatusCode::ACCEPTED,
            RefreshAcceptedResponse {
                message: "Cache refresh started in background".to_string(),
            },
        ),
        TriggerOutcome::AlreadyInProgress => error_response(
            StatusCode::CONFLICT,
            "Cache refresh already in progress",
        ),
    }
}

/// GET /api/refresh/status
async fn refresh_status(State(state): State<Arc<AppState>>) -> Response {
    success_response(RefreshStatusResponse {
        state: state.coordinator.status(),
        last_refresh: state.coordinator.last_success(),
        next_scheduled_refresh: state.scheduler.next_run_at(),
        cached_records: state.query.snapshot().len(),
    })
}
