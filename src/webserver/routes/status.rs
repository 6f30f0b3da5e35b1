use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::webserver::models::responses::HealthResponse;
use crate::webserver::state::AppState;
use crate::webserver::utils::success_response;

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

/// GET /api/health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, "Health check endpoint called");
    }

    success_response(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
