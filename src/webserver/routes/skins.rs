/// Skin query endpoints
///
/// Thin handlers over the query service; every request reads from one
/// snapshot and is never affected by a refresh committing mid-call.
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::webserver::models::responses::{CharacterSkinsResponse, SkinListResponse};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

/// Create skin query routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/skins", get(list_skins))
        .route("/skins/search", get(search_skins))
        .route("/skin/:id", get(skin_by_id))
        .route("/character/:name", get(character_skins))
}

/// GET /api/skins
async fn list_skins(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.query.snapshot();
    success_response(SkinListResponse {
        count: snapshot.len(),
        skins: snapshot.records().to_vec(),
        cache_populated: snapshot.is_populated(),
    })
}

/// GET /api/character/:name
///
/// An unknown character yields an empty list, not a 404.
async fn character_skins(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let skins = state.query.by_character(&name);
    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!("Character lookup '{}': {} skins", name, skins.len()),
        );
    }
    success_response(CharacterSkinsResponse {
        character: name,
        count: skins.len(),
        skins,
    })
}

/// GET /api/skin/:id
async fn skin_by_id(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    match state.query.by_id(id) {
        Some(skin) => success_response(skin),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Skin with id {} not found", id),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// GET /api/skins/search?q=<pattern>
///
/// Case-insensitive substring match; an empty or missing pattern returns
/// everything.
async fn search_skins(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let snapshot = state.query.snapshot();
    let skins: Vec<_> = snapshot.search(&params.q).into_iter().cloned().collect();
    success_response(SkinListResponse {
        count: skins.len(),
        skins,
        cache_populated: snapshot.is_populated(),
    })
}
