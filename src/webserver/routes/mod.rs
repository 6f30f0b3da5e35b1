use axum::Router;
use std::sync::Arc;

use crate::webserver::state::AppState;

pub mod refresh;
pub mod skins;
pub mod status;

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(skins::routes())
        .merge(refresh::routes())
}
