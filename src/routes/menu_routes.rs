//! Navigation table endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde_json::Value;

use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers the menu route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/menu", get(get_menu))
}

/// The configured menu with malformed entries dropped. Desktop and mobile
/// renderers both read this one document.
async fn get_menu(State(state): State<AppState>) -> Result<Json<Value>, HTTPError> {
    serde_json::to_value(state.config.menu.render())
        .map(Json)
        .map_err(|e| HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
