//! Page handlers. The interesting part is which requests get here at all;
//! the markup lives in `templates/`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::{routing::get, Router};
use tera::Context;
use tracing::error;

use crate::guard::GuardConfig;
use crate::models::Session;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers page routes. Login and dashboard paths come from the guard
/// config so moving the protected area moves the dashboard with it.
pub fn routes(guard: &GuardConfig) -> Router<AppState> {
    let prefix = guard.protected_prefix.trim_end_matches('/');
    Router::new()
        .route("/", get(home))
        .route(&guard.login_path, get(login))
        .route(prefix, get(dashboard))
        .route(&format!("{}/*rest", prefix), get(dashboard))
}

fn render(state: &AppState, template: &str, context: &Context) -> Result<Html<String>, HTTPError> {
    state.pages.render(template, context).map(Html).map_err(|e| {
        error!("Failed to render {}: {}", template, e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
    })
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, HTTPError> {
    let mut context = state.pages.context(&state.config.menu);
    context.insert("login_path", &state.config.guard.login_path);
    render(&state, "home.html", &context)
}

async fn login(State(state): State<AppState>) -> Result<Html<String>, HTTPError> {
    let context = state.pages.context(&state.config.menu);
    render(&state, "login.html", &context)
}

/// Only reachable with a session: the guard has already redirected everyone else.
async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, HTTPError> {
    let mut context = state.pages.context(&state.config.menu);
    context.insert("user_name", session.display_name());
    render(&state, "dashboard.html", &context)
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>"))
}
