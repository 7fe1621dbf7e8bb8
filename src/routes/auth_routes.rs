//! Sign-in, sign-out and session endpoints.
//!
//! All of these live under `/api`, which the guard never evaluates.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use http::Extensions;
use serde_json::json;
use tracing::{error, info};

use crate::models::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{client_ip, HTTPError};

/// Registers authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signout", post(sign_out))
        .route("/api/auth/session", get(current_session))
}

/// Exchanges `Authorization: Basic` credentials for a session cookie, then
/// sends the browser to the protected area.
async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    jar: CookieJar,
) -> Result<Response, HTTPError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let ip = client_ip(&extensions);

    let session = state.auth.sign_in(auth_header, &ip).await.ok_or_else(|| {
        HTTPError::new(StatusCode::UNAUTHORIZED, "Invalid credentials").with_challenge("Basic")
    })?;

    let session_config = &state.config.session;
    let token = session.to_jwt(session_config).map_err(|e| {
        error!("Failed to sign session token: {}", e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
    })?;

    let cookie = Cookie::build((session_config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(session_config.secure_cookie)
        .max_age(time::Duration::seconds(session_config.exp));

    info!("User '{}' signed in from IP {}", session.user.id, ip);
    Ok((
        jar.add(cookie),
        Redirect::to(&state.config.guard.protected_prefix),
    )
        .into_response())
}

/// Clears the session cookie and returns to the landing page. Signing out
/// while anonymous is harmless.
async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let cookie = Cookie::build((state.config.session.cookie_name.clone(), "")).path("/");
    (jar.remove(cookie), Redirect::to("/"))
}

/// The current session, or `{}` when anonymous.
async fn current_session(session: Option<Session>) -> Response {
    match session {
        Some(session) => Json(session).into_response(),
        None => Json(json!({})).into_response(),
    }
}
