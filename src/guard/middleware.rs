use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::{debug, info_span, Instrument};

use super::RouteDecision;
use crate::state::AppState;

/// Axum middleware evaluating the guard for every non-exempt request.
///
/// A verified session is stashed in the request extensions so downstream
/// extractors do not decode the token twice. Redirects are silent `303`s.
pub async fn route_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let guard = &state.config.guard;
    let path = request.uri().path().to_owned();
    let span = info_span!("request", method = %request.method(), path = %path);

    if guard.is_exempt(&path) {
        return next.run(request).instrument(span).await;
    }

    let session = state.auth.resolve_session(request.headers());
    let decision = guard.decide(session.is_some(), &path);
    span.in_scope(|| {
        debug!(
            session_present = session.is_some(),
            decision = decision.label(),
            "Route guard evaluated"
        )
    });

    match decision {
        RouteDecision::Allow => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).instrument(span).await
        }
        RouteDecision::DenyRedirectToLogin { target }
        | RouteDecision::RedirectAwayFromLogin { target } => {
            Redirect::to(&target).into_response()
        }
    }
}
