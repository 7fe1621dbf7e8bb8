//! HTTP route definitions and handlers.
//!
//! Pages, the sign-in API, the menu API and health checks are merged into one
//! router behind the route guard. The guard also covers the fallback, so an
//! unknown path under the protected prefix still redirects instead of 404ing.

mod auth_routes;
mod health_routes;
mod menu_routes;
mod page_routes;

use crate::guard::route_guard;
use crate::state::AppState;
use axum::{middleware, Router};

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(page_routes::routes(&state.config.guard))
        .merge(auth_routes::routes())
        .merge(menu_routes::routes())
        .merge(health_routes::routes())
        .fallback(page_routes::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .with_state(state)
}
