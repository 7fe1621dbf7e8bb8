//! Route access guard.
//!
//! `decision` holds the pure per-request rule set; `middleware` wires it into
//! the axum stack, resolving the session and emitting the redirects.

mod decision;
mod middleware;

pub use decision::{GuardConfig, RouteDecision};
pub use middleware::route_guard;
