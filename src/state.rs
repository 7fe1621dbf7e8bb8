//! Shared application state.
//!
//! Read-only after startup; every request sees the same configuration and
//! key material and nothing is mutated across requests.

use crate::auth::Auth;
use crate::config::ConfigV1;
use crate::pages::Pages;
use std::sync::Arc;

/// Application state shared across all HTTP handlers and the route guard.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session verification and sign-in providers.
    pub auth: Arc<Auth>,
    /// Compiled HTML templates.
    pub pages: Arc<Pages>,
}

impl AppState {
    /// Fails only if the bundled templates do not compile.
    pub fn new(config: Arc<ConfigV1>) -> Result<Self, tera::Error> {
        let auth = Arc::new(Auth::new(&config.providers, config.session.clone()));
        let pages = Arc::new(Pages::new()?);
        Ok(AppState {
            config,
            auth,
            pages,
        })
    }
}
