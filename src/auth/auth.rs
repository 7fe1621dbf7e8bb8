use std::time::Duration;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::models::session::{Session, SessionClaims};
use crate::providers::{create_auth_provider, Provider, ProviderConfig};
use crate::utils::log_throttle::should_emit;

const INVALID_TOKEN_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Holds the sign-in providers and the key material for session tokens.
pub struct Auth {
    pub providers: Vec<Box<dyn Provider>>,
    session: SessionConfig,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Auth {
    /// Initialize the Auth struct by creating providers from their configurations.
    pub fn new(provider_config: &[ProviderConfig], session: SessionConfig) -> Self {
        info!("Creating sign-in providers...");
        let providers = provider_config.iter().map(create_auth_provider).collect();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[session.iss.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Auth {
            providers,
            decoding_key: DecodingKey::from_secret(session.secret.as_ref()),
            session,
            validation,
        }
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session
    }

    /// Verify a session token. Every failure (bad signature, expired, wrong
    /// issuer, garbage) collapses to `None`, i.e. an anonymous request.
    pub fn verify(&self, token: &str) -> Option<Session> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(Session::from(data.claims)),
            Err(e) => {
                if let Some(suppressed) =
                    should_emit("auth.invalid_session_token", INVALID_TOKEN_LOG_INTERVAL)
                {
                    warn!(
                        suppressed,
                        "Rejected session token, treating request as anonymous: {}", e
                    );
                } else {
                    debug!("Rejected session token: {}", e);
                }
                None
            }
        }
    }

    /// Pull the raw session token from the session cookie, falling back to an
    /// `Authorization: Bearer` header.
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(&self.session.cookie_name) {
            if !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
        }

        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// The verified session attached to a request, if any.
    pub fn resolve_session(&self, headers: &HeaderMap) -> Option<Session> {
        self.session_token(headers)
            .and_then(|token| self.verify(&token))
    }

    /// Sign a user in with an `Authorization` header value such as
    /// `Basic dXNlcjpwYXNz`. The first provider of the matching type that
    /// accepts the credentials wins.
    pub async fn sign_in(&self, auth_header: &str, ip: &str) -> Option<Session> {
        let parts: Vec<&str> = auth_header.split_whitespace().collect();
        if parts.len() != 2 {
            warn!("Authorization header invalid format from IP='{}'", ip);
            return None;
        }

        let auth_type = parts[0];
        let credentials = parts[1];
        debug!("Sign-in with auth_type='{}' from IP='{}'", auth_type, ip);

        let candidates: Vec<_> = self
            .providers
            .iter()
            .filter(|p| p.get_type().eq_ignore_ascii_case(auth_type))
            .collect();

        if candidates.is_empty() {
            warn!("No providers found for auth type: '{}'", auth_type);
            return None;
        }

        for provider in candidates {
            match provider.authenticate(credentials).await {
                Ok(user) => {
                    info!(
                        "Provider '{}' signed in user '{}'",
                        provider.get_name(),
                        user.id
                    );
                    return Some(Session::new(user.id, user.email, &self.session));
                }
                Err(e) => debug!("Provider '{}' rejected sign-in: {}", provider.get_name(), e),
            }
        }

        warn!("All providers rejected sign-in from IP='{}'", ip);
        None
    }
}
