use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use chrono::Utc;
use http::request::Parts;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// An authenticated principal, as carried by the signed session token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    /// Unix timestamp after which the token is no longer accepted.
    pub expires: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
}

/// Claims stored in the session JWT.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// A fresh session for `id`, expiring after the configured lifetime.
    pub fn new(id: impl Into<String>, email: Option<String>, config: &SessionConfig) -> Self {
        Session {
            user: SessionUser {
                id: id.into(),
                email,
            },
            expires: Utc::now().timestamp().saturating_add(config.exp),
        }
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.user.email.as_deref().unwrap_or(&self.user.id)
    }

    /// Sign this session into a JWT using the configured secret.
    pub fn to_jwt(&self, config: &SessionConfig) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: self.user.id.clone(),
            iss: config.iss.clone(),
            iat: Utc::now().timestamp(),
            exp: self.expires,
            jti: uuid::Uuid::new_v4().to_string(),
            email: self.user.email.clone(),
        };

        let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Session {
            user: SessionUser {
                id: claims.sub,
                email: claims.email,
            },
            expires: claims.exp,
        }
    }
}

/// Extractor: the session the guard already verified for this request, or a
/// fresh verification when the route sits outside the guard (e.g. `/api`).
#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = HTTPError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        state
            .auth
            .resolve_session(&parts.headers)
            .ok_or_else(|| HTTPError::new(StatusCode::UNAUTHORIZED, "Not signed in"))
    }
}
