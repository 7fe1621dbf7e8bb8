use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::session::SessionUser;
use crate::providers::Provider;

/// PlainAuthConfig defines a fixed credentials list for Basic sign-in.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainAuthConfig {
    /// A friendly name for logs.
    pub name: String,
    pub users: Vec<PlainUserEntry>,
}

/// A single account: the username doubles as the session user id.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainUserEntry {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// A `PlainAuthProvider` that checks Basic credentials against `PlainAuthConfig`.
pub struct PlainAuthProvider {
    pub config: PlainAuthConfig,
}

impl PlainAuthProvider {
    pub fn new(config: &PlainAuthConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Provider for PlainAuthProvider {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    fn get_type(&self) -> &str {
        "Basic"
    }

    /// Decode base64 "username:password" and look it up in the user list.
    async fn authenticate(&self, credentials: &str) -> Result<SessionUser, String> {
        let decoded_bytes = match general_purpose::STANDARD.decode(credentials) {
            Ok(b) => b,
            Err(e) => {
                warn!("Base64 decode error: {}", e);
                return Err("Invalid base64 in Basic auth".to_string());
            }
        };

        let decoded_str = match String::from_utf8(decoded_bytes) {
            Ok(s) => s,
            Err(e) => {
                warn!("Invalid UTF-8 in Basic auth: {}", e);
                return Err("Invalid UTF-8 in Basic auth".to_string());
            }
        };

        let mut parts = decoded_str.splitn(2, ':');
        let user_part = parts.next().unwrap_or("");
        let pass_part = parts.next().unwrap_or("");

        if user_part.is_empty() {
            return Err("No username in Basic credentials".to_string());
        }

        debug!("Basic sign-in attempt for user '{}'", user_part);
        self.config
            .users
            .iter()
            .find(|entry| entry.username == user_part && entry.password == pass_part)
            .map(|entry| SessionUser {
                id: entry.username.clone(),
                email: entry.email.clone(),
            })
            .ok_or_else(|| "Wrong username or password".to_string())
    }
}
