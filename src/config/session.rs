use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Signing and transport settings for the session token.
///
/// The same secret is used to mint tokens on sign-in and to verify them on
/// every request, so rotating it signs everybody out.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub iss: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_exp")]
    pub exp: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Marks the cookie `Secure`. Leave off for plain-http development.
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_issuer() -> String {
    "dashgate".to_string()
}

fn default_exp() -> i64 {
    60 * 60 * 24 * 30
}

fn default_cookie_name() -> String {
    "session".to_string()
}
