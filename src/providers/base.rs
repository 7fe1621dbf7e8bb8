use super::plain_provider::{PlainAuthConfig, PlainAuthProvider};
use crate::models::session::SessionUser;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration options for each sign-in provider.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "plain")]
    Plain(PlainAuthConfig),
}

/// A sign-in provider turns presented credentials into a user identity.
///
/// The identity provider's own protocol lives behind this trait; the rest of
/// the crate only ever sees the resulting `SessionUser`.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    fn get_name(&self) -> &str;
    /// Authorization scheme this provider accepts, e.g. "Basic".
    fn get_type(&self) -> &str;
    async fn authenticate(&self, credentials: &str) -> Result<SessionUser, String>;
}

/// Create a sign-in provider from a given config.
pub fn create_auth_provider(config: &ProviderConfig) -> Box<dyn Provider> {
    match config {
        ProviderConfig::Plain(cfg) => Box::new(PlainAuthProvider::new(cfg)),
    }
}
