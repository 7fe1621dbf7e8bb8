#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, Response};
use axum::Router;
use dashgate::config::{extract_config, ConfigV1};
use dashgate::models::Session;
use dashgate::routes::create_router;
use dashgate::state::AppState;
use figment::{
    providers::{Format, Yaml},
    Figment,
};

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
logging:
  level: "debug"
  format: "json"
session:
  secret: test-secret
  iss: dashgate-test
  exp: 3600
providers:
  - name: "Plain provider"
    type: "plain"
    users:
      - username: ada
        password: lovelace
        email: ada@example.com
      - username: grace
        password: hopper
menu:
  sections:
    - id: product
      label: Product
      entries:
        - name: Analytics
          description: Get a better understanding of your traffic
          href: /product/analytics
          icon: chart-pie
        - name: Integrations
          href: /product/integrations
          icon: puzzle-piece
        - description: entry without a name or destination
  links:
    - name: Pricing
      href: /pricing
"#;

pub fn load_test_config() -> ConfigV1 {
    extract_config(Figment::new().merge(Yaml::string(TEST_CONFIG)))
        .expect("Failed to parse test config YAML")
}

/// The test config with `overrides` merged over it.
pub fn load_test_config_with(overrides: &str) -> ConfigV1 {
    extract_config(
        Figment::new()
            .merge(Yaml::string(TEST_CONFIG))
            .merge(Yaml::string(overrides)),
    )
    .expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> (Router, Arc<ConfigV1>) {
    let config = Arc::new(config);
    let state = AppState::new(config.clone()).expect("templates should compile");
    (create_router(state), config)
}

fn request(method: Method, path: &str, header: Option<(&str, String)>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    let mut request = builder.body(Body::empty()).expect("failed to build request");

    request.extensions_mut().insert(ConnectInfo(SocketAddr::new(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
    )));

    request
}

pub fn anonymous(method: Method, path: &str) -> Request<Body> {
    request(method, path, None)
}

pub fn with_cookie(method: Method, path: &str, cookie: &str) -> Request<Body> {
    request(method, path, Some(("Cookie", cookie.to_string())))
}

pub fn with_bearer(method: Method, path: &str, token: &str) -> Request<Body> {
    request(method, path, Some(("Authorization", format!("Bearer {}", token))))
}

pub fn with_basic(method: Method, path: &str, credentials: &str) -> Request<Body> {
    use base64::{engine::general_purpose, Engine as _};
    let encoded = general_purpose::STANDARD.encode(credentials);
    request(method, path, Some(("Authorization", format!("Basic {}", encoded))))
}

/// A valid `session=<jwt>` cookie for `id`.
pub fn session_cookie(config: &ConfigV1, id: &str, email: Option<&str>) -> String {
    let session = Session::new(id, email.map(str::to_string), &config.session);
    let token = session.to_jwt(&config.session).expect("jwt should encode");
    format!("{}={}", config.session.cookie_name, token)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}
