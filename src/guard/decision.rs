use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Paths and prefixes the guard works with.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct GuardConfig {
    /// Every path starting with this prefix requires a session.
    pub protected_prefix: String,
    pub login_path: String,
    /// Requests under these prefixes never reach `decide`.
    pub exempt_prefixes: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            protected_prefix: "/dashboard".to_string(),
            login_path: "/login".to_string(),
            exempt_prefixes: vec![
                "/api".to_string(),
                "/_next/static".to_string(),
                "/_next/image".to_string(),
                "/favicon.ico".to_string(),
            ],
        }
    }
}

/// Outcome of a single guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    DenyRedirectToLogin { target: String },
    RedirectAwayFromLogin { target: String },
}

impl RouteDecision {
    /// Where the caller should redirect to, if anywhere.
    pub fn target(&self) -> Option<&str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::DenyRedirectToLogin { target }
            | RouteDecision::RedirectAwayFromLogin { target } => Some(target),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteDecision::Allow => "allow",
            RouteDecision::DenyRedirectToLogin { .. } => "deny_redirect_to_login",
            RouteDecision::RedirectAwayFromLogin { .. } => "redirect_away_from_login",
        }
    }
}

impl GuardConfig {
    /// True when `path` is outside the guard's jurisdiction entirely.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Decide whether a request for `path` may proceed.
    ///
    /// Total over its inputs: a failed or missing session verification must be
    /// passed in as `session_present = false`. The login-path rule is checked
    /// first so a login path configured under the protected prefix stays
    /// reachable for anonymous users and never loops.
    pub fn decide(&self, session_present: bool, path: &str) -> RouteDecision {
        if path == self.login_path {
            return if session_present {
                RouteDecision::RedirectAwayFromLogin {
                    target: self.protected_prefix.clone(),
                }
            } else {
                RouteDecision::Allow
            };
        }

        if path.starts_with(self.protected_prefix.as_str()) && !session_present {
            return RouteDecision::DenyRedirectToLogin {
                target: self.login_path.clone(),
            };
        }

        RouteDecision::Allow
    }
}
