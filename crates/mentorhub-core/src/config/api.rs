//! Remote API endpoint configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the MentorHub REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative endpoint path is resolved against.
    ///
    /// Usually supplied at process start through `MENTORHUB__API__BASE_URL`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds applied by the HTTP client.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Path of the token refresh endpoint.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Path of the login endpoint.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            refresh_path: default_refresh_path(),
            login_path: default_login_path(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_refresh_path() -> String {
    "/auth/refresh-token".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_user_agent() -> String {
    concat!("mentorhub/", env!("CARGO_PKG_VERSION")).to_string()
}
