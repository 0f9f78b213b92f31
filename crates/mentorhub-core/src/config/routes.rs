//! Client route configuration used for forced redirects.

use serde::{Deserialize, Serialize};

/// Route names the client navigates between when a session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// General home / login route.
    #[serde(default = "default_home")]
    pub home: String,
    /// Admin login route.
    #[serde(default = "default_admin_login")]
    pub admin_login: String,
    /// Paths under this prefix belong to the admin portal.
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    /// Exact paths on which a session teardown does not navigate.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// Route the client is on when it starts.
    #[serde(default = "default_start_path")]
    pub start_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: default_home(),
            admin_login: default_admin_login(),
            admin_prefix: default_admin_prefix(),
            public_paths: default_public_paths(),
            start_path: default_start_path(),
        }
    }
}

fn default_home() -> String {
    "/".to_string()
}

fn default_admin_login() -> String {
    "/admin".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec!["/".to_string(), "/admin".to_string(), "/login".to_string()]
}

fn default_start_path() -> String {
    "/dashboard".to_string()
}
