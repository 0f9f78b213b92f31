//! Client session configuration.

use serde::{Deserialize, Serialize};

/// Where and how the client keeps its session credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session store backend: `"memory"` or `"file"`.
    #[serde(default = "default_store")]
    pub store: String,
    /// Path of the JSON document used by the `"file"` backend.
    #[serde(default = "default_file_path")]
    pub file_path: String,
    /// Lifetime of the stored access token in days.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_days: u64,
    /// Inactivity period in minutes after which the session is torn down.
    /// A value of `0` disables the idle monitor.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            file_path: default_file_path(),
            access_token_ttl_days: default_access_ttl(),
            idle_timeout_minutes: default_idle_timeout(),
        }
    }
}

fn default_store() -> String {
    "file".to_string()
}

fn default_file_path() -> String {
    "data/session.json".to_string()
}

fn default_access_ttl() -> u64 {
    7
}

fn default_idle_timeout() -> u64 {
    30
}
