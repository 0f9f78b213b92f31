//! Session store trait for pluggable credential persistence.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A key currently held by a session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Key name.
    pub key: String,
    /// Stored value.
    pub value: String,
    /// Absolute expiry, if the key was written with a TTL.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Trait for session credential stores (in-memory, file-backed).
///
/// This is the cookie-jar equivalent of the client: a flat string
/// key-value store where individual keys may carry an expiry. Expired
/// keys behave exactly like missing ones.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, optionally expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove several keys.
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    /// List every live (non-expired) entry.
    async fn entries(&self) -> AppResult<Vec<StoredEntry>>;
}
