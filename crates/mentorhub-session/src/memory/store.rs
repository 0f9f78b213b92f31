//! In-memory session store using a concurrent map.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use mentorhub_core::result::AppResult;
use mentorhub_core::traits::session_store::{SessionStore, StoredEntry};

use crate::provider::expiry_from_ttl;

/// A stored value with its optional expiry.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory session store.
///
/// Lives only as long as the process; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemorySessionStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `key` only if it is still expired at `now`.
    ///
    /// The expiry is re-checked under the shard lock, so a value set after
    /// the caller saw the stale entry survives.
    fn evict_if_expired(&self, key: &str, now: DateTime<Utc>) -> bool {
        let evicted = self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some();
        if evicted {
            debug!(key, "Evicted expired session key");
        }
        evicted
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Utc::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.evict_if_expired(key, now);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let expires_at = expiry_from_ttl(ttl)?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn entries(&self) -> AppResult<Vec<StoredEntry>> {
        let now = Utc::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));

        let mut entries: Vec<StoredEntry> = self
            .entries
            .iter()
            .map(|entry| StoredEntry {
                key: entry.key().clone(),
                value: entry.value().value.clone(),
                expires_at: entry.value().expires_at,
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}
