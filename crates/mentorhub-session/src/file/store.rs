//! JSON-file session store.
//!
//! The whole jar is a single JSON object keyed by session key. Every
//! mutation rewrites the document through a temporary file followed by a
//! rename, so a crash mid-write never leaves a truncated jar behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use mentorhub_core::error::AppError;
use mentorhub_core::result::AppResult;
use mentorhub_core::traits::session_store::{SessionStore, StoredEntry};

use crate::provider::expiry_from_ttl;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl FileEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Session store persisted as a JSON document on disk.
///
/// The in-memory copy only changes once the new document is on disk, so a
/// failed write leaves memory and disk in agreement.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    /// Location of the jar.
    path: PathBuf,
    /// In-memory copy of the jar, written through on every mutation.
    entries: Arc<RwLock<BTreeMap<String, FileEntry>>>,
}

impl FileSessionStore {
    /// Open the jar at `path`, loading any entries already on disk.
    ///
    /// A missing file is an empty jar. An unreadable or corrupt file is an error.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::session(format!(
                    "Session file '{}' is corrupt: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), keys = entries.len(), "Opened session file");

        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Location of the jar on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, FileEntry>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let now = Utc::now();
        let live: BTreeMap<&String, &FileEntry> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .collect();
        let json = serde_json::to_string_pretty(&live)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = live.len(), "Session file written");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(Utc::now()))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let expires_at = expiry_from_ttl(ttl)?;
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(
            key.to_string(),
            FileEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.remove_many(&[key]).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        if !keys.iter().any(|key| entries.contains_key(*key)) {
            return Ok(());
        }

        let mut next = entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn entries(&self) -> AppResult<Vec<StoredEntry>> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, entry)| StoredEntry {
                key: key.clone(),
                value: entry.value.clone(),
                expires_at: entry.expires_at,
            })
            .collect())
    }
}
