//! Session store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use mentorhub_core::config::SessionConfig;
use mentorhub_core::error::AppError;
use mentorhub_core::result::AppResult;
use mentorhub_core::traits::session_store::{SessionStore, StoredEntry};

/// Session store manager that wraps the configured backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct SessionStoreManager {
    /// The inner session store.
    inner: Arc<dyn SessionStore>,
}

impl SessionStoreManager {
    /// Create a new session store manager from configuration.
    pub async fn new(config: &SessionConfig) -> AppResult<Self> {
        let inner: Arc<dyn SessionStore> = match config.store.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.file_path, "Initializing file session store");
                Arc::new(crate::file::FileSessionStore::open(&config.file_path).await?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory session store");
                Arc::new(crate::memory::MemorySessionStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown session store: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn SessionStore>) -> Self {
        Self { inner: store }
    }

    /// Get a reference to the inner store.
    pub fn store(&self) -> &dyn SessionStore {
        self.inner.as_ref()
    }
}

#[async_trait]
impl SessionStore for SessionStoreManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.inner.remove_many(keys).await
    }

    async fn entries(&self) -> AppResult<Vec<StoredEntry>> {
        self.inner.entries().await
    }
}

/// Convert a relative TTL into an absolute expiry.
pub(crate) fn expiry_from_ttl(ttl: Option<Duration>) -> AppResult<Option<DateTime<Utc>>> {
    ttl.map(|ttl| {
        chrono::Duration::from_std(ttl)
            .map(|ttl| Utc::now() + ttl)
            .map_err(|e| AppError::validation(format!("Session TTL out of range: {e}")))
    })
    .transpose()
}
