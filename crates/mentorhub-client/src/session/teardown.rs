//! Forced session teardown.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use mentorhub_core::traits::{Navigator, SessionStore};
use mentorhub_session::credentials;

use super::redirect::RedirectPolicy;

/// Clears the stored session and sends the user to a login surface.
///
/// Used for every unrecoverable authentication failure and for idle
/// timeouts. Store errors are logged, never propagated: the redirect
/// still happens.
///
/// Every teardown advances the session epoch. Writers of new credentials
/// take [`SessionTerminator::hold`] and compare epochs first, so a token
/// obtained for a session that has since ended is never stored.
#[derive(Debug, Clone)]
pub struct SessionTerminator {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    policy: RedirectPolicy,
    epoch: Arc<AtomicU64>,
    gate: Arc<Mutex<()>>,
}

impl SessionTerminator {
    /// Create a terminator over the given store and navigator.
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        policy: RedirectPolicy,
    ) -> Self {
        Self {
            store,
            navigator,
            policy,
            epoch: Arc::new(AtomicU64::new(0)),
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Number of teardowns performed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Block teardowns while the guard is held.
    ///
    /// Waits for a teardown already in progress to finish clearing the store.
    pub async fn hold(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// The navigator redirects are issued on.
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Tear the session down and redirect unless on a public route.
    ///
    /// Returns the redirect target, if a redirect was issued.
    pub async fn terminate(&self, reason: &str) -> Option<String> {
        let user_type = match credentials::stored_user_type(self.store.as_ref()).await {
            Ok(user_type) => user_type,
            Err(e) => {
                error!(error = %e, "Failed to read stored user type");
                None
            }
        };

        {
            let _gate = self.gate.lock().await;
            self.epoch.fetch_add(1, Ordering::SeqCst);
            if let Err(e) = credentials::clear_session(self.store.as_ref()).await {
                error!(error = %e, reason, "Failed to clear session credentials");
            }
        }

        let current = self.navigator.current_path();
        match self.policy.target(&current, user_type) {
            Some(target) => {
                warn!(reason, from = %current, to = %target, "Session ended; redirecting to login");
                self.navigator.hard_redirect(target);
                Some(target.to_string())
            }
            None => {
                info!(reason, path = %current, "Session ended on a public route");
                None
            }
        }
    }
}
