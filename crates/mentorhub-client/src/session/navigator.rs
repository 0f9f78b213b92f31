//! In-process navigator that tracks the current route.

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;
use tracing::warn;

use mentorhub_core::traits::Navigator;

/// Tracks the route the client is on and records forced redirects.
///
/// A hard redirect replaces the current route and discards any state
/// subscribers hold for the old one; subscribers observe the change through
/// [`RouteNavigator::subscribe`].
#[derive(Debug)]
pub struct RouteNavigator {
    current: watch::Sender<String>,
    redirects: Mutex<Vec<String>>,
}

impl RouteNavigator {
    /// Start on `path`.
    pub fn new(path: impl Into<String>) -> Self {
        let (current, _) = watch::channel(path.into());
        Self {
            current,
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// Client-side navigation to `path`.
    pub fn navigate(&self, path: impl Into<String>) {
        self.current.send_replace(path.into());
    }

    /// Watch the current route.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }

    /// Every hard redirect performed so far, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RouteNavigator {
    fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    fn hard_redirect(&self, target: &str) {
        let from = self.current.send_replace(target.to_string());
        warn!(from = %from, to = %target, "Hard redirect");
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.to_string());
    }
}
