//! Inactivity monitor.
//!
//! Ends the session when nothing has gone through the client for the
//! configured idle period.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use super::teardown::SessionTerminator;

/// Cheap handle used to record activity.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    last: Arc<watch::Sender<Instant>>,
}

impl ActivityTracker {
    /// Record activity now.
    pub fn touch(&self) {
        self.last.send_replace(Instant::now());
    }

    /// When activity was last recorded.
    pub fn last_activity(&self) -> Instant {
        *self.last.borrow()
    }
}

/// Background task that tears the session down after an idle period.
///
/// The task stops after firing once, on [`IdleMonitor::shutdown`], or when
/// the monitor is dropped.
///
/// Intended for long-lived embedders that keep one client for a whole user
/// session; attach it with [`crate::ApiClient::with_activity_tracker`].
#[derive(Debug)]
pub struct IdleMonitor {
    tracker: ActivityTracker,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<bool>,
}

impl IdleMonitor {
    /// Spawn the monitor on the current tokio runtime.
    pub fn spawn(timeout: Duration, terminator: SessionTerminator) -> Self {
        let (last, mut activity) = watch::channel(Instant::now());
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            loop {
                let deadline = *activity.borrow_and_update() + timeout;
                tokio::select! {
                    _ = tokio::time::sleep_until(deadline) => {
                        if *activity.borrow() + timeout > Instant::now() {
                            continue;
                        }
                        info!(idle_secs = timeout.as_secs(), "Session idle timeout reached");
                        terminator.terminate("idle timeout").await;
                        return true;
                    }
                    changed = activity.changed() => {
                        if changed.is_err() {
                            return false;
                        }
                    }
                    _ = stop.changed() => {
                        debug!("Idle monitor stopped");
                        return false;
                    }
                }
            }
        });

        Self {
            tracker: ActivityTracker {
                last: Arc::new(last),
            },
            shutdown,
            handle,
        }
    }

    /// Handle for recording activity.
    pub fn tracker(&self) -> ActivityTracker {
        self.tracker.clone()
    }

    /// Stop the monitor without ending the session.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }

    /// Wait for the monitor to finish. Returns `true` if it ended the session.
    pub async fn join(self) -> bool {
        let Self {
            tracker: _tracker,
            shutdown: _shutdown,
            handle,
        } = self;
        handle.await.unwrap_or(false)
    }
}
