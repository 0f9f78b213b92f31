//! Single-flight coordination of access-token refreshes.
//!
//! At most one refresh runs at a time. Callers that need a token while a
//! refresh is in flight queue a one-shot completion and receive the same
//! outcome as the caller that issued the refresh, in enqueue order.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use mentorhub_core::error::AppError;
use mentorhub_core::result::AppResult;

type Waiter = oneshot::Sender<AppResult<String>>;

#[derive(Debug, Default)]
struct RefreshState {
    /// True from the moment a refresh is issued until it settles.
    in_flight: bool,
    /// Callers waiting on the in-flight refresh, oldest first.
    waiters: VecDeque<Waiter>,
}

/// Shared refresh flag plus the queue of callers waiting on it.
///
/// The lock is only held for flag/queue bookkeeping, never across an
/// `.await`.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    /// Create an idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        self.lock().in_flight
    }

    /// Number of callers queued behind the in-flight refresh.
    pub fn queued(&self) -> usize {
        self.lock().waiters.len()
    }

    /// Obtain a fresh access token.
    ///
    /// If no refresh is in flight, `refresh` is invoked and its outcome is
    /// handed to every caller that queued while it ran. Otherwise `refresh`
    /// is dropped unused and this call waits for the in-flight outcome.
    pub async fn run<F, Fut>(&self, refresh: F) -> AppResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<String>>,
    {
        let waiter = {
            let mut state = self.lock();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                debug!(queued = state.waiters.len(), "Token refresh in flight; request queued");
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            return rx.await.unwrap_or_else(|_| Err(abandoned()));
        }

        let guard = InFlight {
            coordinator: self,
            settled: false,
        };
        let outcome = refresh().await;
        guard.settle(&outcome);
        outcome
    }

    /// Clear the flag and hand `outcome` to every queued caller.
    ///
    /// Both happen under one lock, so a caller arriving afterwards either
    /// starts a new refresh or was already queued for this one.
    fn settle(&self, outcome: &AppResult<String>) {
        let mut state = self.lock();
        state.in_flight = false;

        if !state.waiters.is_empty() {
            debug!(
                waiters = state.waiters.len(),
                success = outcome.is_ok(),
                "Releasing queued requests"
            );
        }

        for waiter in state.waiters.drain(..) {
            // A waiter whose caller went away is simply skipped.
            let _ = waiter.send(outcome.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight flag even if the refresh future is dropped or panics.
struct InFlight<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, outcome: &AppResult<String>) {
        self.settled = true;
        self.coordinator.settle(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Token refresh abandoned before completion");
            self.coordinator.settle(&Err(abandoned()));
        }
    }
}

fn abandoned() -> AppError {
    AppError::session("Token refresh was abandoned before it completed")
}
