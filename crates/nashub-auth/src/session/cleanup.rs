//! Periodic sweep of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use super::store::SessionStore;

/// Purges expired sessions on a fixed interval.
///
/// Lookups already evict expired sessions lazily; the sweep only bounds
/// memory held by tokens that are never presented again.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    /// Session store to sweep.
    session_store: Arc<SessionStore>,
    /// Time between sweeps.
    interval: Duration,
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(session_store: Arc<SessionStore>, interval: Duration) -> Self {
        Self {
            session_store,
            interval,
        }
    }

    /// Runs a single cleanup cycle, returning the number of sessions removed.
    pub fn run_cleanup(&self) -> usize {
        let cleaned = self.session_store.purge_expired();
        if cleaned > 0 {
            info!(cleaned = cleaned, "Session cleanup completed");
        } else {
            debug!("Session cleanup found nothing to remove");
        }
        cleaned
    }

    /// Sweeps until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_cleanup();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Session cleanup stopping");
                        break;
                    }
                }
            }
        }
    }
}
