use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::models::state::AppState;
use crate::storage::traits::StateStore;

/// Best-effort persistence: writes a snapshot of the state to the store in
/// a background task that the caller never waits for.
///
/// A failed write is not retried and does not roll back the in-memory
/// change. It is logged and remembered in `last_error` until the next
/// successful write. Writes may finish out of order; since each one is a
/// full overwrite, the store ends up holding whichever finished last.
pub struct PersistService {
    store: Arc<dyn StateStore>,
    last_error: Arc<Mutex<Option<String>>>,
    dispatched: AtomicUsize,
}

/// Handle to one dispatched write. Dropping it is fine; the write still runs.
#[derive(Debug)]
pub struct PersistTicket {
    handle: Option<JoinHandle<bool>>,
}

impl PersistTicket {
    /// Wait for the write to finish. Returns `true` if it was stored.
    pub async fn finished(self) -> bool {
        match self.handle {
            Some(handle) => handle.await.unwrap_or(false),
            None => false,
        }
    }

    /// `true` once the write has completed (or was never started).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl PersistService {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            last_error: Arc::new(Mutex::new(None)),
            dispatched: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &Arc<dyn StateStore> {
        &self.store
    }

    /// Dispatch a write of `state` without waiting for it.
    ///
    /// Needs a running tokio runtime; without one the write is skipped and
    /// recorded as failed.
    pub fn persist_best_effort(&self, state: &AppState) -> PersistTicket {
        self.dispatched.fetch_add(1, Ordering::Relaxed);

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "No async runtime, state not persisted");
                record(&self.last_error, Some(format!("no async runtime: {e}")));
                return PersistTicket { handle: None };
            }
        };

        let snapshot = state.clone();
        let store = Arc::clone(&self.store);
        let last_error = Arc::clone(&self.last_error);

        let handle = runtime.spawn(async move {
            match store.save(&snapshot).await {
                Ok(()) => {
                    tracing::debug!(
                        store = store.name(),
                        expenses = snapshot.expenses.len(),
                        "State persisted"
                    );
                    record(&last_error, None);
                    true
                }
                Err(e) => {
                    tracing::warn!(store = store.name(), error = %e, "Failed to persist state");
                    record(&last_error, Some(e.to_string()));
                    false
                }
            }
        });

        PersistTicket {
            handle: Some(handle),
        }
    }

    /// Number of writes dispatched so far.
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Message of the most recent failed write, if it hasn't been
    /// superseded by a successful one.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn record(slot: &Mutex<Option<String>>, value: Option<String>) {
    *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
}
