use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::state::AppState;
use super::document;
use super::traits::StateStore;

const STORE_NAME: &str = "Memory";

/// In-process document store.
///
/// Keeps the encoded document (so everything still goes through the JSON
/// codec) and counts calls. Clones share the same document, so a caller can
/// hand one clone to a tracker and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    document: Option<Vec<u8>>,
    loads: usize,
    saves: usize,
    fail_loads: bool,
    fail_saves: bool,
    save_delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `state` already stored.
    pub fn with_state(state: &AppState) -> Result<Self, CoreError> {
        let store = Self::new();
        store.lock().document = Some(document::encode(state)?);
        Ok(store)
    }

    /// Start with a raw document body, as the remote store would return it.
    pub fn with_raw_document(body: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().document = Some(body.into());
        store
    }

    /// Number of completed or attempted `load` calls.
    pub fn load_count(&self) -> usize {
        self.lock().loads
    }

    /// Number of `save` calls that reached the store.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Make subsequent loads fail with a store error.
    pub fn set_fail_loads(&self, fail: bool) {
        self.lock().fail_loads = fail;
    }

    /// Make subsequent saves fail with a store error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Hold every save for `delay` before writing, like a slow network.
    pub fn set_save_delay(&self, delay: Option<Duration>) {
        self.lock().save_delay = delay;
    }

    /// Decode whatever is currently stored.
    pub fn stored_state(&self) -> Result<Option<AppState>, CoreError> {
        match &self.lock().document {
            Some(bytes) => document::decode(bytes),
            None => Ok(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    async fn load(&self) -> Result<Option<AppState>, CoreError> {
        let bytes = {
            let mut inner = self.lock();
            inner.loads += 1;
            if inner.fail_loads {
                return Err(CoreError::Store {
                    store: STORE_NAME.into(),
                    message: "load failed".into(),
                });
            }
            inner.document.clone()
        };
        match bytes {
            Some(bytes) => document::decode(&bytes),
            None => Ok(None),
        }
    }

    async fn save(&self, state: &AppState) -> Result<(), CoreError> {
        let body = document::encode(state)?;
        let delay = {
            let mut inner = self.lock();
            inner.saves += 1;
            inner.save_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.lock();
        if inner.fail_saves {
            return Err(CoreError::Store {
                store: STORE_NAME.into(),
                message: "save failed".into(),
            });
        }
        inner.document = Some(body);
        Ok(())
    }
}
