use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::state::AppState;

/// Where the budget document lives.
///
/// The whole `AppState` is one document: `load` reads it back in full and
/// `save` overwrites it in full. There are no partial updates, so the last
/// write wins. Backends: the remote realtime database, a local JSON file,
/// or memory.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the stored document. `Ok(None)` means nothing has been saved yet.
    async fn load(&self) -> Result<Option<AppState>, CoreError>;

    /// Replace the stored document with `state`.
    async fn save(&self, state: &AppState) -> Result<(), CoreError>;
}
