pub mod document;
pub mod file;
pub mod firebase;
pub mod memory;
pub mod traits;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{StoreBackend, StoreConfig};
use file::FileStore;
use firebase::FirebaseStore;
use memory::MemoryStore;
use traits::StateStore;

/// Build the document store selected by configuration.
pub fn build_store(config: &StoreConfig) -> Arc<dyn StateStore> {
    match config.backend {
        StoreBackend::Firebase => Arc::new(FirebaseStore::with_options(
            &config.database_url,
            &config.document_path,
            config.auth_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )),
        StoreBackend::File => Arc::new(FileStore::new(config.file_path.clone())),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}
