use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::CoreError;
use crate::models::state::AppState;
use super::document;
use super::traits::StateStore;

/// Distinguishes temp files of writes that overlap in time.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// The budget document kept as a JSON file on local disk.
///
/// Same document shape as the remote store; a missing file reads as
/// "nothing saved yet".
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(format!(".{}.{seq}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for FileStore {
    fn name(&self) -> &str {
        "File"
    }

    async fn load(&self) -> Result<Option<AppState>, CoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => document::decode(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: &AppState) -> Result<(), CoreError> {
        let body = document::encode(state)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        // Each write gets its own temp file beside the target, then is renamed
        // into place. Overlapping writes each land whole; the last rename wins.
        let tmp = self.temp_path();
        if let Err(e) = tokio::fs::write(&tmp, body).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
