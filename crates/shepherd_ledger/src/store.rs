//! Durable storage for the ledger state.

use crate::UsageState;
use async_trait::async_trait;
use shepherd_error::{StorageError, StorageErrorKind, StorageResult};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Backend that loads and replaces the ledger state as a whole.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the last saved state.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns error if the stored state cannot be read or decoded.
    async fn load(&self) -> StorageResult<Option<UsageState>>;

    /// Replace the stored state.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be written.
    async fn save(&self, state: &UsageState) -> StorageResult<()>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// JSON file store that writes a temp file and renames it into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> StorageResult<Option<UsageState>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No ledger file yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                ))));
            }
        };

        let state = serde_json::from_str(&json).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        debug!("Ledger state loaded");
        Ok(Some(state))
    }

    #[instrument(skip(self, state), fields(path = %self.path.display()))]
    async fn save(&self, state: &UsageState) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::new(StorageErrorKind::Encode(e.to_string())))?;

        // Write to temp file first, then rename over the previous state
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        debug!("Ledger state saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: Option<UsageState>,
    fail_writes: bool,
    saves: usize,
}

/// In-memory store for dry runs and tests.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the ledger persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts out holding `state`.
    pub fn with_state(state: UsageState) -> Self {
        let store = Self::default();
        store.lock().state = Some(state);
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Last successfully saved state.
    pub fn snapshot(&self) -> Option<UsageState> {
        self.lock().state.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> StorageResult<Option<UsageState>> {
        Ok(self.snapshot())
    }

    async fn save(&self, state: &UsageState) -> StorageResult<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "memory store rejecting writes".to_string(),
            )));
        }
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
