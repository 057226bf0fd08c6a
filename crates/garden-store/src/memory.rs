//! In-process backend.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use garden_shared::{now_millis, PlantDocument};

use crate::error::{Result, StoreError};
use crate::store::PlantStore;

/// Keeps the document in memory. Nothing survives a restart.
///
/// [`MemoryStore::set_offline`] makes every call fail with
/// [`StoreError::Unavailable`], which lets callers exercise their
/// storage-failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<PlantDocument>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(document: PlantDocument) -> Self {
        Self {
            document: Mutex::new(document),
            offline: AtomicBool::new(false),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Start with the same two plants a fresh file store is seeded with.
    pub fn seeded() -> Self {
        Self::new(PlantDocument::seed(now_millis()))
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlantStore for MemoryStore {
    async fn load(&self) -> Result<PlantDocument> {
        self.check_online()?;
        Ok(self.document.lock().await.clone())
    }

    async fn save(&self, document: &PlantDocument) -> Result<()> {
        self.check_online()?;
        *self.document.lock().await = document.clone();
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
