//! JSON file backend.
//!
//! The document is stored pretty-printed at a fixed path. Saves go to a
//! sibling `.tmp` file which is then renamed over the target, so a reader
//! never sees a half-written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use garden_shared::{now_millis, PlantDocument};

use crate::error::{Result, StoreError};
use crate::store::PlantStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the document at `path`, creating its directory if needed and
    /// writing the seed plants if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let store = Self { path };

        let exists = fs::try_exists(&store.path)
            .await
            .map_err(|e| StoreError::io(&store.path, e))?;
        if !exists {
            store.save(&PlantDocument::seed(now_millis())).await?;
            info!(path = %store.path.display(), "Seeded new plant document");
        } else {
            info!(path = %store.path.display(), "Using existing plant document");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "plants.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PlantStore for JsonFileStore {
    async fn load(&self) -> Result<PlantDocument> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        let document: PlantDocument =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::json(&self.path, e))?;

        debug!(count = document.len(), "Loaded plant document");
        Ok(document)
    }

    async fn save(&self, document: &PlantDocument) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(document).map_err(|e| StoreError::json(&self.path, e))?;

        let tmp = self.temp_path();
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        debug!(count = document.len(), size = bytes.len(), "Saved plant document");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_shared::NewPlant;
    use tempfile::TempDir;

    async fn test_store() -> (JsonFileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("data").join("plants.json"))
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_open_seeds_missing_file() {
        let (store, _dir) = test_store().await;
        assert!(store.path().exists());

        let doc = store.load().await.unwrap();
        let names: Vec<_> = doc.plants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Monstera Deliciosa", "Peace Lily"]);
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let (store, dir) = test_store().await;
        store.save(&PlantDocument::default()).await.unwrap();

        let reopened = JsonFileStore::open(dir.path().join("data").join("plants.json"))
            .await
            .unwrap();
        assert!(reopened.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store().await;
        let mut doc = store.load().await.unwrap();
        doc.plants
            .push(NewPlant::named("Fern").into_plant(doc.next_id().unwrap(), now_millis()));

        store.save(&doc).await.unwrap();
        assert_eq!(store.load().await.unwrap(), doc);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_document() {
        let (store, _dir) = test_store().await;
        let raw = std::fs::read_to_string(store.path()).unwrap();

        assert!(raw.starts_with("{\n  \"plants\": ["));
        assert!(raw.contains("\"wateringFrequency\": 7"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (store, _dir) = test_store().await;
        std::fs::write(store.path(), b"{ not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[tokio::test]
    async fn test_loads_form_written_frequency() {
        let (store, _dir) = test_store().await;
        std::fs::write(
            store.path(),
            r#"{"plants":[{"id":3,"name":"Basil","species":"","image":"","wateringFrequency":"3","sunlight":"full","lastWatered":"2024-05-01T09:30:00.000Z","health":"good","notes":""}]}"#,
        )
        .unwrap();

        let doc = store.load().await.unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get(3).unwrap().watering_frequency, 3);
    }

    #[tokio::test]
    async fn test_unreadable_file() {
        let (store, _dir) = test_store().await;
        std::fs::remove_file(store.path()).unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
