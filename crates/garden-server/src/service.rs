//! Plant operations on top of a [`PlantStore`].
//!
//! Every operation loads the full document, works on it in memory and, for
//! mutations, writes the full document back. Mutations hold `write_lock`
//! from load to save so two concurrent writers cannot overwrite each
//! other's changes. Reads go straight to the store.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use garden_shared::{now_millis, NewPlant, Plant, PlantId, PlantPatch};
use garden_store::PlantStore;

use crate::error::ApiError;

pub struct PlantService {
    store: Arc<dyn PlantStore>,
    write_lock: Mutex<()>,
}

impl PlantService {
    pub fn new(store: Arc<dyn PlantStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn list(&self) -> Result<Vec<Plant>, ApiError> {
        let document = self
            .store
            .load()
            .await
            .map_err(ApiError::storage("Error retrieving plants"))?;
        Ok(document.plants)
    }

    pub async fn get(&self, id: PlantId) -> Result<Plant, ApiError> {
        let document = self
            .store
            .load()
            .await
            .map_err(ApiError::storage("Error retrieving plant"))?;
        document.get(id).cloned().ok_or(ApiError::NotFound)
    }

    pub async fn create(&self, new: NewPlant) -> Result<Plant, ApiError> {
        new.validate()?;

        let _guard = self.write_lock.lock().await;
        let on_err = "Error creating plant";
        let mut document = self.store.load().await.map_err(ApiError::storage(on_err))?;

        let id = document
            .next_id()
            .ok_or(ApiError::IdsExhausted { context: on_err })?;
        let plant = new.into_plant(id, now_millis());
        document.plants.push(plant.clone());

        self.store
            .save(&document)
            .await
            .map_err(ApiError::storage(on_err))?;

        info!(id = plant.id, name = %plant.name, "Plant created");
        Ok(plant)
    }

    pub async fn update(&self, id: PlantId, patch: PlantPatch) -> Result<Plant, ApiError> {
        patch.validate()?;

        let _guard = self.write_lock.lock().await;
        let on_err = "Error updating plant";
        let mut document = self.store.load().await.map_err(ApiError::storage(on_err))?;

        let plant = document.get_mut(id).ok_or(ApiError::NotFound)?;
        patch.apply(plant);
        let updated = plant.clone();

        self.store
            .save(&document)
            .await
            .map_err(ApiError::storage(on_err))?;

        info!(id, "Plant updated");
        Ok(updated)
    }

    pub async fn water(&self, id: PlantId) -> Result<Plant, ApiError> {
        let _guard = self.write_lock.lock().await;
        let on_err = "Error watering plant";
        let mut document = self.store.load().await.map_err(ApiError::storage(on_err))?;

        let plant = document.get_mut(id).ok_or(ApiError::NotFound)?;
        plant.last_watered = now_millis();
        let watered = plant.clone();

        self.store
            .save(&document)
            .await
            .map_err(ApiError::storage(on_err))?;

        info!(id, at = %watered.last_watered, "Plant watered");
        Ok(watered)
    }

    pub async fn delete(&self, id: PlantId) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        let on_err = "Error deleting plant";
        let mut document = self.store.load().await.map_err(ApiError::storage(on_err))?;

        let removed = document.remove(id).ok_or(ApiError::NotFound)?;

        self.store
            .save(&document)
            .await
            .map_err(ApiError::storage(on_err))?;

        debug!(remaining = document.len(), "Document rewritten after delete");
        info!(id, name = %removed.name, "Plant deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_shared::{Health, PlantDocument, Sunlight};
    use garden_store::MemoryStore;

    fn service_with(store: MemoryStore) -> (PlantService, Arc<MemoryStore>) {
        let store = Arc::new(store);
        (PlantService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_on_empty_store() {
        let (service, _) = service_with(MemoryStore::empty());
        let before = now_millis();

        let plant = service.create(NewPlant::named("Fern")).await.unwrap();

        assert_eq!(plant.id, 1);
        assert_eq!(plant.sunlight, Sunlight::Partial);
        assert_eq!(plant.watering_frequency, 7);
        assert_eq!(plant.health, Health::Good);
        assert!(plant.last_watered >= before);
        assert!(plant.last_watered <= now_millis());
    }

    #[tokio::test]
    async fn test_create_after_delete_uses_max_plus_one() {
        let (service, _) = service_with(MemoryStore::seeded());

        service.delete(1).await.unwrap();
        let plant = service.create(NewPlant::named("X")).await.unwrap();

        assert_eq!(plant.id, 3);
    }

    #[tokio::test]
    async fn test_create_fails_when_ids_exhausted() {
        let last = NewPlant::named("Last").into_plant(PlantId::MAX, now_millis());
        let (service, store) = service_with(MemoryStore::new(PlantDocument::new(vec![last])));

        let err = service.create(NewPlant::named("Fern")).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::IdsExhausted { context: "Error creating plant" }
        ));
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_then_get_is_identical() {
        let (service, _) = service_with(MemoryStore::seeded());
        let created = service.create(NewPlant::named("Fern")).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_water_only_touches_last_watered() {
        let (service, _) = service_with(MemoryStore::seeded());
        let before = service.get(2).await.unwrap();

        let watered = service.water(2).await.unwrap();

        assert!(watered.last_watered > before.last_watered);
        let mut expected = before.clone();
        expected.last_watered = watered.last_watered;
        assert_eq!(watered, expected);
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let (service, _) = service_with(MemoryStore::seeded());
        let patch: PlantPatch =
            serde_json::from_value(serde_json::json!({ "id": 99, "name": "Big Monstera" }))
                .unwrap();

        let updated = service.update(1, patch).await.unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Big Monstera");
        assert_eq!(updated.species, "Monstera");
        assert!(matches!(service.get(99).await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let (service, store) = service_with(MemoryStore::seeded());

        assert!(matches!(service.get(99).await, Err(ApiError::NotFound)));
        assert!(matches!(service.water(99).await, Err(ApiError::NotFound)));
        assert!(matches!(service.delete(99).await, Err(ApiError::NotFound)));
        assert!(matches!(
            service.update(99, PlantPatch::default()).await,
            Err(ApiError::NotFound)
        ));
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (service, _) = service_with(MemoryStore::seeded());

        service.delete(1).await.unwrap();

        let remaining = service.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
        assert!(matches!(service.get(1).await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_validation_rejected_before_store_access() {
        let (service, store) = service_with(MemoryStore::empty());
        store.set_offline(true);

        let err = service.create(NewPlant::named("")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let (service, store) = service_with(MemoryStore::seeded());
        store.set_offline(true);

        assert!(matches!(
            service.list().await,
            Err(ApiError::Storage { context: "Error retrieving plants", .. })
        ));
        assert!(matches!(
            service.water(1).await,
            Err(ApiError::Storage { context: "Error watering plant", .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let (service, store) = service_with(MemoryStore::new(PlantDocument::default()));
        let service = Arc::new(service);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .create(NewPlant::named(format!("plant-{i}")))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(store.load().await.unwrap().len(), 20);
    }
}
