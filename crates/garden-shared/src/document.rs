//! The persisted document: `{ "plants": [...] }`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::plant::{Health, Plant, PlantId, Sunlight};

const MONSTERA_IMAGE: &str = "https://images.unsplash.com/photo-1614594975525-e45190c55d0b?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=764&q=80";
const PEACE_LILY_IMAGE: &str = "https://images.unsplash.com/photo-1593482892290-f54927ae2b7a?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=764&q=80";

/// The whole plant collection, read and written as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDocument {
    pub plants: Vec<Plant>,
}

impl PlantDocument {
    pub fn new(plants: Vec<Plant>) -> Self {
        Self { plants }
    }

    /// The two starter plants written when no document exists yet.
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self::new(vec![
            Plant {
                id: 1,
                name: "Monstera Deliciosa".into(),
                species: "Monstera".into(),
                image: MONSTERA_IMAGE.into(),
                watering_frequency: 7,
                sunlight: Sunlight::Partial,
                last_watered: now,
                health: Health::Good,
                notes: "Thriving in the living room corner.".into(),
            },
            Plant {
                id: 2,
                name: "Peace Lily".into(),
                species: "Spathiphyllum".into(),
                image: PEACE_LILY_IMAGE.into(),
                watering_frequency: 5,
                sunlight: Sunlight::Shade,
                last_watered: now - Duration::days(5),
                health: Health::Average,
                notes: "Needs more water during summer.".into(),
            },
        ])
    }

    /// One past the largest id in the collection, or 1 when it is empty.
    /// Ids freed by deleting the current maximum are handed out again.
    /// `None` once the largest id is `PlantId::MAX`.
    pub fn next_id(&self) -> Option<PlantId> {
        match self.plants.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        self.plants.iter_mut().find(|p| p.id == id)
    }

    /// Remove the plant with `id`, returning it if it was present.
    pub fn remove(&mut self, id: PlantId) -> Option<Plant> {
        let index = self.plants.iter().position(|p| p.id == id)?;
        Some(self.plants.remove(index))
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::now_millis;
    use crate::request::NewPlant;

    fn doc_with_ids(ids: &[PlantId]) -> PlantDocument {
        let now = now_millis();
        PlantDocument::new(
            ids.iter()
                .map(|&id| NewPlant::named(format!("plant-{id}")).into_plant(id, now))
                .collect(),
        )
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(PlantDocument::default().next_id(), Some(1));
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        assert_eq!(doc_with_ids(&[3, 9, 4]).next_id(), Some(10));
    }

    #[test]
    fn test_next_id_reuses_freed_maximum() {
        let mut doc = doc_with_ids(&[1, 2]);
        doc.remove(2).unwrap();
        assert_eq!(doc.next_id(), Some(2));
    }

    #[test]
    fn test_next_id_exhausted() {
        assert_eq!(doc_with_ids(&[1, PlantId::MAX]).next_id(), None);
    }

    #[test]
    fn test_remove_missing() {
        let mut doc = doc_with_ids(&[1]);
        assert!(doc.remove(7).is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_seed_contents() {
        let now = now_millis();
        let doc = PlantDocument::seed(now);

        assert_eq!(doc.len(), 2);
        let monstera = doc.get(1).unwrap();
        assert_eq!(monstera.name, "Monstera Deliciosa");
        assert_eq!(monstera.last_watered, now);

        let lily = doc.get(2).unwrap();
        assert_eq!(lily.name, "Peace Lily");
        assert_eq!(lily.sunlight, Sunlight::Shade);
        assert_eq!(lily.health, Health::Average);
        assert_eq!(now - lily.last_watered, Duration::days(5));
    }

    #[test]
    fn test_document_json_shape() {
        let json = serde_json::to_value(doc_with_ids(&[1])).unwrap();
        assert!(json["plants"].is_array());
        assert_eq!(json["plants"][0]["id"], 1);
    }
}
