//! Local view of the plant collection, kept in sync with the server.
//!
//! [`PlantsState`] owns the client's copy of the plants plus the loading and
//! error flags a UI renders from. Every action makes exactly one API call
//! and, on success, folds the server's answer into the local copy: new
//! plants are appended, updated or watered plants replace the entry with the
//! same id, deleted plants are dropped.
//!
//! Loading is tracked per action. `is_loading()` stays true until every
//! in-flight action has finished, so a quick action completing does not
//! hide a slower one that is still running.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, warn};

use garden_shared::{NewPlant, Plant, PlantId, PlantPatch};

use crate::api::PlantsApi;
use crate::error::Result;

/// The kinds of call [`PlantsState`] can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantAction {
    Fetch,
    Add,
    Update,
    Water,
    Delete,
}

impl PlantAction {
    fn describe(&self) -> &'static str {
        match self {
            PlantAction::Fetch => "Error fetching plants",
            PlantAction::Add => "Error adding plant",
            PlantAction::Update => "Error updating plant",
            PlantAction::Water => "Error watering plant",
            PlantAction::Delete => "Error deleting plant",
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    plants: Vec<Plant>,
    error: Option<String>,
    in_flight: HashMap<PlantAction, usize>,
}

pub struct PlantsState<A> {
    api: A,
    inner: Mutex<Inner>,
}

/// Marks an action as in flight for as long as it lives, including when the
/// action's future is dropped before completing.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    action: PlantAction,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = inner.in_flight.get_mut(&self.action) {
            *count -= 1;
            if *count == 0 {
                inner.in_flight.remove(&self.action);
            }
        }
    }
}

impl<A: PlantsApi> PlantsState<A> {
    /// An empty state that has not talked to the server yet.
    pub fn new(api: A) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Create the state and perform the initial fetch. A failed fetch leaves
    /// the collection empty and the message in [`PlantsState::error`].
    pub async fn mount(api: A) -> Self {
        let state = Self::new(api);
        if let Err(e) = state.fetch_plants().await {
            warn!(error = %e, "Initial plant fetch failed");
        }
        state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Snapshot accessors
    // ------------------------------------------------------------------

    pub fn plants(&self) -> Vec<Plant> {
        self.lock().plants.clone()
    }

    pub fn find(&self, id: PlantId) -> Option<Plant> {
        self.lock().plants.iter().find(|p| p.id == id).cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// True while any action is in flight.
    pub fn is_loading(&self) -> bool {
        !self.lock().in_flight.is_empty()
    }

    pub fn is_pending(&self, action: PlantAction) -> bool {
        self.lock().in_flight.contains_key(&action)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Replace the local collection with the server's. Clears any previous
    /// error on success.
    pub async fn fetch_plants(&self) -> Result<()> {
        let plants = self.track(PlantAction::Fetch, self.api.list()).await?;
        let mut inner = self.lock();
        inner.plants = plants;
        inner.error = None;
        Ok(())
    }

    pub async fn add_plant(&self, new: NewPlant) -> Result<Plant> {
        let plant = self.track(PlantAction::Add, self.api.create(&new)).await?;
        self.lock().plants.push(plant.clone());
        Ok(plant)
    }

    pub async fn update_plant(&self, id: PlantId, patch: PlantPatch) -> Result<Plant> {
        let plant = self
            .track(PlantAction::Update, self.api.update(id, &patch))
            .await?;
        self.replace(id, &plant);
        Ok(plant)
    }

    pub async fn water_plant(&self, id: PlantId) -> Result<Plant> {
        let plant = self.track(PlantAction::Water, self.api.water(id)).await?;
        self.replace(id, &plant);
        Ok(plant)
    }

    pub async fn delete_plant(&self, id: PlantId) -> Result<()> {
        self.track(PlantAction::Delete, self.api.delete(id)).await?;
        self.lock().plants.retain(|p| p.id != id);
        Ok(())
    }

    fn replace(&self, id: PlantId, plant: &Plant) {
        let mut inner = self.lock();
        for existing in inner.plants.iter_mut().filter(|p| p.id == id) {
            *existing = plant.clone();
        }
    }

    /// Run one API call with `action` marked in flight. A failure is recorded
    /// as the current error and handed back to the caller.
    async fn track<T>(
        &self,
        action: PlantAction,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        *self.lock().in_flight.entry(action).or_insert(0) += 1;
        let _in_flight = InFlight {
            inner: &self.inner,
            action,
        };

        call.await.map_err(|e| {
            error!(error = %e, "{}", action.describe());
            self.lock().error = Some(e.to_string());
            e
        })
    }
}
