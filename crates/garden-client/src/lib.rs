//! # garden-client
//!
//! Client side of the Garden Tracker: an HTTP binding for the plant API,
//! a [`PlantsState`] that keeps a local copy of the collection in sync with
//! the server, text views for rendering plants, and the `garden` CLI.

pub mod api;
pub mod cli;
pub mod state;
pub mod view;

mod error;

pub use api::{HttpPlantsApi, PlantsApi};
pub use error::{ClientError, Result};
pub use state::{PlantAction, PlantsState};
