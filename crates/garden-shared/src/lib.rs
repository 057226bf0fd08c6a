//! # garden-shared
//!
//! Types shared between the Garden Tracker server, store, and client: the
//! plant record and its enums, the request schemas accepted by the API, the
//! on-disk document that holds the whole collection, and the JSON message
//! envelope used for confirmations and errors.

pub mod constants;
pub mod document;
pub mod error;
pub mod plant;
pub mod protocol;
pub mod request;

pub use document::PlantDocument;
pub use error::ValidationError;
pub use plant::{now_millis, Health, Plant, PlantId, Sunlight};
pub use protocol::ApiMessage;
pub use request::{NewPlant, PlantPatch};
