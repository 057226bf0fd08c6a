//! # garden-store
//!
//! Durable storage for the plant collection.
//!
//! The whole collection lives in a single [`PlantDocument`] that is loaded
//! and saved as one unit. [`PlantStore`] is the seam the API service
//! depends on; [`JsonFileStore`] keeps the document in a JSON file on disk
//! and [`MemoryStore`] keeps it in process memory for tests and throwaway
//! deployments.
//!
//! Stores do no locking of their own. A caller that loads, mutates and saves
//! must serialise those steps itself if it can race with another writer.

pub mod json_file;
pub mod memory;
pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::PlantStore;

pub use garden_shared::PlantDocument;
