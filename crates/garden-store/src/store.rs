//! The storage trait the API service depends on.

use async_trait::async_trait;
use garden_shared::PlantDocument;

use crate::error::Result;

/// Load/save access to the plant document.
///
/// `save` replaces the stored document wholesale. Implementations must make
/// the replacement appear atomic: a concurrent `load` sees either the old
/// document or the new one, never a mixture or a truncated file.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Read the full document.
    async fn load(&self) -> Result<PlantDocument>;

    /// Overwrite the full document.
    async fn save(&self, document: &PlantDocument) -> Result<()>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
