//! Storage collaborator trait.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::record::{AssetRecord, TransformPayload};

/// Reads and writes asset records.
///
/// Implementations are constructed by the hosting application and passed
/// into the editor; the editor never creates its own client.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Fetch one record by id.
    async fn fetch_asset(&self, id: &str) -> StoreResult<AssetRecord>;

    /// Overwrite the transform fields of a record.
    async fn update_transform(&self, id: &str, payload: &TransformPayload) -> StoreResult<()>;

    /// Set the public visibility flag of a record.
    async fn set_published(&self, id: &str, published: bool) -> StoreResult<()>;
}
