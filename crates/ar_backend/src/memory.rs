//! Process-local asset store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::record::{AssetRecord, TransformPayload};
use crate::store::AssetStore;

/// A write observed by the store, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreWrite {
    Transform { id: String, payload: TransformPayload },
    Published { id: String, published: bool },
}

/// In-memory [`AssetStore`].
///
/// Supports failure injection and artificial latency so callers can
/// exercise error and concurrency paths without a network.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, AssetRecord>>,
    writes: RwLock<Vec<StoreWrite>>,
    failure: RwLock<Option<StoreError>>,
    latency: RwLock<Option<Duration>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    pub fn with_records(records: impl IntoIterator<Item = AssetRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, record: AssetRecord) {
        self.records.write().insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<AssetRecord> {
        self.records.read().get(id).cloned()
    }

    /// Make every following write fail with `error` until cleared.
    pub fn fail_writes_with(&self, error: StoreError) {
        *self.failure.write() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.write() = None;
    }

    /// Delay every operation by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }

    /// All successful writes so far.
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.read().clone()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.read();
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_failure(&self) -> StoreResult<()> {
        match self.failure.read().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AssetStore for InMemoryStore {
    async fn fetch_asset(&self, id: &str) -> StoreResult<AssetRecord> {
        self.simulate_latency().await;
        self.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_transform(&self, id: &str, payload: &TransformPayload) -> StoreResult<()> {
        self.simulate_latency().await;
        self.check_failure()?;

        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.apply_payload(payload);

        self.writes.write().push(StoreWrite::Transform {
            id: id.to_string(),
            payload: *payload,
        });
        Ok(())
    }

    async fn set_published(&self, id: &str, published: bool) -> StoreResult<()> {
        self.simulate_latency().await;
        self.check_failure()?;

        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.published = published;

        self.writes.write().push(StoreWrite::Published {
            id: id.to_string(),
            published,
        });
        Ok(())
    }
}
