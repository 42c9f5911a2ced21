//! Saving transforms and publishing assets through an injected store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ar_backend::{share_url, AssetRecord, AssetStore, ScanCode, StoreResult, TransformPayload};

use crate::core::Transform;
use crate::error::PublishError;

/// Result of a successful publish request.
#[derive(Clone, Debug)]
pub enum PublishOutcome {
    /// Visibility was flipped by this request
    Published(ScanCode),
    /// The asset was already public; the store was not touched
    AlreadyPublished(ScanCode),
}

impl PublishOutcome {
    pub fn code(&self) -> &ScanCode {
        match self {
            PublishOutcome::Published(code) | PublishOutcome::AlreadyPublished(code) => code,
        }
    }

    pub fn share_url(&self) -> &str {
        self.code().url.as_str()
    }
}

/// Clears the in-flight flag when a publish finishes or is dropped.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Bridge between the editor and the asset store.
///
/// Clones share the store and the publish in-flight flag.
#[derive(Clone)]
pub struct PersistenceBridge {
    store: Arc<dyn AssetStore>,
    share_origin: String,
    publishing: Arc<AtomicBool>,
}

impl PersistenceBridge {
    pub fn new(store: Arc<dyn AssetStore>, share_origin: impl Into<String>) -> Self {
        Self {
            store,
            share_origin: share_origin.into(),
            publishing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn share_origin(&self) -> &str {
        &self.share_origin
    }

    pub fn is_publishing(&self) -> bool {
        self.publishing.load(Ordering::Acquire)
    }

    pub async fn fetch(&self, asset_id: &str) -> StoreResult<AssetRecord> {
        self.store.fetch_asset(asset_id).await
    }

    /// Write `transform` for `asset_id`. Returns the payload that was sent.
    pub async fn save(&self, asset_id: &str, transform: &Transform) -> StoreResult<TransformPayload> {
        let payload = transform.to_payload();
        self.store.update_transform(asset_id, &payload).await?;
        log::info!("Saved transform for {}", asset_id);
        Ok(payload)
    }

    /// Make `asset_id` public and build its share link and scan code.
    ///
    /// `already_published` skips the store write. A second call while one
    /// is still running fails with [`PublishError::InFlight`].
    pub async fn publish(&self, asset_id: &str, already_published: bool) -> Result<PublishOutcome, PublishError> {
        let _guard = InFlightGuard::acquire(&self.publishing).ok_or(PublishError::InFlight)?;

        // Validate the link before touching the store
        let url = share_url(&self.share_origin, asset_id)?;

        if already_published {
            log::debug!("{} is already published", asset_id);
            return Ok(PublishOutcome::AlreadyPublished(ScanCode::generate(url)?));
        }

        self.store.set_published(asset_id, true).await?;
        log::info!("Published {} at {}", asset_id, url);

        Ok(PublishOutcome::Published(ScanCode::generate(url)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_backend::{AssetKind, InMemoryStore, StoreError, StoreWrite};
    use ar_math::Vec3;

    fn bridge(store: Arc<InMemoryStore>) -> PersistenceBridge {
        PersistenceBridge::new(store, "https://studio.example.com")
    }

    fn store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_records([AssetRecord::new(
            "a1",
            "https://cdn.example/a1.png",
            AssetKind::ImageTarget,
        )]))
    }

    #[tokio::test]
    async fn test_save_sends_payload() {
        let store = store();
        let t = Transform::new().with_position(Vec3::new(1.0, 2.0, 3.0));

        let payload = bridge(store.clone()).save("a1", &t).await.unwrap();

        assert_eq!(payload, t.to_payload());
        assert_eq!(store.writes(), vec![StoreWrite::Transform { id: "a1".into(), payload }]);
    }

    #[tokio::test]
    async fn test_publish_then_already_published() {
        let store = store();
        let bridge = bridge(store.clone());

        let outcome = bridge.publish("a1", false).await.unwrap();
        assert!(matches!(outcome, PublishOutcome::Published(_)));
        assert_eq!(outcome.share_url(), "https://studio.example.com/ar/a1");
        assert!(store.get("a1").unwrap().published);

        let again = bridge.publish("a1", true).await.unwrap();
        assert!(matches!(again, PublishOutcome::AlreadyPublished(_)));
        assert_eq!(store.writes().len(), 1);
        assert!(!bridge.is_publishing());
    }

    #[tokio::test]
    async fn test_publish_failure_releases_guard() {
        let store = store();
        store.fail_writes_with(StoreError::Transport("offline".into()));
        let bridge = bridge(store.clone());

        let err = bridge.publish("a1", false).await.unwrap_err();
        assert!(matches!(err, PublishError::Store(StoreError::Transport(_))));
        assert!(!bridge.is_publishing());
        assert!(!store.get("a1").unwrap().published);
    }

    #[tokio::test]
    async fn test_bad_origin_never_writes() {
        let store = store();
        let bridge = PersistenceBridge::new(store.clone(), "not a url");

        let err = bridge.publish("a1", false).await.unwrap_err();
        assert!(matches!(err, PublishError::Share(_)));
        assert!(store.writes().is_empty());
    }
}
