//! Integration tests for ar_backend

use ar_backend::*;
use ar_math::Vec3;
use std::sync::Arc;
use std::time::Duration;

fn poster() -> AssetRecord {
    AssetRecord::new("poster", "https://cdn.example/poster.png", AssetKind::ImageTarget)
        .with_name("Poster")
}

#[tokio::test]
async fn test_fetch_known_and_unknown() {
    let store = InMemoryStore::with_records([poster()]);

    let record = store.fetch_asset("poster").await.expect("record exists");
    assert_eq!(record.name, "Poster");
    assert_eq!(record.reference().kind, AssetKind::ImageTarget);

    let missing = store.fetch_asset("nope").await;
    assert_eq!(missing, Err(StoreError::NotFound("nope".to_string())));
}

#[tokio::test]
async fn test_update_transform_is_recorded() {
    let store = InMemoryStore::with_records([poster()]);
    let payload = TransformPayload {
        position: Vec3::new(0.5, 0.0, -1.0),
        rotation: Vec3::new(0.0, 1.0, 0.0),
        scale: Vec3::splat(2.0),
    };

    store.update_transform("poster", &payload).await.unwrap();

    assert_eq!(store.get("poster").unwrap().transform_payload(), payload);
    assert_eq!(
        store.writes(),
        vec![StoreWrite::Transform { id: "poster".to_string(), payload }]
    );
}

#[tokio::test]
async fn test_injected_failure_leaves_record_untouched() {
    let store = InMemoryStore::with_records([poster()]);
    store.fail_writes_with(StoreError::Rejected { status: 403, message: "denied".into() });

    let payload = TransformPayload {
        position: Vec3::ONE,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };
    let err = store.update_transform("poster", &payload).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 403, .. }));
    assert_eq!(store.get("poster").unwrap().position, Vec3::ZERO);
    assert!(store.writes().is_empty());

    store.clear_failure();
    store.set_published("poster", true).await.unwrap();
    assert!(store.get("poster").unwrap().published);
}

#[tokio::test]
async fn test_store_usable_as_trait_object() {
    let store: Arc<dyn AssetStore> = Arc::new(InMemoryStore::with_records([poster()]));
    assert!(store.fetch_asset("poster").await.is_ok());
    assert!(matches!(
        store.set_published("ghost", true).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_applied() {
    let store = InMemoryStore::with_records([poster()]);
    store.set_latency(Some(Duration::from_millis(200)));

    let start = tokio::time::Instant::now();
    store.fetch_asset("poster").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[test]
fn test_share_link_and_code() {
    let url = share_url("https://studio.example.com/dashboard", "poster").unwrap();
    assert_eq!(url.path(), "/ar/poster");

    let code = ScanCode::generate(url.clone()).unwrap();
    assert_eq!(code.url, url);
    assert!(!code.png.is_empty());
}

#[test]
fn test_config_public_url() {
    let config = BackendConfig {
        base_url: "https://proj.example.co/".to_string(),
        ..Default::default()
    };
    assert_eq!(
        config.public_url("/u/model.glb"),
        "https://proj.example.co/storage/v1/object/public/ar-assets/u/model.glb"
    );
}
