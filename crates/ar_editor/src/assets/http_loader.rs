//! HTTP resource loader.
//!
//! Fetches the asset's public URL and inspects the bytes: images are
//! decoded for their dimensions, models are parsed as glTF/GLB for their
//! bounds. Results are cached per URL.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};

use ar_backend::{AssetKind, AssetReference};
use ar_math::Vec3;

use super::{AssetLoader, LoadedAsset};
use crate::error::AssetError;

/// [`AssetLoader`] over HTTP(S).
pub struct HttpAssetLoader {
    client: Client,
    cache: RwLock<HashMap<String, LoadedAsset>>,
}

impl HttpAssetLoader {
    pub fn new() -> Result<Self, AssetError> {
        let client = Client::builder()
            .user_agent(concat!("ar_editor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn cached(&self, url: &str) -> Option<LoadedAsset> {
        self.cache.read().get(url).copied()
    }

    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(AssetError::NotFound(url.to_string())),
            status if !status.is_success() => Err(AssetError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response.bytes().await?.to_vec()),
        }
    }
}

/// Inspect resource bytes according to the asset kind.
pub fn inspect_bytes(kind: AssetKind, bytes: &[u8]) -> Result<LoadedAsset, AssetError> {
    if kind.is_image() {
        let image = image::load_from_memory(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
        return Ok(LoadedAsset::Image {
            width: image.width(),
            height: image.height(),
        });
    }

    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;

    let mut bounds: Option<(Vec3, Vec3)> = None;
    for mesh in gltf.meshes() {
        for primitive in mesh.primitives() {
            let bb = primitive.bounding_box();
            let (min, max) = (Vec3::from_array(bb.min), Vec3::from_array(bb.max));
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(min), hi.max(max)),
                None => (min, max),
            });
        }
    }

    let (min, max) = bounds.ok_or_else(|| AssetError::Decode("model contains no meshes".to_string()))?;
    Ok(LoadedAsset::Model { min, max })
}

#[async_trait]
impl AssetLoader for HttpAssetLoader {
    async fn load(&self, asset: &AssetReference) -> Result<LoadedAsset, AssetError> {
        if let Some(loaded) = self.cached(&asset.resource_url) {
            log::debug!("Asset cache hit: {}", asset.resource_url);
            return Ok(loaded);
        }

        log::info!("Loading {} ({})", asset.resource_url, asset.kind);
        let bytes = self.fetch(&asset.resource_url).await?;
        let loaded = inspect_bytes(asset.kind, &bytes)?;

        self.cache.write().insert(asset.resource_url.clone(), loaded);
        Ok(loaded)
    }
}
