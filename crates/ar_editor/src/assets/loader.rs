//! Asset resource loading and load bookkeeping.

use async_trait::async_trait;

use ar_backend::AssetReference;
use ar_math::Vec3;

use crate::error::AssetError;

/// What the editor learned from a fetched resource.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadedAsset {
    /// Decoded image
    Image { width: u32, height: u32 },
    /// 3D model with an axis-aligned bounding box in model space
    Model { min: Vec3, max: Vec3 },
}

impl LoadedAsset {
    /// Render-only scale that fits a model into a 2-unit box.
    ///
    /// `None` for images and degenerate bounds.
    pub fn fit_scale(&self) -> Option<f32> {
        match self {
            LoadedAsset::Image { .. } => None,
            LoadedAsset::Model { min, max } => {
                let largest = (*max - *min).max_element();
                (largest.is_finite() && largest > 0.0).then(|| 2.0 / largest)
            }
        }
    }
}

/// Load state of the selected asset's resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AssetStatus {
    /// Nothing selected
    #[default]
    Idle,
    Loading,
    Ready(LoadedAsset),
    /// Load failed; the message is shown as a non-fatal warning
    Failed(String),
}

impl AssetStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetStatus::Ready(_))
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            AssetStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one load request. A result is applied only if its ticket
/// is still the session's current one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub asset_id: String,
    pub generation: u64,
}

/// Fetches and inspects an asset's resource.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn load(&self, asset: &AssetReference) -> Result<LoadedAsset, AssetError>;
}
