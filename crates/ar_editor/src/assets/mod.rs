//! Fetching and inspecting asset resources.

mod loader;
mod http_loader;

pub use loader::{AssetLoader, AssetStatus, LoadTicket, LoadedAsset};
pub use http_loader::{inspect_bytes, HttpAssetLoader};
