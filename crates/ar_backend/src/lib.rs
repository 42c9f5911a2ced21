//! # ar_backend
//!
//! External collaborators for the AR scene editor.
//!
//! The editor never talks to a database or storage bucket directly. It is
//! handed an [`AssetStore`] at construction and reads/writes asset records
//! through it:
//!
//! - [`InMemoryStore`]: process-local store, used by tests and offline demos
//! - [`RestStore`]: hosted database REST endpoint plus public storage URLs
//!
//! [`share`] builds the public viewer link for a published asset and the
//! scannable code that encodes it.

pub mod error;
pub mod record;
pub mod store;
pub mod memory;
pub mod rest;
pub mod share;

pub use error::{StoreError, StoreResult, ShareError};
pub use record::{AssetKind, AssetRecord, AssetReference, TransformPayload};
pub use store::AssetStore;
pub use memory::{InMemoryStore, StoreWrite};
pub use rest::{BackendConfig, RestStore};
pub use share::{share_url, ScanCode};
