//! REST client for the hosted database and public storage bucket.
//!
//! Rows live in a PostgREST-style table (`/rest/v1/<table>`); asset files
//! live in a public bucket served from `/storage/v1/object/public/<bucket>/`.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use url::Url;

use ar_math::Vec3;

use crate::error::{StoreError, StoreResult};
use crate::record::{AssetKind, AssetRecord, TransformPayload};
use crate::store::AssetStore;

/// Configuration for [`RestStore`].
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL (e.g. "https://xyz.supabase.co")
    pub base_url: String,
    /// Public API key sent with every request
    pub api_key: String,
    /// Signed-in user's access token; falls back to the API key
    pub access_token: Option<String>,
    /// Table holding asset rows
    pub table: String,
    /// Public bucket holding asset files
    pub bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            access_token: None,
            table: "ar_assets".to_string(),
            bucket: "ar-assets".to_string(),
        }
    }
}

impl BackendConfig {
    pub const ENV_URL: &'static str = "AR_BACKEND_URL";
    pub const ENV_KEY: &'static str = "AR_BACKEND_KEY";
    pub const ENV_TOKEN: &'static str = "AR_BACKEND_TOKEN";
    pub const ENV_TABLE: &'static str = "AR_BACKEND_TABLE";
    pub const ENV_BUCKET: &'static str = "AR_BACKEND_BUCKET";

    /// Read configuration from the environment.
    pub fn from_env() -> StoreResult<Self> {
        let base_url = std::env::var(Self::ENV_URL)
            .map_err(|_| StoreError::Config(format!("{} is not set", Self::ENV_URL)))?;
        let api_key = std::env::var(Self::ENV_KEY)
            .map_err(|_| StoreError::Config(format!("{} is not set", Self::ENV_KEY)))?;

        let defaults = Self::default();
        Ok(Self {
            base_url,
            api_key,
            access_token: std::env::var(Self::ENV_TOKEN).ok(),
            table: std::env::var(Self::ENV_TABLE).unwrap_or(defaults.table),
            bucket: std::env::var(Self::ENV_BUCKET).unwrap_or(defaults.bucket),
        })
    }

    fn storage_prefix(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}/",
            self.base_url.trim_end_matches('/'),
            self.bucket
        )
    }

    /// Resolve a stored `target_path` into a public URL.
    ///
    /// Rows may hold a bare object path, a full public URL for this bucket,
    /// or a URL from another host that still contains `<bucket>/...`.
    pub fn public_url(&self, target_path: &str) -> String {
        let prefix = self.storage_prefix();
        let bucket_marker = format!("{}/", self.bucket);

        let object_path = if let Some(rest) = target_path.strip_prefix(&prefix) {
            rest
        } else if target_path.starts_with("https://") || target_path.starts_with("http://") {
            match target_path.find(&bucket_marker) {
                Some(pos) => &target_path[pos + bucket_marker.len()..],
                None => return target_path.to_string(),
            }
        } else {
            target_path.trim_start_matches('/')
        };

        format!("{}{}", prefix, object_path)
    }
}

/// Row shape of the asset table.
#[derive(Debug, Deserialize)]
struct AssetRow {
    id: String,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    target_path: Option<String>,
    project_type: AssetKind,
    #[serde(default)]
    published: Option<bool>,
    #[serde(default)]
    position: Option<Vec3>,
    #[serde(default)]
    rotation: Option<Vec3>,
    #[serde(default)]
    scale: Option<Vec3>,
}

/// [`AssetStore`] backed by the hosted REST API.
pub struct RestStore {
    config: BackendConfig,
    client: Client,
    table_url: Url,
}

impl RestStore {
    pub fn new(config: BackendConfig) -> StoreResult<Self> {
        let base = Url::parse(&config.base_url)?;
        let table_url = base.join(&format!("rest/v1/{}", config.table))?;

        let client = Client::builder()
            .user_agent(concat!("ar_backend/", env!("CARGO_PKG_VERSION")))
            .build()?;

        log::info!("RestStore: using {} (table {})", config.base_url, config.table);

        Ok(Self { config, client, table_url })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn row_url(&self, id: &str) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.config.access_token.as_deref().unwrap_or(&self.config.api_key);
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }

    fn into_record(&self, row: AssetRow) -> StoreResult<AssetRecord> {
        let target_path = row
            .target_path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| StoreError::Malformed(format!("asset {} has no target_path", row.id)))?;

        Ok(AssetRecord {
            resource_url: self.config.public_url(&target_path),
            name: row.project_name.unwrap_or_default(),
            kind: row.project_type,
            published: row.published.unwrap_or(false),
            position: row.position.unwrap_or(Vec3::ZERO),
            rotation: row.rotation.unwrap_or(Vec3::ZERO),
            scale: row.scale.unwrap_or(Vec3::ONE),
            id: row.id,
        })
    }

    async fn patch(&self, id: &str, body: &serde_json::Value) -> StoreResult<()> {
        let response = self
            .authorize(self.client.patch(self.row_url(id)))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status: status.as_u16(), message });
        }

        // An empty representation means the filter matched no visible row
        let rows: Vec<serde_json::Value> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for RestStore {
    async fn fetch_asset(&self, id: &str) -> StoreResult<AssetRecord> {
        let mut url = self.row_url(id);
        url.query_pairs_mut().append_pair(
            "select",
            "id,project_name,target_path,project_type,published,position,rotation,scale",
        );

        log::debug!("RestStore: fetching asset {}", id);

        let response = self
            .authorize(self.client.get(url))
            .header(header::ACCEPT, "application/vnd.pgrst.object+json")
            .send()
            .await?;

        match response.status() {
            // Single-object requests answer 406 when zero rows match
            StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => {
                Err(StoreError::NotFound(id.to_string()))
            }
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                Err(StoreError::Rejected { status: status.as_u16(), message })
            }
            _ => {
                let row: AssetRow = response.json().await?;
                self.into_record(row)
            }
        }
    }

    async fn update_transform(&self, id: &str, payload: &TransformPayload) -> StoreResult<()> {
        let body = serde_json::to_value(payload)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        log::debug!("RestStore: saving transform for {}", id);
        self.patch(id, &body).await
    }

    async fn set_published(&self, id: &str, published: bool) -> StoreResult<()> {
        log::debug!("RestStore: setting published={} for {}", published, id);
        self.patch(id, &serde_json::json!({ "published": published })).await
    }
}
