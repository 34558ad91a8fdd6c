//! HTTP access to the remote catalog.
//!
//! [`CatalogSource`] is the seam between the cache and the network: the cache only
//! ever talks to this trait, so tests substitute an in-memory source.
//! [`RemoteCatalogClient`] is the production implementation. It performs exactly one
//! request per call and does no retrying or caching of its own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::error::{DexNavigatorError, Result};
use crate::core::model::{decode_detail, decode_index, DetailRecord, IndexEntry};

const ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Source of index and detail data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog index.
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>>;

    /// Fetch one detail record.
    async fn fetch_detail(&self, key: u32) -> Result<DetailRecord>;
}

#[derive(Debug, Clone)]
pub struct RemoteCatalogClient {
    client: Client,
    base_url: String,
    index_limit: u32,
}

impl RemoteCatalogClient {
    pub fn new(base_url: impl Into<String>, index_limit: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DexNavigatorError::http_client_build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            index_limit,
        })
    }

    pub fn index_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base_url, self.index_limit)
    }

    pub fn detail_url(&self, key: u32) -> String {
        format!("{}/pokemon/{key}", self.base_url)
    }

    /// GET `url` and return the body bytes, mapping transport and status errors.
    async fn get_bytes(&self, url: &str, key: Option<u32>) -> Result<Vec<u8>> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DexNavigatorError::fetch_failed(key, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DexNavigatorError::fetch_failed(key, format!("status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DexNavigatorError::fetch_failed(key, e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalogClient {
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>> {
        let body = self.get_bytes(&self.index_url(), None).await?;
        let raw = decode_index(&body)?;

        let mut entries = Vec::with_capacity(raw.results.len());
        for row in raw.results {
            let key = key_from_url(&row.url);
            if key == 0 {
                log::warn!("Dropping index row '{}' with unusable url '{}'", row.name, row.url);
                continue;
            }
            entries.push(IndexEntry::new(row.name, key));
        }

        log::debug!("Fetched index with {} entries", entries.len());
        Ok(entries)
    }

    async fn fetch_detail(&self, key: u32) -> Result<DetailRecord> {
        let body = self.get_bytes(&self.detail_url(key), Some(key)).await?;
        decode_detail(&body, key)
    }
}

/// Extract the key from a resource URL such as `.../pokemon/25/`.
///
/// Returns 0 when the last path segment is not a number.
pub fn key_from_url(url: &str) -> u32 {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(0)
}

/// Official artwork location for a key. No network validation is performed.
pub fn artwork_url(key: u32) -> String {
    format!("{ARTWORK_BASE_URL}/{key}.png")
}
