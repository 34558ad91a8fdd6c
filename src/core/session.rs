//! Centralized setup shared by every view command.
//!
//! [`CatalogSession::initialize`] loads configuration, builds the HTTP client and
//! wraps it in the process-wide [`Catalog`]. Commands receive a ready session
//! instead of repeating that wiring.
//!
//! # Initialization Steps
//! 1. **Configuration**: explicit `--config` path, or the per-user default file
//! 2. **HTTP client**: `reqwest` client with the configured timeout
//! 3. **Catalog**: result cache + prefetcher over the client

use std::path::Path;
use std::sync::Arc;

use crate::core::catalog::Catalog;
use crate::core::client::{CatalogSource, RemoteCatalogClient};
use crate::core::config::DexConfig;
use crate::core::derived_list::{DerivedList, ListSettings};
use crate::core::error::{DexNavigatorError, Result};
use crate::core::key_parser::KeyParser;

#[derive(Clone)]
pub struct CatalogSession {
    pub config: DexConfig,
    pub catalog: Catalog,
}

impl CatalogSession {
    /// Build a session against the remote source described by the config.
    pub fn initialize(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => DexConfig::load_or_create_at(path)?,
            None => DexConfig::load_or_create()?,
        };
        log::debug!("Using catalog source {}", config.base_url);

        let client = RemoteCatalogClient::new(
            config.base_url.clone(),
            config.index_limit,
            config.request_timeout(),
        )?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Build a session over any source, e.g. an in-memory one in tests.
    pub fn with_source(config: DexConfig, source: Arc<dyn CatalogSource>) -> Self {
        let catalog = Catalog::new(source, config.resolve_concurrency);
        Self { config, catalog }
    }

    pub fn list_settings(&self) -> ListSettings {
        self.config.list_settings()
    }

    /// Fetch the index and wrap it in a fresh derived list.
    pub async fn derived_list(&self) -> Result<DerivedList> {
        let index = self.catalog.index().await?;
        if index.is_empty() {
            return Err(DexNavigatorError::EmptyCatalog);
        }
        Ok(DerivedList::new(index, self.list_settings()))
    }

    pub fn parse_key(&self, input: &str) -> Result<u32> {
        KeyParser::parse(input, self.config.max_key)
    }
}
