//! Persistent tool configuration.
//!
//! [`DexConfig`] is stored as pretty-printed JSON in the per-user config directory
//! (see [`crate::core::dirs`]) and created with defaults on first run. Every field
//! has a default, so older or hand-edited files with missing keys still load.

use crate::core::derived_list::ListSettings;
use crate::core::dirs::get_config_file;
use crate::core::error::{DexNavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_CATALOG_SIZE: u32 = 1025;
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DexConfig {
    pub base_url: String,
    /// `limit` passed to the index endpoint
    pub index_limit: u32,
    /// Highest key treated as a valid main-catalog entry
    pub max_key: u32,
    pub page_size: usize,
    pub scroll_threshold_px: u32,
    pub grow_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Upper bound on parallel detail fetches when resolving the whole catalog
    pub resolve_concurrency: usize,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_limit: DEFAULT_CATALOG_SIZE,
            max_key: DEFAULT_CATALOG_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold_px: 300,
            grow_delay_ms: 300,
            request_timeout_secs: 30,
            resolve_concurrency: 32,
        }
    }
}

impl DexConfig {
    /// Load the config from the default location, writing defaults if it does not exist
    pub fn load_or_create() -> Result<Self> {
        let config_file = get_config_file()?;
        Self::load_or_create_at(&config_file)
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        log::debug!("No config at {}, writing defaults", path.display());
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DexNavigatorError::config_read_failed(path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DexNavigatorError::config_parse_failed(path, e))?;
        Ok(config.sanitized())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| DexNavigatorError::config_write_failed(dir, e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| DexNavigatorError::config_write_failed(path, e))?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn list_settings(&self) -> ListSettings {
        ListSettings {
            page_size: self.page_size,
            scroll_threshold_px: self.scroll_threshold_px,
            grow_delay: Duration::from_millis(self.grow_delay_ms),
        }
    }

    // Zero page size or concurrency would stall the views.
    fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            log::warn!("page_size of 0 in config, using {DEFAULT_PAGE_SIZE}");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.resolve_concurrency == 0 {
            self.resolve_concurrency = 1;
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}
