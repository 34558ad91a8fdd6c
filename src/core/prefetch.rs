//! Fire-and-forget cache warming.
//!
//! [`Prefetcher::warm`] returns immediately; the fetch runs as a detached Tokio task
//! and its outcome is dropped. Prefetches are never cancelled. A warm for a key the
//! user has since scrolled away from still just fills an immutable cache entry.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::core::cache::ResultCache;

#[derive(Clone)]
pub struct Prefetcher {
    cache: Arc<ResultCache>,
}

impl Prefetcher {
    pub fn new(cache: Arc<ResultCache>) -> Self {
        Self { cache }
    }

    /// Start resolving `key` in the background unless it is cached or in flight.
    pub fn warm(&self, key: u32) {
        if self.cache.is_known(key) {
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            log::debug!("No async runtime available, skipping prefetch of #{key}");
            return;
        };

        let cache = Arc::clone(&self.cache);
        handle.spawn(async move {
            if let Err(e) = cache.detail(key).await {
                log::debug!("Prefetch of #{key} failed: {e}");
            }
        });
    }

    pub fn warm_all(&self, keys: impl IntoIterator<Item = u32>) {
        for key in keys {
            self.warm(key);
        }
    }
}
