//! View-facing access to catalog data.
//!
//! [`Catalog`] bundles the [`ResultCache`] and the [`Prefetcher`] behind the handful
//! of operations views need. It is created once per process and cloned freely.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::core::cache::ResultCache;
use crate::core::client::CatalogSource;
use crate::core::error::Result;
use crate::core::model::{DetailRecord, IndexEntry};
use crate::core::prefetch::Prefetcher;

#[derive(Clone)]
pub struct Catalog {
    cache: Arc<ResultCache>,
    prefetcher: Prefetcher,
    resolve_concurrency: usize,
}

impl Catalog {
    pub fn new(source: Arc<dyn CatalogSource>, resolve_concurrency: usize) -> Self {
        let cache = Arc::new(ResultCache::new(source));
        Self {
            prefetcher: Prefetcher::new(Arc::clone(&cache)),
            cache,
            resolve_concurrency: resolve_concurrency.max(1),
        }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub async fn index(&self) -> Result<Arc<Vec<IndexEntry>>> {
        self.cache.index().await
    }

    pub async fn detail(&self, key: u32) -> Result<Arc<DetailRecord>> {
        self.cache.detail(key).await
    }

    pub fn warm(&self, key: u32) {
        self.prefetcher.warm(key);
    }

    pub fn warm_all(&self, keys: impl IntoIterator<Item = u32>) {
        self.prefetcher.warm_all(keys);
    }

    /// Records for `keys`, in the same order. Fails if any fetch fails.
    pub async fn details_for(&self, keys: &[u32]) -> Result<Vec<Arc<DetailRecord>>> {
        stream::iter(keys.iter().copied())
            .map(|key| self.cache.detail(key))
            .buffered(self.resolve_concurrency)
            .try_collect()
            .await
    }

    /// Resolve the records of `keys`, typically the whole index.
    ///
    /// Type predicates cannot be evaluated from the index alone, so this pulls the
    /// whole catalog through the cache. Already-cached keys cost nothing. Completion
    /// order is not preserved.
    pub async fn resolve_all(&self, keys: &[u32]) -> Result<Vec<Arc<DetailRecord>>> {
        let pending = keys
            .iter()
            .filter(|&&key| self.cache.cached_detail(key).is_none())
            .count();
        log::debug!("Resolving {} entries ({pending} not cached yet)", keys.len());

        stream::iter(keys.iter().copied())
            .map(|key| self.cache.detail(key))
            .buffer_unordered(self.resolve_concurrency)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DexNavigatorError;
    use async_trait::async_trait;

    struct StaticSource;

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch_index(&self) -> Result<Vec<IndexEntry>> {
            Ok((1..=3).map(|k| IndexEntry::new(format!("e{k}"), k)).collect())
        }

        async fn fetch_detail(&self, key: u32) -> Result<DetailRecord> {
            if key == 3 {
                return Err(DexNavigatorError::fetch_failed(Some(3), "boom"));
            }
            Ok(DetailRecord {
                key,
                name: format!("e{key}"),
                types: vec!["grass".into()],
                abilities: Default::default(),
                stats: Vec::new(),
                height: 1,
                weight: 1,
            })
        }
    }

    #[tokio::test]
    async fn test_details_for_keeps_order() -> Result<()> {
        let catalog = Catalog::new(Arc::new(StaticSource), 4);
        let records = catalog.details_for(&[2, 1]).await?;
        let keys: Vec<u32> = records.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![2, 1]);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_all_fails_on_any_error() -> Result<()> {
        let catalog = Catalog::new(Arc::new(StaticSource), 2);
        let keys: Vec<u32> = catalog.index().await?.iter().map(|e| e.key).collect();
        let err = catalog.resolve_all(&keys).await.unwrap_err();
        assert!(matches!(err, DexNavigatorError::FetchFailed { key: Some(3), .. }));
        assert!(catalog.cache().cached_detail(3).is_none());
        Ok(())
    }
}
