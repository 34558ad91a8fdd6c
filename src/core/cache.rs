//! Memoizing, single-flight cache in front of a [`CatalogSource`].
//!
//! The cache owns the catalog index slot and the `key -> DetailRecord` map for the
//! lifetime of the process. Nothing is ever evicted: the remote catalog is treated
//! as immutable for the session.
//!
//! Each slot is either `Ready` or `Pending`. A pending slot holds a
//! [`Shared`](futures::future::Shared) fetch future, so every concurrent caller for
//! the same key awaits the same underlying request. The fetch runs as its own Tokio
//! task, so it completes even when every caller stops waiting, and it publishes its
//! outcome itself: on success it swaps the slot to `Ready`, on failure it removes the
//! slot so the next request goes back to the network. Callers already waiting on a
//! failed flight all receive the same error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::runtime::Handle;
use tokio::task::JoinError;

use crate::core::client::CatalogSource;
use crate::core::error::{DexNavigatorError, Result};
use crate::core::model::{DetailRecord, IndexEntry};

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>>>>;

enum Slot<T> {
    Ready(Arc<T>),
    Pending(SharedFetch<T>),
}

type IndexSlot = Arc<Mutex<Option<Slot<Vec<IndexEntry>>>>>;
type DetailSlots = Arc<Mutex<HashMap<u32, Slot<DetailRecord>>>>;

pub struct ResultCache {
    source: Arc<dyn CatalogSource>,
    index: IndexSlot,
    details: DetailSlots,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Slots are only ever swapped whole, so a poisoned map is still consistent.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Spawn `fetch` on the current runtime and share its result.
///
/// `on_abort` runs if the task panics or is cancelled before publishing. Without a
/// runtime the fetch is only driven by its callers.
fn launch<T>(
    fetch: BoxFuture<'static, Result<Arc<T>>>,
    on_abort: impl FnOnce(JoinError) -> DexNavigatorError + Send + 'static,
) -> SharedFetch<T>
where
    T: Send + Sync + 'static,
{
    let Ok(handle) = Handle::try_current() else {
        return fetch.shared();
    };

    let task = handle.spawn(fetch);
    async move { task.await.unwrap_or_else(|e| Err(on_abort(e))) }
        .boxed()
        .shared()
}

impl ResultCache {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            index: Arc::new(Mutex::new(None)),
            details: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The full catalog index, fetched at most once while it keeps succeeding.
    pub async fn index(&self) -> Result<Arc<Vec<IndexEntry>>> {
        let flight = {
            let mut slot = lock(&self.index);
            match slot.as_ref() {
                Some(Slot::Ready(entries)) => return Ok(Arc::clone(entries)),
                Some(Slot::Pending(flight)) => {
                    log::debug!("Joining in-flight index fetch");
                    flight.clone()
                }
                None => {
                    log::debug!("Index miss, fetching");
                    let flight = self.index_flight();
                    *slot = Some(Slot::Pending(flight.clone()));
                    flight
                }
            }
        };
        flight.await
    }

    /// One detail record, fetched at most once per key while it keeps succeeding.
    pub async fn detail(&self, key: u32) -> Result<Arc<DetailRecord>> {
        let flight = {
            let mut details = lock(&self.details);
            match details.get(&key) {
                Some(Slot::Ready(record)) => return Ok(Arc::clone(record)),
                Some(Slot::Pending(flight)) => {
                    log::debug!("Joining in-flight fetch for #{key}");
                    flight.clone()
                }
                None => {
                    log::debug!("Cache miss for #{key}, fetching");
                    let flight = self.detail_flight(key);
                    details.insert(key, Slot::Pending(flight.clone()));
                    flight
                }
            }
        };
        flight.await
    }

    /// Resolved record for `key`, without fetching.
    pub fn cached_detail(&self, key: u32) -> Option<Arc<DetailRecord>> {
        match lock(&self.details).get(&key) {
            Some(Slot::Ready(record)) => Some(Arc::clone(record)),
            _ => None,
        }
    }

    /// True when `key` is resolved or currently being fetched.
    pub fn is_known(&self, key: u32) -> bool {
        lock(&self.details).contains_key(&key)
    }

    pub fn has_index(&self) -> bool {
        matches!(lock(&self.index).as_ref(), Some(Slot::Ready(_)))
    }

    /// Number of resolved detail records.
    pub fn len(&self) -> usize {
        lock(&self.details)
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn index_flight(&self) -> SharedFetch<Vec<IndexEntry>> {
        let source = Arc::clone(&self.source);
        let slot = Arc::clone(&self.index);

        let fetch = async move {
            let outcome = source.fetch_index().await.map(Arc::new);
            {
                let mut slot = lock(&slot);
                match &outcome {
                    Ok(entries) => *slot = Some(Slot::Ready(Arc::clone(entries))),
                    Err(e) => {
                        log::warn!("Index fetch failed: {e}");
                        *slot = None;
                    }
                }
            }
            outcome
        }
        .boxed();

        let slot = Arc::clone(&self.index);
        launch(fetch, move |e| {
            *lock(&slot) = None;
            DexNavigatorError::fetch_failed(None, format!("fetch task aborted: {e}"))
        })
    }

    fn detail_flight(&self, key: u32) -> SharedFetch<DetailRecord> {
        let source = Arc::clone(&self.source);
        let details = Arc::clone(&self.details);

        let fetch = async move {
            let outcome = source.fetch_detail(key).await.map(Arc::new);
            {
                let mut details = lock(&details);
                match &outcome {
                    Ok(record) => {
                        details.insert(key, Slot::Ready(Arc::clone(record)));
                    }
                    Err(e) => {
                        log::warn!("Fetch for #{key} failed: {e}");
                        details.remove(&key);
                    }
                }
            }
            outcome
        }
        .boxed();

        let details = Arc::clone(&self.details);
        launch(fetch, move |e| {
            lock(&details).remove(&key);
            DexNavigatorError::fetch_failed(Some(key), format!("fetch task aborted: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DexNavigatorError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        index_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn fetch_index(&self) -> Result<Vec<IndexEntry>> {
            self.index_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(vec![IndexEntry::new("bulbasaur", 1)])
        }

        async fn fetch_detail(&self, key: u32) -> Result<DetailRecord> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if key == 0 {
                return Err(DexNavigatorError::fetch_failed(Some(key), "status 404 Not Found"));
            }
            Ok(DetailRecord {
                key,
                name: format!("entry-{key}"),
                types: vec!["normal".into()],
                abilities: Default::default(),
                stats: Vec::new(),
                height: 1,
                weight: 1,
            })
        }
    }

    #[tokio::test]
    async fn test_detail_is_memoized() -> Result<()> {
        let source = Arc::new(CountingSource::default());
        let cache = ResultCache::new(source.clone());

        let first = cache.detail(7).await?;
        let second = cache.detail(7).await?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() -> Result<()> {
        let source = Arc::new(CountingSource::default());
        let cache = ResultCache::new(source.clone());

        let (a, b, c) = tokio::join!(cache.detail(3), cache.detail(3), cache.detail(3));
        assert_eq!(a?.key, 3);
        assert_eq!(b?.key, 3);
        assert_eq!(c?.key, 3);
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_index_fetched_once() -> Result<()> {
        let source = Arc::new(CountingSource::default());
        let cache = ResultCache::new(source.clone());

        let (a, b) = tokio::join!(cache.index(), cache.index());
        assert_eq!(a?.len(), 1);
        assert_eq!(b?.len(), 1);
        cache.index().await?;
        assert_eq!(source.index_calls.load(Ordering::SeqCst), 1);
        assert!(cache.has_index());
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(CountingSource::default());
        let cache = ResultCache::new(source.clone());

        assert!(cache.detail(0).await.is_err());
        assert!(!cache.is_known(0));
        assert!(cache.detail(0).await.is_err());
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_fetch_still_completes() {
        let source = Arc::new(CountingSource::default());
        let cache = ResultCache::new(source.clone());

        // Poll once so the flight is registered, then walk away.
        let mut abandoned = Box::pin(cache.detail(9));
        assert!(futures::poll!(&mut abandoned).is_pending());
        drop(abandoned);
        assert!(cache.is_known(9));

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(cache.cached_detail(9).is_some());
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
    }
}
