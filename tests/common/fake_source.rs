//! In-memory catalog source that counts and optionally delays requests

#![allow(dead_code)]

use async_trait::async_trait;
use dex_navigator::core::{
    client::CatalogSource,
    error::{DexNavigatorError, Result},
    model::{DetailRecord, IndexEntry},
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::fixtures::{starter_index, starter_records};

#[derive(Default)]
pub struct FakeSource {
    index: Vec<IndexEntry>,
    records: HashMap<u32, DetailRecord>,
    delay: Option<Duration>,
    failing: Mutex<HashSet<u32>>,
    index_calls: AtomicUsize,
    detail_calls: Mutex<HashMap<u32, usize>>,
}

impl FakeSource {
    pub fn starters() -> Self {
        Self {
            index: starter_index(),
            records: starter_records().into_iter().map(|r| (r.key, r)).collect(),
            ..Self::default()
        }
    }

    /// Every request sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_key(&self, key: u32) {
        self.failing.lock().unwrap().insert(key);
    }

    pub fn heal_key(&self, key: u32) {
        self.failing.lock().unwrap().remove(&key);
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self, key: u32) -> usize {
        self.detail_calls
            .lock()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_detail_calls(&self) -> usize {
        self.detail_calls.lock().unwrap().values().sum()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        Ok(self.index.clone())
    }

    async fn fetch_detail(&self, key: u32) -> Result<DetailRecord> {
        *self.detail_calls.lock().unwrap().entry(key).or_default() += 1;
        self.pause().await;

        if self.failing.lock().unwrap().contains(&key) {
            return Err(DexNavigatorError::fetch_failed(
                Some(key),
                "status 500 Internal Server Error",
            ));
        }
        self.records
            .get(&key)
            .cloned()
            .ok_or_else(|| DexNavigatorError::fetch_failed(Some(key), "status 404 Not Found"))
    }
}
