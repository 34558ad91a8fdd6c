//! Predefined catalog data and config files used across the test suites

#![allow(dead_code)]

use dex_navigator::core::{
    config::DexConfig,
    derived_list::{DerivedList, ListSettings},
    model::{DetailRecord, IndexEntry, Stat},
};
use indexmap::IndexSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// The first nine entries of the catalog with their real types.
pub const STARTERS: [(u32, &str, &[&str]); 9] = [
    (1, "bulbasaur", &["grass", "poison"]),
    (2, "ivysaur", &["grass", "poison"]),
    (3, "venusaur", &["grass", "poison"]),
    (4, "charmander", &["fire"]),
    (5, "charmeleon", &["fire"]),
    (6, "charizard", &["fire", "flying"]),
    (7, "squirtle", &["water"]),
    (8, "wartortle", &["water"]),
    (9, "blastoise", &["water"]),
];

pub fn starter_index() -> Vec<IndexEntry> {
    STARTERS
        .iter()
        .map(|&(key, name, _)| IndexEntry::new(name, key))
        .collect()
}

pub fn starter_records() -> Vec<DetailRecord> {
    STARTERS
        .iter()
        .map(|&(key, name, types)| record(key, name, types))
        .collect()
}

pub fn record(key: u32, name: &str, types: &[&str]) -> DetailRecord {
    DetailRecord {
        key,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        abilities: IndexSet::from(["overgrow".to_string()]),
        stats: vec![
            Stat {
                name: "hp".into(),
                value: 45,
            },
            Stat {
                name: "speed".into(),
                value: 45,
            },
        ],
        height: 7,
        weight: 69,
    }
}

/// Settings with a tiny page so windowing shows up on small fixtures.
pub fn small_pages(page_size: usize) -> ListSettings {
    ListSettings {
        page_size,
        scroll_threshold_px: 300,
        grow_delay: Duration::from_millis(300),
    }
}

pub fn list_from(entries: Vec<IndexEntry>, page_size: usize) -> DerivedList {
    DerivedList::new(Arc::new(entries), small_pages(page_size))
}

/// Write a config file into a fresh temp dir. The dir must outlive the path.
pub fn write_config(config: &DexConfig) -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(config)?)?;
    Ok((dir, path))
}

/// A config pointing at a port nothing listens on, so any request fails fast.
pub fn offline_config() -> DexConfig {
    DexConfig {
        base_url: "http://127.0.0.1:1/api/v2".to_string(),
        request_timeout_secs: 2,
        ..DexConfig::default()
    }
}
