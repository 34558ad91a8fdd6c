//! Core functionality for the dex-navigator tool.
//!
//! This module provides the data-access layer (remote client, result cache,
//! prefetcher), the derived-list engine that views render from, and the ambient
//! pieces around them: errors, configuration and output formatting.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod derived_list;
pub mod dirs;
pub mod error;
pub mod key_parser;
pub mod model;
pub mod output;
pub mod prefetch;
pub mod render;
pub mod session;
pub mod state;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{DexNavigatorError, Result};

// === Data model ===
pub use model::{DetailRecord, IndexEntry, Stat, ALL_TYPES};

// === Data access ===
// Remote source, single-flight cache and background warming
pub use cache::ResultCache;
pub use catalog::Catalog;
pub use client::{artwork_url, key_from_url, CatalogSource, RemoteCatalogClient};
pub use prefetch::Prefetcher;

// === View materialization ===
// Filter/sort/window pipeline and the per-view state it owns
pub use derived_list::{DerivedList, GrowTicket, ListSettings, ListWindow, Neighbors, ScrollMetrics};
pub use state::{SortDirection, SortKey, ViewState};

// === Configuration and setup ===
pub use config::DexConfig;
pub use key_parser::KeyParser;
pub use session::CatalogSession;

// === Output formatting ===
pub use output::{print_error, print_info, print_progress, print_section_header, prompt_line};
