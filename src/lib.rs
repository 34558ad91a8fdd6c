//! Dex Navigator - a terminal browser for the Pokémon catalog.
//!
//! The interesting part of this crate is its data-access and view-materialization
//! layer, usable on its own as a library:
//! - a memoizing [`ResultCache`] with single-flight de-duplication of requests,
//! - a fire-and-forget [`Prefetcher`] that warms that cache,
//! - a [`DerivedList`] that filters, sorts and incrementally exposes the catalog.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module. The
//! [`commands`] module holds the list, gallery and detail views used by the binary.

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use crate::core::{
    artwork_url,
    key_from_url,

    // Data access
    Catalog,
    CatalogSession,
    CatalogSource,
    // Data model
    DetailRecord,
    // View materialization
    DerivedList,
    DexConfig,
    // Error handling
    DexNavigatorError,
    GrowTicket,
    IndexEntry,
    KeyParser,
    ListSettings,
    ListWindow,
    Neighbors,
    Prefetcher,
    RemoteCatalogClient,
    Result,
    ResultCache,
    ScrollMetrics,
    SortDirection,
    SortKey,
    Stat,
    ViewState,
    ALL_TYPES,
};
