//! Per-view presentation state.
//!
//! # Public API
//! - [`ViewState`]: Active predicates, search term, ordering and window size of one view
//! - [`SortKey`]: Order by name or by catalog key
//! - [`SortDirection`]: Ascending or descending
//!
//! A `ViewState` is owned by exactly one view and never shared. It is only mutated
//! through [`crate::core::derived_list::DerivedList`], which enforces the reset rules.

use clap::ValueEnum;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Case-insensitive name order
    #[value(name = "name")]
    ByName,
    /// Numeric catalog order
    #[default]
    #[value(name = "key", alias = "id")]
    ByKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortDirection {
    #[default]
    #[value(name = "asc")]
    Ascending,
    #[value(name = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName => write!(f, "name"),
            Self::ByKey => write!(f, "key"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "↑ ascending"),
            Self::Descending => write!(f, "↓ descending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub predicates: BTreeSet<String>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub visible_count: usize,
    pub search_term: String,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            predicates: BTreeSet::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            visible_count: page_size,
            search_term: String::new(),
        }
    }
}
