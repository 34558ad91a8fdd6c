//! Filtered, ordered and windowed projection of the catalog index.
//!
//! [`DerivedList`] turns the full index plus a [`ViewState`] into the key sequence a
//! view renders. The filtered sequence is always a subsequence of the index in index
//! order before sorting, and sorting is stable, so ties keep index order.
//!
//! # Windowing
//! Only a prefix of the sequence is exposed ([`ListWindow`]). Growing it is an
//! explicit transition that any event source can drive:
//!
//! 1. [`DerivedList::begin_grow`] with the current [`ScrollMetrics`]. It yields a
//!    [`GrowTicket`] only near the bottom, with no grow pending and more to show.
//! 2. The caller waits [`ListSettings::grow_delay`].
//! 3. [`DerivedList::finish_grow`] applies one page.
//!
//! Changing the search term or predicates resets the window to one page and
//! invalidates outstanding tickets.
//!
//! # Predicates
//! Type predicates need every entry's detail record. Records are supplied with
//! [`DerivedList::attach_details`]. Until an entry's record is attached it fails
//! every active predicate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::DEFAULT_PAGE_SIZE;
use crate::core::model::{DetailRecord, IndexEntry};
use crate::core::state::{SortDirection, SortKey, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSettings {
    pub page_size: usize,
    /// Distance from the document bottom that counts as "near the bottom"
    pub scroll_threshold_px: u32,
    pub grow_delay: Duration,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold_px: 300,
            grow_delay: Duration::from_millis(300),
        }
    }
}

/// Viewport geometry reported by whatever is doing the scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_top: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// A viewport scrolled all the way down.
    pub fn at_bottom() -> Self {
        Self {
            viewport_height: 0.0,
            scroll_top: 0.0,
            document_height: 0.0,
        }
    }

    pub fn near_bottom(&self, threshold_px: u32) -> bool {
        self.viewport_height + self.scroll_top >= self.document_height - f64::from(threshold_px)
    }
}

/// Proof that a grow was started; redeem with [`DerivedList::finish_grow`].
#[derive(Debug)]
#[must_use = "a started grow stays pending until the ticket is finished"]
pub struct GrowTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWindow {
    pub visible_keys: Vec<u32>,
    pub has_more: bool,
    /// Length of the full filtered sequence
    pub total: usize,
}

impl ListWindow {
    /// Nothing matched the current filters.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

pub struct DerivedList {
    entries: Arc<Vec<IndexEntry>>,
    lowercase_names: Vec<String>,
    types: HashMap<u32, Vec<String>>,
    settings: ListSettings,
    state: ViewState,
    /// Positions into `entries`, filtered and sorted
    filtered: Vec<usize>,
    growing: bool,
    generation: u64,
}

impl DerivedList {
    pub fn new(entries: Arc<Vec<IndexEntry>>, settings: ListSettings) -> Self {
        let lowercase_names = entries.iter().map(|e| e.name.to_lowercase()).collect();
        let mut list = Self {
            entries,
            lowercase_names,
            types: HashMap::new(),
            settings,
            state: ViewState::new(settings.page_size),
            filtered: Vec::new(),
            growing: false,
            generation: 0,
        };
        list.recompute();
        list
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.state.search_term {
            return;
        }
        self.state.search_term = term;
        self.reset_window();
        self.recompute();
    }

    /// Add `predicate` if absent, remove it otherwise.
    pub fn toggle_predicate(&mut self, predicate: &str) {
        if !self.state.predicates.remove(predicate) {
            self.state.predicates.insert(predicate.to_string());
        }
        self.reset_window();
        self.recompute();
    }

    pub fn clear_predicates(&mut self) {
        self.state.predicates.clear();
        self.reset_window();
        self.recompute();
    }

    /// Reorder without touching the window size.
    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        if key == self.state.sort_key && direction == self.state.sort_direction {
            return;
        }
        self.state.sort_key = key;
        self.state.sort_direction = direction;
        self.recompute();
    }

    /// Record resolved detail records so type predicates can be evaluated.
    pub fn attach_details<'a>(&mut self, records: impl IntoIterator<Item = &'a DetailRecord>) {
        for record in records {
            self.types.insert(record.key, record.types.clone());
        }
        if !self.state.predicates.is_empty() {
            self.recompute();
        }
    }

    /// Keys whose records must be resolved before the active predicates can apply.
    pub fn unresolved_keys(&self) -> Vec<u32> {
        if self.state.predicates.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|e| e.key)
            .filter(|key| !self.types.contains_key(key))
            .collect()
    }

    pub fn filtered_keys(&self) -> Vec<u32> {
        self.filtered.iter().map(|&i| self.entries[i].key).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn window(&self) -> ListWindow {
        let shown = self.state.visible_count.min(self.filtered.len());
        ListWindow {
            visible_keys: self.filtered[..shown]
                .iter()
                .map(|&i| self.entries[i].key)
                .collect(),
            has_more: self.has_more(),
            total: self.filtered.len(),
        }
    }

    /// Entries of the current window, in display order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &IndexEntry> + '_ {
        let shown = self.state.visible_count.min(self.filtered.len());
        self.filtered[..shown].iter().map(|&i| &self.entries[i])
    }

    /// Up to `count` keys right after the window, i.e. the next page to be revealed.
    pub fn upcoming_keys(&self, count: usize) -> Vec<u32> {
        let start = self.state.visible_count.min(self.filtered.len());
        let end = start.saturating_add(count).min(self.filtered.len());
        self.filtered[start..end]
            .iter()
            .map(|&i| self.entries[i].key)
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.state.visible_count < self.filtered.len()
    }

    /// Expose one more page. No-op once the whole sequence is visible.
    pub fn grow(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.state.visible_count += self.settings.page_size;
        true
    }

    pub fn begin_grow(&mut self, metrics: &ScrollMetrics) -> Option<GrowTicket> {
        if self.growing
            || !self.has_more()
            || !metrics.near_bottom(self.settings.scroll_threshold_px)
        {
            return None;
        }
        self.growing = true;
        Some(GrowTicket {
            generation: self.generation,
        })
    }

    /// Apply a grow started by [`Self::begin_grow`]. Tickets from before a reset are void.
    pub fn finish_grow(&mut self, ticket: GrowTicket) -> bool {
        if ticket.generation != self.generation {
            log::debug!("Discarding grow ticket from a previous filter state");
            return false;
        }
        self.growing = false;
        self.grow()
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Adjacent keys of `key` in the filtered order.
    pub fn neighbors(&self, key: u32) -> Neighbors {
        let Some(pos) = self.filtered.iter().position(|&i| self.entries[i].key == key) else {
            return Neighbors::default();
        };
        Neighbors {
            prev: pos
                .checked_sub(1)
                .map(|p| self.entries[self.filtered[p]].key),
            next: self.filtered.get(pos + 1).map(|&i| self.entries[i].key),
        }
    }

    fn reset_window(&mut self) {
        self.state.visible_count = self.settings.page_size;
        self.growing = false;
        self.generation += 1;
    }

    fn recompute(&mut self) {
        let term = self.state.search_term.as_str();
        let lowered_term = term.to_lowercase();

        let mut filtered: Vec<usize> = (0..self.entries.len())
            .filter(|&i| {
                let entry = &self.entries[i];
                entry.key != 0
                    && (term.is_empty()
                        || self.lowercase_names[i].contains(&lowered_term)
                        || entry.key.to_string().contains(term))
                    && self.passes_predicates(entry.key)
            })
            .collect();

        let entries = &self.entries;
        let names = &self.lowercase_names;
        let sort_key = self.state.sort_key;
        let direction = self.state.sort_direction;
        filtered.sort_by(|&a, &b| {
            let order = match sort_key {
                SortKey::ByName => names[a].cmp(&names[b]),
                SortKey::ByKey => entries[a].key.cmp(&entries[b].key),
            };
            match direction {
                SortDirection::Ascending => order,
                SortDirection::Descending => order.reverse(),
            }
        });

        log::debug!(
            "Derived list: {} of {} entries pass (search '{}', {} predicate(s))",
            filtered.len(),
            self.entries.len(),
            term,
            self.state.predicates.len()
        );
        self.filtered = filtered;
    }

    fn passes_predicates(&self, key: u32) -> bool {
        if self.state.predicates.is_empty() {
            return true;
        }
        let Some(types) = self.types.get(&key) else {
            return false;
        };
        self.state
            .predicates
            .iter()
            .all(|p| types.iter().any(|t| t == p))
    }
}
