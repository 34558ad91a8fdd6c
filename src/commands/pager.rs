//! Scroll emulation and interactive input shared by the list and gallery views.
//!
//! A terminal has no scroll events, so "the user reached the bottom" is produced
//! here: once per extra `--pages` page, or whenever the user asks for more in
//! interactive mode. Either way it goes through the debounced grow transition of
//! [`DerivedList`].

use crate::core::{
    derived_list::{DerivedList, ScrollMetrics},
    output::{print_progress, prompt_line},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerAction {
    More,
    Open(u32),
    ToggleType(String),
    ClearTypes,
    Search(String),
    ToggleOrder,
    Next,
    Previous,
    Quit,
}

/// Parse one line of interactive input.
///
/// - empty: next page
/// - `q`: quit
/// - `25` / `#25`: open detail
/// - `t fire`: toggle a type predicate, `c`: clear predicates
/// - `/char`: search, `/` alone clears the search
/// - `o`: flip sort direction
/// - `n` / `p`: next or previous entry (detail browsing)
pub fn parse_action(input: &str) -> Option<PagerAction> {
    let input = input.trim();
    if input.is_empty() {
        return Some(PagerAction::More);
    }
    if let Some(term) = input.strip_prefix('/') {
        return Some(PagerAction::Search(term.trim().to_string()));
    }
    if let Some(type_name) = input.strip_prefix("t ") {
        let type_name = type_name.trim().to_lowercase();
        return (!type_name.is_empty()).then_some(PagerAction::ToggleType(type_name));
    }
    match input {
        "q" | "quit" => return Some(PagerAction::Quit),
        "c" | "clear" => return Some(PagerAction::ClearTypes),
        "o" | "order" => return Some(PagerAction::ToggleOrder),
        "n" | "next" => return Some(PagerAction::Next),
        "p" | "prev" | "previous" => return Some(PagerAction::Previous),
        _ => {}
    }
    input
        .strip_prefix('#')
        .unwrap_or(input)
        .parse()
        .ok()
        .map(PagerAction::Open)
}

/// Prompt until a recognizable action is entered. EOF quits.
pub fn read_action(prompt: &str) -> PagerAction {
    loop {
        let Some(line) = prompt_line(prompt) else {
            return PagerAction::Quit;
        };
        match parse_action(&line) {
            Some(action) => return action,
            None => print_progress(&format!("Unrecognized input '{line}'")),
        }
    }
}

/// Emulate scrolling to the bottom: start a grow, wait out the debounce, apply it.
pub async fn scroll_to_bottom(list: &mut DerivedList) -> bool {
    let Some(ticket) = list.begin_grow(&ScrollMetrics::at_bottom()) else {
        return false;
    };
    print_progress("Loading more Pokémon...");
    tokio::time::sleep(list.settings().grow_delay).await;
    list.finish_grow(ticket)
}
