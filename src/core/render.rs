//! Row and detail formatting for the three views.
//!
//! # Public API
//! - [`type_color_style`]: Color function for a type tag
//! - [`format_list_row`] / [`format_gallery_row`]: One line per catalog entry
//! - [`render_detail`]: Full detail page as lines
//! - [`stat_bar`]: Base stat bar scaled to the 0-255 range
//!
//! Every function returns strings instead of printing so views decide when to emit.

use colored::*;

use crate::core::client::artwork_url;
use crate::core::derived_list::Neighbors;
use crate::core::model::{DetailRecord, IndexEntry};

pub const STAT_BAR_WIDTH: usize = 30;
const MAX_STAT: usize = 255;

/// Single color mapping for all type tags
pub fn type_color_style(type_name: &str) -> Box<dyn Fn(&str) -> ColoredString> {
    match type_name {
        "fire" => Box::new(|text: &str| text.red()),
        "water" | "ice" => Box::new(|text: &str| text.blue()),
        "grass" | "bug" => Box::new(|text: &str| text.green()),
        "electric" => Box::new(|text: &str| text.yellow()),
        "psychic" | "fairy" => Box::new(|text: &str| text.magenta()),
        "poison" | "ghost" => Box::new(|text: &str| text.purple()),
        "dragon" => Box::new(|text: &str| text.bright_blue().bold()),
        "fighting" | "rock" | "ground" => Box::new(|text: &str| text.bright_red()),
        "flying" => Box::new(|text: &str| text.cyan()),
        "dark" | "steel" => Box::new(|text: &str| text.bright_black()),
        _ => Box::new(|text: &str| text.white()),
    }
}

pub fn type_tag(type_name: &str) -> ColoredString {
    type_color_style(type_name)(type_name)
}

/// `bulbasaur` -> `Bulbasaur`
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_list_row(entry: &IndexEntry, with_artwork: bool) -> String {
    let index = format!("#{}", entry.key).cyan().bold();
    if with_artwork {
        format!(
            "   {index} {}  {}",
            entry.name,
            artwork_url(entry.key).bright_black()
        )
    } else {
        format!("   {index} {}", entry.name)
    }
}

pub fn format_gallery_row(entry: &IndexEntry, record: &DetailRecord) -> String {
    let tags: Vec<String> = record.types.iter().map(|t| type_tag(t).to_string()).collect();
    format!(
        "   {} {:<14} {}",
        format!("#{}", entry.key).cyan().bold(),
        entry.name,
        tags.join(" ")
    )
}

/// Number of filled cells for `value` in a bar of `width` cells.
pub fn stat_fill(value: u8, width: usize) -> usize {
    (usize::from(value) * width + MAX_STAT / 2) / MAX_STAT
}

pub fn stat_bar(value: u8) -> String {
    let filled = stat_fill(value, STAT_BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(STAT_BAR_WIDTH - filled).bright_black()
    )
}

pub fn render_detail(record: &DetailRecord, neighbors: Neighbors) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}",
        format!("#{}", record.key).cyan().bold(),
        capitalize(&record.name).bold()
    ));
    lines.push(format!("   Artwork:   {}", artwork_url(record.key).bright_black()));
    lines.push(format!("   Height:    {} m", record.height_m()));
    lines.push(format!("   Weight:    {} kg", record.weight_kg()));

    let types: Vec<String> = record.types.iter().map(|t| type_tag(t).to_string()).collect();
    lines.push(format!("   Types:     {}", types.join(", ")));

    let abilities: Vec<&str> = record.abilities.iter().map(String::as_str).collect();
    lines.push(format!("   Abilities: {}", abilities.join(", ")));

    lines.push(String::new());
    lines.push("   Base Stats:".to_string());
    let name_width = record
        .stats
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);
    for stat in &record.stats {
        lines.push(format!(
            "     {:<width$} {:>3} {}",
            stat.name,
            stat.value,
            stat_bar(stat.value),
            width = name_width
        ));
    }

    lines.push(String::new());
    let prev = neighbors
        .prev
        .map_or_else(|| "-".to_string(), |k| format!("#{k}"));
    let next = neighbors
        .next
        .map_or_else(|| "-".to_string(), |k| format!("#{k}"));
    lines.push(format!(
        "   {} {}    {} {}",
        "← Previous:".bright_black(),
        prev,
        "Next →:".bright_black(),
        next
    ));

    lines
}
