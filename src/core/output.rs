//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, blue for prompts, bright_black for progress
//! - **Standardized spacing**: Newline before and after status messages
//! - **No partial rendering**: views print rows only after their data resolved

use colored::*;
use std::io::{self, BufRead, Write};

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Muted progress line such as "Loading more Pokémon..."
pub fn print_progress(message: &str) {
    println!("{}", message.bright_black());
}

/// Print `prompt` and read one trimmed line. `None` on EOF or read error.
pub fn prompt_line(prompt: &str) -> Option<String> {
    print!("\n{} ", prompt.blue());
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}
