//! Parsing and validation of user-supplied catalog keys.
//!
//! The detail view accepts keys like `25` or `#25`. Everything that is not a
//! positive number within `1..=max_key` is rejected here, before any network call.
//!
//! # Public API
//! - [`KeyParser`]: Static helpers for parsing and range validation

use crate::core::error::{DexNavigatorError, Result};

pub struct KeyParser;

impl KeyParser {
    /// Parse `input` into a key within `1..=max_key`.
    ///
    /// # Examples
    /// ```
    /// use dex_navigator::core::key_parser::KeyParser;
    ///
    /// assert_eq!(KeyParser::parse("25", 1025)?, 25);
    /// assert_eq!(KeyParser::parse(" #4 ", 1025)?, 4);
    /// assert!(KeyParser::parse("pikachu", 1025).is_err());
    /// # Ok::<(), dex_navigator::DexNavigatorError>(())
    /// ```
    pub fn parse(input: &str, max_key: u32) -> Result<u32> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DexNavigatorError::invalid_key(input.trim()));
        }

        // All digits but too large for u32 is still just out of range.
        let key: u32 = digits.parse().unwrap_or(u32::MAX);
        Self::validate(key, max_key)?;
        Ok(key)
    }

    pub fn validate(key: u32, max_key: u32) -> Result<()> {
        if key == 0 || key > max_key {
            return Err(DexNavigatorError::key_out_of_range(key, max_key));
        }
        Ok(())
    }
}
