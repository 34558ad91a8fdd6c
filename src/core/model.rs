//! Catalog data model and the decode boundary for remote responses.
//!
//! # Public API
//! - [`IndexEntry`]: One row of the full catalog index (name + key)
//! - [`DetailRecord`]: Fully decoded per-entry record (types, abilities, stats, size)
//! - [`Stat`]: A named base stat in the 0-255 range
//!
//! The `Raw*` types mirror the remote JSON exactly and never leave this module.
//! Conversion into the public types is where malformed payloads are rejected,
//! so nothing downstream has to deal with partial records.

use crate::core::error::{DexNavigatorError, Result};
use serde::{Deserialize, Serialize};
use indexmap::IndexSet;

/// Every type a predicate can name.
pub const ALL_TYPES: [&str; 18] = [
    "normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// One row of the catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub key: u32,
}

impl IndexEntry {
    pub fn new(name: impl Into<String>, key: u32) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub key: u32,
    pub name: String,
    /// Ordered by the source's slot number
    pub types: Vec<String>,
    /// Source slot order, hidden ability last
    pub abilities: IndexSet<String>,
    pub stats: Vec<Stat>,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
}

impl DetailRecord {
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIndexResponse {
    pub results: Vec<RawNamedResource>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawTypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    kind: RawName,
}

#[derive(Debug, Deserialize)]
struct RawAbilitySlot {
    #[serde(default)]
    slot: u32,
    ability: RawName,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    base_stat: u32,
    stat: RawName,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDetail {
    id: u32,
    name: String,
    types: Vec<RawTypeSlot>,
    abilities: Vec<RawAbilitySlot>,
    stats: Vec<RawStat>,
    height: u32,
    weight: u32,
}

impl RawDetail {
    /// Validate and convert into a [`DetailRecord`].
    ///
    /// `requested` is the key the caller asked for and is only used for error context.
    pub(crate) fn into_record(self, requested: u32) -> Result<DetailRecord> {
        let mut types = self.types;
        types.sort_by_key(|t| t.slot);
        let mut abilities = self.abilities;
        abilities.sort_by_key(|a| a.slot);

        let stats = self
            .stats
            .into_iter()
            .map(|s| {
                let value = u8::try_from(s.base_stat).map_err(|_| {
                    DexNavigatorError::decode_failed(
                        Some(requested),
                        format!("base stat '{}' out of range: {}", s.stat.name, s.base_stat),
                    )
                })?;
                Ok(Stat {
                    name: s.stat.name,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DetailRecord {
            key: self.id,
            name: self.name,
            types: types.into_iter().map(|t| t.kind.name).collect(),
            abilities: abilities.into_iter().map(|a| a.ability.name).collect(),
            stats,
            height: self.height,
            weight: self.weight,
        })
    }
}

/// Decode a detail response body.
pub(crate) fn decode_detail(body: &[u8], requested: u32) -> Result<DetailRecord> {
    let raw: RawDetail = serde_json::from_slice(body)
        .map_err(|e| DexNavigatorError::decode_failed(Some(requested), e.to_string()))?;
    raw.into_record(requested)
}

/// Decode an index response body into raw `(name, url)` rows.
pub(crate) fn decode_index(body: &[u8]) -> Result<RawIndexResponse> {
    serde_json::from_slice(body).map_err(|e| DexNavigatorError::decode_failed(None, e.to_string()))
}
