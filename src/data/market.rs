//! Market listings and the market overview

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use thiserror::Error;

use super::null_as_default;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid sort option: '{0}' (must be id, name, or price)")]
pub struct InvalidOverviewSort(pub String);

/// A single market listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bc_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub item_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub price: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
}

/// Response of `marketPreview`: current value per item, keyed `item<ID>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketOverview {
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub data: HashMap<String, i64>,
}

/// One row of the overview table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewRow {
    pub id: i64,
    pub name: String,
    pub value: i64,
}

/// Ordering for the overview table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewSort {
    Id,
    Name,
    Price,
}

impl OverviewSort {
    pub fn parse(s: &str) -> Result<Self, InvalidOverviewSort> {
        match s.to_lowercase().as_str() {
            "id" => Ok(OverviewSort::Id),
            "name" => Ok(OverviewSort::Name),
            "price" => Ok(OverviewSort::Price),
            _ => Err(InvalidOverviewSort(s.to_string())),
        }
    }
}

/// Display name for an item ID, `UNKNOWN(<id>)` when the catalog lacks it
pub fn item_label(id: i64, names: &HashMap<i64, &str>) -> String {
    match names.get(&id) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("UNKNOWN({})", id),
    }
}

impl MarketOverview {
    /// Builds table rows from `item<ID>` keys; other keys are skipped
    pub fn rows(&self, names: &HashMap<i64, &str>, sort: OverviewSort) -> Vec<OverviewRow> {
        let mut rows: Vec<OverviewRow> = self
            .data
            .iter()
            .filter_map(|(key, value)| {
                let id = key.strip_prefix("item")?.parse::<i64>().ok()?;
                Some(OverviewRow {
                    id,
                    name: item_label(id, names),
                    value: *value,
                })
            })
            .collect();

        match sort {
            OverviewSort::Id => rows.sort_by_key(|r| r.id),
            OverviewSort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
            OverviewSort::Price => rows.sort_by_key(|r| (r.value, r.id)),
        }
        rows
    }
}
