//! Item catalog records
//!
//! The item catalog (`itemData`) is a JSON array of every item in the game.
//! It changes rarely, so it is the one dataset kept in a local cache file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A single entry of the item catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub emoji: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uncraftable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub loot_sources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub recipe: Vec<RecipeComponent>,
    #[serde(deserialize_with = "null_as_default")]
    pub flat_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cost: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub use_limit: i64,
    /// IDs of items this item is an ingredient of
    #[serde(deserialize_with = "null_as_default")]
    pub used_to_craft: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// One ingredient of an item's recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeComponent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
}

/// Parses a catalog payload into items, preserving order
pub fn parse_items(bytes: &[u8]) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Returns the name of the item with `id`, or a placeholder if unknown
pub fn lookup_item_name(id: i64, items: &[Item]) -> String {
    items
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| format!("Unknown Item ID {}", id))
}

/// Builds an id → name index for table rendering
pub fn name_index(items: &[Item]) -> HashMap<i64, &str> {
    items
        .iter()
        .map(|item| (item.id, item.name.as_str()))
        .collect()
}

/// Finds an item by numeric ID, then by case-insensitive `name` or `idName`
pub fn find_item<'a>(items: &'a [Item], query: &str) -> Option<&'a Item> {
    if let Ok(id) = query.trim().parse::<i64>() {
        if let Some(item) = items.iter().find(|item| item.id == id) {
            return Some(item);
        }
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .find(|item| item.name.to_lowercase() == needle || item.id_name.to_lowercase() == needle)
}

/// Converts Discord-style custom emoji (`<:name:id>`) to a `:name:` alias
pub fn display_emoji(emoji: &str) -> String {
    if emoji.starts_with("<:") && emoji.ends_with('>') {
        if let Some(name) = emoji.split(':').nth(1) {
            return format!(":{}:", name);
        }
    }
    emoji.to_string()
}
