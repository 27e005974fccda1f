//! Pet records from `userPetsAndEggs`, plus sorting and grouping for tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use thiserror::Error;

use super::null_as_default;

/// Errors for unsupported sort or group keys
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PetFieldError {
    #[error("Invalid sort field: '{0}'. Valid fields: id, name, species, tier, xp, adventure, items, boost")]
    InvalidSort(String),

    #[error("Invalid group field: '{0}'. Valid fields: species, category, tier, boost, adventure, craving")]
    InvalidGroup(String),
}

/// The subset of pet fields shown in tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pet {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_bc_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hatch_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tier: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub xp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub species: String,
    #[serde(deserialize_with = "null_as_default")]
    pub generation: i64,
    #[serde(rename = "parentAId", deserialize_with = "null_as_default")]
    pub parent_a_id: i64,
    #[serde(rename = "parentBId", deserialize_with = "null_as_default")]
    pub parent_b_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub times_bred: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_bred: String,
    #[serde(deserialize_with = "null_as_default")]
    pub held_item_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unsynced_energy: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub adventure_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub adventure_boost: AdventureBoost,
    #[serde(deserialize_with = "null_as_default")]
    pub last_adventure_sync: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lifetime_items_found: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub craving: Craving,
    #[serde(deserialize_with = "null_as_default")]
    pub skin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub aura: String,
}

/// A pet's active adventure boost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdventureBoost {
    #[serde(deserialize_with = "null_as_default")]
    pub multiplier: i64,
    /// Epoch milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: i64,
}

/// The food a pet currently craves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Craving {
    #[serde(deserialize_with = "null_as_default")]
    pub item_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
}

/// Column a pet table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetSort {
    Id,
    Name,
    Species,
    Tier,
    Xp,
    Adventure,
    Items,
    Boost,
}

impl PetSort {
    pub fn parse(s: &str) -> Result<Self, PetFieldError> {
        match s.to_lowercase().as_str() {
            "id" => Ok(PetSort::Id),
            "name" => Ok(PetSort::Name),
            "species" => Ok(PetSort::Species),
            "tier" => Ok(PetSort::Tier),
            "xp" => Ok(PetSort::Xp),
            "adventure" => Ok(PetSort::Adventure),
            "items" => Ok(PetSort::Items),
            "boost" => Ok(PetSort::Boost),
            _ => Err(PetFieldError::InvalidSort(s.to_string())),
        }
    }
}

/// Field a pet table can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetGroup {
    Species,
    Category,
    Tier,
    Boost,
    Adventure,
    Craving,
}

impl PetGroup {
    pub fn parse(s: &str) -> Result<Self, PetFieldError> {
        match s.to_lowercase().as_str() {
            "species" => Ok(PetGroup::Species),
            "category" => Ok(PetGroup::Category),
            "tier" => Ok(PetGroup::Tier),
            "boost" => Ok(PetGroup::Boost),
            "adventure" => Ok(PetGroup::Adventure),
            "craving" => Ok(PetGroup::Craving),
            _ => Err(PetFieldError::InvalidGroup(s.to_string())),
        }
    }

    fn key(&self, pet: &Pet) -> String {
        match self {
            PetGroup::Species => pet.species.clone(),
            PetGroup::Category => super::reference::pet_category(&pet.species)
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            PetGroup::Tier => pet.tier.to_string(),
            PetGroup::Boost => pet.adventure_boost.multiplier.to_string(),
            PetGroup::Adventure => pet.adventure_type.clone(),
            PetGroup::Craving => pet.craving.item_id.to_string(),
        }
    }
}

/// Sorts pets in place, ascending and stable
pub fn sort_pets(pets: &mut [Pet], by: PetSort) {
    match by {
        PetSort::Id => pets.sort_by_key(|p| p.id),
        PetSort::Name => pets.sort_by(|a, b| a.name.cmp(&b.name)),
        PetSort::Species => pets.sort_by(|a, b| a.species.cmp(&b.species)),
        PetSort::Tier => pets.sort_by_key(|p| p.tier),
        PetSort::Xp => pets.sort_by_key(|p| p.xp),
        PetSort::Adventure => pets.sort_by(|a, b| a.adventure_type.cmp(&b.adventure_type)),
        PetSort::Items => pets.sort_by_key(|p| p.lifetime_items_found),
        PetSort::Boost => pets.sort_by_key(|p| p.adventure_boost.multiplier),
    }
}

/// Groups pets by the given field; keys come back sorted as strings
pub fn group_pets(pets: Vec<Pet>, by: PetGroup) -> BTreeMap<String, Vec<Pet>> {
    let mut groups: BTreeMap<String, Vec<Pet>> = BTreeMap::new();
    for pet in pets {
        groups.entry(by.key(&pet)).or_default().push(pet);
    }
    groups
}
