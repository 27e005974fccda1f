//! Data models for bconomy API responses
//!
//! Response records are deserialized leniently: missing or `null` fields take
//! their default value and unknown fields are ignored, so new server fields
//! never break the CLI. Static game reference tables live in [`reference`].

pub mod item;
pub mod market;
pub mod pet;
pub mod profile;
pub mod reference;

use serde::{Deserialize, Deserializer};

pub use item::{find_item, lookup_item_name, name_index, parse_items, Item, RecipeComponent};
pub use market::{Listing, MarketOverview, OverviewRow, OverviewSort};
pub use pet::{group_pets, sort_pets, Pet, PetFieldError, PetGroup, PetSort};
pub use profile::Profile;
pub use reference::PetCategory;

/// Deserializes a field, mapping an explicit `null` to the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
