//! Static game data: the item catalog and the built-in reference tables

use std::io::Write;

use super::{CommandError, Context};
use crate::cli::GamedataCommand;
use crate::client::Transport;
use crate::data::item::{display_emoji, find_item, lookup_item_name, Item};
use crate::data::reference::{
    food_energy, pet_boost, species_in_category, PetCategory, FOOD_ITEMS, PET_BOOST_ITEMS,
    PET_SPECIES,
};
use crate::format::format_price;
use crate::render::{print_json, Table};

pub(super) async fn run<T: Transport, W: Write>(
    command: &GamedataCommand,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        GamedataCommand::Items { cache } => {
            let (bytes, persisted) = ctx.cache().fetch_raw(*cache).await?;
            if persisted {
                writeln!(out, "Data cached to {}", ctx.cache_path().display())?;
            }
            print_json(out, &bytes)?;
        }
        GamedataCommand::Item { query } => {
            let items = ctx.load_items(false).await?;
            let item = find_item(&items, query)
                .ok_or_else(|| CommandError::ItemNotFound(query.clone()))?;
            write_item_details(item, &items, out)?;
        }
        GamedataCommand::Foods => {
            let mut table = Table::with_header(["FOOD", "ENERGY"]);
            for food in FOOD_ITEMS {
                table.row([food.name.to_string(), format_price(food.energy, true)]);
            }
            table.write_to(out)?;
        }
        GamedataCommand::Boosts => {
            let mut table = Table::with_header(["BOOST", "WORTH", "EFFECT"]);
            for boost in PET_BOOST_ITEMS {
                table.row([
                    boost.name.to_string(),
                    format_price(boost.worth, false),
                    boost.effect.to_string(),
                ]);
            }
            table.write_to(out)?;
        }
        GamedataCommand::Pets { category } => {
            let species = match category {
                Some(name) => {
                    let category = PetCategory::parse(name).ok_or_else(|| {
                        CommandError::InvalidArgument(format!(
                            "Invalid pet category: '{}' (must be fish, hunt, explore, or mine)",
                            name
                        ))
                    })?;
                    species_in_category(category)
                }
                None => PET_SPECIES.iter().collect(),
            };

            let mut table = Table::with_header(["SPECIES", "CATEGORY", "ICON"]);
            for pet in species {
                table.row([pet.name, pet.category.as_str(), pet.icon]);
            }
            table.write_to(out)?;
        }
    }
    Ok(())
}

/// Writes a Field/Value table for `item`, followed by its recipe if it has one
fn write_item_details<W: Write>(item: &Item, items: &[Item], out: &mut W) -> std::io::Result<()> {
    let used_to_craft: Vec<String> = item
        .used_to_craft
        .iter()
        .map(|id| lookup_item_name(*id, items))
        .collect();

    let mut table = Table::with_header(["Field", "Value"]);
    table
        .row(["ID".to_string(), item.id.to_string()])
        .row(["Emoji".to_string(), display_emoji(&item.emoji)])
        .row(["Name", item.name.as_str()])
        .row(["Description", item.description.as_str()])
        .row(["Uncraftable".to_string(), item.uncraftable.to_string()])
        .row(["Cost".to_string(), format_price(item.cost, true)])
        .row(["Attributes".to_string(), item.attributes.join(", ")])
        .row(["LootSources".to_string(), item.loot_sources.join(", ")])
        .row(["UseLimit".to_string(), item.use_limit.to_string()])
        .row(["UsedToCraft".to_string(), used_to_craft.join(", ")])
        .row(["ImageURL", item.image_url.as_str()]);

    let energy = food_energy(&item.name);
    if energy > 0 {
        table.row(["Energy".to_string(), format_price(energy, true)]);
    }
    if let Some(boost) = pet_boost(&item.name) {
        table.row([
            "Boost".to_string(),
            format!("{} ({} BC)", boost.effect, format_price(boost.worth, false)),
        ]);
    }
    table.write_to(out)?;

    if !item.recipe.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recipe Components:")?;
        let mut recipe = Table::with_header(["Name", "Count"]);
        for component in &item.recipe {
            recipe.row([
                lookup_item_name(component.id, items),
                component.count.to_string(),
            ]);
        }
        recipe.write_to(out)?;
    }
    Ok(())
}
