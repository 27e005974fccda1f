//! Pet and egg commands
//!
//! `pet owned` and `egg owned` share the `userPetsAndEggs` request; the
//! response carries both a `pets` and an `eggs` array.

use std::io::Write;

use serde_json::{Map, Value};

use super::{parse_json, CommandError, Context};
use crate::cli::{EggCommand, PetCommand};
use crate::client::{RequestDescriptor, Transport};
use crate::data::pet::{group_pets, sort_pets, Pet, PetGroup, PetSort};
use crate::data::reference::pet_category;
use crate::format::epoch_millis_to_rfc3339;
use crate::render::{print_json_value, Table};

const PET_COLUMNS: [&str; 10] = [
    "ID",
    "Name",
    "Species",
    "Category",
    "Tier",
    "XP",
    "Adventure",
    "Items",
    "Boost",
    "Ends",
];

pub(super) async fn run_pet<T: Transport, W: Write>(
    command: &PetCommand,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        PetCommand::Info { id } => {
            ctx.print_raw(&RequestDescriptor::new("pet").param("id", *id), out)
                .await
        }
        PetCommand::Offspring { id } => {
            ctx.print_raw(&RequestDescriptor::new("petOffspring").param("id", *id), out)
                .await
        }
        PetCommand::Owned {
            user_id,
            debug,
            sort,
            group,
        } => {
            // Reject bad keys before spending a request
            let sort = sort.as_deref().map(PetSort::parse).transpose()?;
            let group = group.as_deref().map(PetGroup::parse).transpose()?;

            let mut response = fetch_pets_and_eggs(ctx, *user_id).await?;
            let pets = response.remove("pets").unwrap_or(Value::Null);
            if *debug {
                print_json_value(out, &pets)?;
                return Ok(());
            }

            let mut pets: Vec<Pet> = match pets {
                Value::Null => Vec::new(),
                pets => serde_json::from_value(pets).map_err(|source| CommandError::Parse {
                    what: "pets data",
                    source,
                })?,
            };
            if let Some(sort) = sort {
                sort_pets(&mut pets, sort);
            }

            match group {
                Some(group) => {
                    for (key, members) in group_pets(pets, group) {
                        writeln!(out, "{} ({})", key, members.len())?;
                        pet_table(&members).write_to(out)?;
                        writeln!(out)?;
                    }
                }
                None => pet_table(&pets).write_to(out)?,
            }
            Ok(())
        }
    }
}

pub(super) async fn run_egg<T: Transport, W: Write>(
    command: &EggCommand,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        EggCommand::Info { id } => {
            ctx.print_raw(&RequestDescriptor::new("egg").param("id", *id), out)
                .await
        }
        EggCommand::Offspring { id } => {
            ctx.print_raw(&RequestDescriptor::new("petOffspring").param("id", *id), out)
                .await
        }
        EggCommand::Owned { user_id } => {
            let mut response = fetch_pets_and_eggs(ctx, *user_id).await?;
            let eggs = response.remove("eggs").unwrap_or(Value::Null);
            print_json_value(out, &eggs)?;
            Ok(())
        }
    }
}

async fn fetch_pets_and_eggs<T: Transport>(
    ctx: &Context<T>,
    user_id: i64,
) -> Result<Map<String, Value>, CommandError> {
    let request = RequestDescriptor::new("userPetsAndEggs").param("id", user_id);
    let bytes = ctx.fetcher.fetch(&request).await?;
    parse_json(&bytes, "response wrapper")
}

fn pet_table(pets: &[Pet]) -> Table {
    let mut table = Table::with_header(PET_COLUMNS);
    for pet in pets {
        let category = pet_category(&pet.species)
            .map(|c| c.as_str())
            .unwrap_or("Unknown");
        table.row([
            pet.id.to_string(),
            pet.name.clone(),
            pet.species.clone(),
            category.to_string(),
            pet.tier.to_string(),
            pet.xp.to_string(),
            pet.adventure_type.clone(),
            pet.lifetime_items_found.to_string(),
            pet.adventure_boost.multiplier.to_string(),
            epoch_millis_to_rfc3339(pet.adventure_boost.end_time),
        ]);
    }
    table
}
