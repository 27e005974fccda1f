//! Search requests, printed as raw JSON

use crate::cli::SearchCommand;
use crate::client::RequestDescriptor;

pub(super) fn request(command: &SearchCommand) -> RequestDescriptor {
    match command {
        SearchCommand::User { query } => {
            RequestDescriptor::new("searchUsers").param("query", query.as_str())
        }
        SearchCommand::Faction { query } => {
            RequestDescriptor::new("searchFactions").param("query", query.as_str())
        }
        SearchCommand::Pet {
            skin,
            aura,
            species,
            name,
        } => RequestDescriptor::new("searchPets")
            .param("skin", skin.as_str())
            .param("aura", aura.as_str())
            .param("species", species.as_str())
            .param("rawNameQuery", name.as_str()),
    }
}
