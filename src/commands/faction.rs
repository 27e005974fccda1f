//! Faction lookups, printed as raw JSON

use crate::cli::FactionCommand;
use crate::client::RequestDescriptor;

pub(super) fn request(command: &FactionCommand) -> RequestDescriptor {
    match command {
        FactionCommand::Info { id } => RequestDescriptor::new("faction").param("id", *id),
        FactionCommand::Members { id } => RequestDescriptor::new("factionMembers").param("id", *id),
        FactionCommand::Recruiting => RequestDescriptor::new("recruitingFactions"),
        FactionCommand::Requests { owner, id } => RequestDescriptor::new("factionJoinRequests")
            .param("idType", owner.id_type())
            .param("id", *id),
    }
}
