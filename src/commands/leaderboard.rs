//! Leaderboard requests
//!
//! `--stat` and `--item-id` are only sent when given, and are required by the
//! `stat` and `item` user leaderboards respectively.

use super::CommandError;
use crate::cli::{LeaderboardCommand, UserLeaderboard};
use crate::client::RequestDescriptor;

pub(super) fn request(command: &LeaderboardCommand) -> Result<RequestDescriptor, CommandError> {
    let request = match command {
        LeaderboardCommand::User {
            lb_type,
            stat,
            item_id,
            page,
        } => {
            let stat = stat.as_deref().filter(|s| !s.is_empty());
            if *lb_type == UserLeaderboard::Stat && stat.is_none() {
                return Err(CommandError::InvalidArgument(
                    "--stat is required when --lb-type=stat".to_string(),
                ));
            }
            if *lb_type == UserLeaderboard::Item && item_id.is_none() {
                return Err(CommandError::InvalidArgument(
                    "--item-id is required when --lb-type=item".to_string(),
                ));
            }

            let mut request = RequestDescriptor::new("userLeaderboard")
                .param("lbType", lb_type.as_str())
                .param("page", *page);
            if let Some(stat) = stat {
                request = request.param("stat", stat);
            }
            if let Some(item_id) = item_id {
                request = request.param("itemId", *item_id);
            }
            request
        }
        LeaderboardCommand::Faction { stat, page } => RequestDescriptor::new("factionLeaderboard")
            .param("stat", stat.as_str())
            .param("page", *page),
        LeaderboardCommand::Pets { page } => {
            RequestDescriptor::new("petsLeaderboard").param("page", *page)
        }
    };
    Ok(request)
}
