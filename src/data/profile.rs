//! Profile records returned by the `profile` and `user` request types
//!
//! Only the sections rendered by `profile info` are typed; everything else in
//! the response is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub registration_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rank: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tier: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bc: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub kr: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub buddy_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub faction_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub faction_tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quest_level: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub daily_claim_streak: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub daily_vote_streak: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub farm_plots: Vec<FarmPlot>,
    #[serde(deserialize_with = "null_as_default")]
    pub generators: Vec<Generator>,
    #[serde(deserialize_with = "null_as_default")]
    pub quests: Vec<Quest>,
    #[serde(deserialize_with = "null_as_default")]
    pub cooldowns: Cooldowns,
    #[serde(deserialize_with = "null_as_default")]
    pub effects: HashMap<String, Effect>,
    #[serde(deserialize_with = "null_as_default")]
    pub upgrades: Upgrades,
    #[serde(deserialize_with = "null_as_default")]
    pub perks: Perks,
    #[serde(deserialize_with = "null_as_default")]
    pub settings: Settings,
    #[serde(deserialize_with = "null_as_default")]
    pub custom: Custom,
    #[serde(deserialize_with = "null_as_default")]
    pub faction: Faction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmPlot {
    #[serde(deserialize_with = "null_as_default")]
    pub level: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PlantStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub boost: PlotBoost,
    #[serde(deserialize_with = "null_as_default")]
    pub is_extra: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlantStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub is_planted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub item_id: i64,
    /// Epoch milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub planted_time: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlotBoost {
    #[serde(deserialize_with = "null_as_default")]
    pub multiplier: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Generator {
    #[serde(deserialize_with = "null_as_default")]
    pub level: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_extra: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quest {
    #[serde(deserialize_with = "null_as_default")]
    pub item_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub amount_required: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub amount_fulfilled: i64,
}

/// Last-use times of timed actions, in epoch milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cooldowns {
    #[serde(deserialize_with = "null_as_default")]
    pub fish: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hunt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub explore: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mine: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub work: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub daily: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub water: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub claim_generators: i64,
}

impl Cooldowns {
    /// Label and timestamp pairs in display order
    pub fn entries(&self) -> [(&'static str, i64); 8] {
        [
            ("Fish", self.fish),
            ("Hunt", self.hunt),
            ("Explore", self.explore),
            ("Mine", self.mine),
            ("Work", self.work),
            ("Daily", self.daily),
            ("Water", self.water),
            ("ClaimGenerators", self.claim_generators),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub modifier: Modifier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Modifier {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub multiplier: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Upgrades {
    #[serde(deserialize_with = "null_as_default")]
    pub fish: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fish_extra: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hunt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hunt_extra: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub explore: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub explore_extra: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mine: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mine_extra: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pets_stable: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pets_stable_extra: i64,
}

impl Upgrades {
    pub fn entries(&self) -> [(&'static str, i64); 10] {
        [
            ("Fish", self.fish),
            ("FishExtra", self.fish_extra),
            ("Hunt", self.hunt),
            ("HuntExtra", self.hunt_extra),
            ("Explore", self.explore),
            ("ExploreExtra", self.explore_extra),
            ("Mine", self.mine),
            ("MineExtra", self.mine_extra),
            ("PetsStable", self.pets_stable),
            ("PetsStableExtra", self.pets_stable_extra),
        ]
    }
}

/// Permanent perk levels; only the first few are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Perks {
    #[serde(deserialize_with = "null_as_default")]
    pub lower_rank_cost: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub lower_tier_cost: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub raise_pet_space: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub raise_equip_slots: i64,
}

impl Perks {
    pub fn entries(&self) -> [(&'static str, i64); 4] {
        [
            ("LowerRankCost", self.lower_rank_cost),
            ("LowerTierCost", self.lower_tier_cost),
            ("RaisePetSpace", self.raise_pet_space),
            ("RaiseEquipSlots", self.raise_equip_slots),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub profile_show_stat_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub sync_discord_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub public_discord_profile: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub discord_ping_on_response: bool,
}

/// Cosmetic profile options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Custom {
    #[serde(deserialize_with = "null_as_default")]
    pub profile_hide_avatar: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_hide_title_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_use_chat_emblem_emoji: bool,
    pub profile_background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Faction {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_bc_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_recruiting: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "null_as_default")]
    pub motd: String,
    #[serde(deserialize_with = "null_as_default")]
    pub member_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_null_sections_take_defaults() {
        let json = r#"{"id": 3, "name": "solo", "factionId": 0, "faction": null,
                       "farmPlots": null, "cooldowns": {"fish": null, "hunt": 5}}"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.faction, Faction::default());
        assert!(profile.farm_plots.is_empty());
        assert_eq!(profile.cooldowns.fish, 0);
        assert_eq!(profile.cooldowns.hunt, 5);
    }

    #[test]
    fn test_profile_tolerates_partial_and_null_sections() {
        let json = r#"{
            "id": 12, "name": "alice", "bc": 5000000,
            "farmPlots": [{"level": 2, "status": {"isPlanted": true, "itemId": 4, "plantedTime": 1}}],
            "effects": {"luck": {"endTime": 10, "modifier": {"type": "mult", "multiplier": 2}}},
            "discordId": null,
            "somethingNew": [1, 2, 3]
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 12);
        assert_eq!(profile.farm_plots[0].status.item_id, 4);
        assert_eq!(profile.effects["luck"].modifier.kind, "mult");
        assert_eq!(profile.faction, Faction::default());
        assert_eq!(profile.settings.profile_show_stat_id, None);
    }

    #[test]
    fn test_settings_and_custom_nullable_fields() {
        let json = r#"{
            "settings": {"profileShowStatId": 3, "syncDiscordName": true},
            "custom": {"profileBackground": null, "profileHideAvatar": true},
            "perks": {"raisePetSpace": 2, "lowerPetBreedCost": 9}
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.settings.profile_show_stat_id, Some(3));
        assert!(profile.settings.sync_discord_name);
        assert!(profile.custom.profile_hide_avatar);
        assert!(profile.custom.profile_background.is_none());
        assert_eq!(profile.perks.entries()[2], ("RaisePetSpace", 2));
    }

    #[test]
    fn test_cooldown_entries_order() {
        let cooldowns = Cooldowns {
            fish: 1,
            claim_generators: 8,
            ..Default::default()
        };
        let entries = cooldowns.entries();
        assert_eq!(entries[0], ("Fish", 1));
        assert_eq!(entries[7], ("ClaimGenerators", 8));
    }
}
