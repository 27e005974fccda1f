//! Command-line interface parsing for BCN CLI
//!
//! Mirrors the bconomy API: one top-level command per entity, each with
//! subcommands that map to a single request type.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Overrides;
use crate::format::parse_id;

/// BCN CLI - query the bconomy API from the terminal
#[derive(Parser, Debug)]
#[command(name = "bcncli")]
#[command(about = "BCN CLI interacts with the bconomy API")]
#[command(version)]
pub struct Cli {
    /// BConomy API key (flag, config file, or env var BCONOMYAPI)
    #[arg(long, global = true, value_name = "KEY")]
    pub apikey: Option<String>,

    /// Item data cache file; relative paths are resolved next to the executable
    #[arg(long, global = true, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Config file to use instead of searching for config.json
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The configuration values given on the command line
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.apikey.clone(),
            cache_file: self.cache_file.clone(),
            config_file: self.config.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Retrieve static game data
    Gamedata {
        #[command(subcommand)]
        command: GamedataCommand,
    },
    /// Manage user profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Manage pets
    Pet {
        #[command(subcommand)]
        command: PetCommand,
    },
    /// Manage eggs
    Egg {
        #[command(subcommand)]
        command: EggCommand,
    },
    /// Manage factions
    Faction {
        #[command(subcommand)]
        command: FactionCommand,
    },
    /// Manage marketplace operations
    Market {
        #[command(subcommand)]
        command: MarketCommand,
    },
    /// View various leaderboards
    Leaderboard {
        #[command(subcommand)]
        command: LeaderboardCommand,
    },
    /// Retrieve various logs
    Logs {
        #[command(subcommand)]
        command: LogsCommand,
    },
    /// Search for users, factions, or pets
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum GamedataCommand {
    /// Fetch item data
    Items {
        /// Save the fetched data to the item cache file
        #[arg(short, long)]
        cache: bool,
    },
    /// Fetch details for a specific item by ID or name
    Item {
        /// Item ID, name or idName
        query: String,
    },
    /// List food items and the energy they restore
    Foods,
    /// List pet boost items
    Boosts,
    /// List pet species, optionally only one category
    Pets {
        /// fish, hunt, explore or mine
        category: Option<String>,
    },
}

/// Options shared by `profile info` and `profile user`
#[derive(clap::Args, Debug)]
pub struct ProfileArgs {
    #[arg(value_parser = parse_id)]
    pub id: i64,

    /// Print raw JSON response
    #[arg(short, long)]
    pub debug: bool,

    /// Comma-separated list of sections to print (e.g. farms,quests)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sorting key for a section (e.g. farm:plant)
    #[arg(short, long)]
    pub sort: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Fetch profile info (detailed)
    Info(ProfileArgs),
    /// Fetch user details
    User(ProfileArgs),
    /// Fetch inventory
    Inventory {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// Fetch flat inventory
    Flatinventory {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// Fetch stats
    Stats {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// Fetch trophies
    Trophies {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PetCommand {
    /// Fetch pet info
    Info {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// List pets for a user
    Owned {
        #[arg(value_parser = parse_id)]
        user_id: i64,

        /// Print raw JSON of the pets
        #[arg(long)]
        debug: bool,

        /// Sort table by this field (id, name, species, tier, xp, adventure, items, boost)
        #[arg(long)]
        sort: Option<String>,

        /// Group table by this field (species, category, tier, boost, adventure, craving)
        #[arg(long)]
        group: Option<String>,
    },
    /// Fetch offspring
    Offspring {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum EggCommand {
    /// Fetch egg info
    Info {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// List eggs for a user
    Owned {
        #[arg(value_parser = parse_id)]
        user_id: i64,
    },
    /// Fetch offspring for an egg
    Offspring {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
}

/// Whose join requests to list
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOwner {
    Faction,
    User,
}

impl RequestOwner {
    pub fn id_type(&self) -> &'static str {
        match self {
            RequestOwner::Faction => "factionId",
            RequestOwner::User => "bcId",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FactionCommand {
    /// Fetch faction info
    Info {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// List faction members
    Members {
        #[arg(value_parser = parse_id)]
        id: i64,
    },
    /// List recruiting factions
    Recruiting,
    /// List join requests by faction or user
    Requests {
        #[arg(value_enum)]
        owner: RequestOwner,

        #[arg(value_parser = parse_id)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MarketCommand {
    /// Show market overview
    Overview {
        /// Sort overview by: id, name, or price
        #[arg(short, long, default_value = "id")]
        sort: String,

        /// Print raw JSON response
        #[arg(short, long)]
        debug: bool,
    },
    /// List market listings for an item
    Item {
        #[arg(value_parser = parse_id)]
        item_id: i64,

        /// Print raw JSON response
        #[arg(short, long)]
        debug: bool,
    },
    /// List market listings for a user
    User {
        #[arg(value_parser = parse_id)]
        bc_id: i64,

        /// Print raw JSON response
        #[arg(short, long)]
        debug: bool,
    },
}

/// User leaderboard kinds
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLeaderboard {
    #[value(name = "rank")]
    Rank,
    #[value(name = "questLevel")]
    QuestLevel,
    #[value(name = "stat")]
    Stat,
    #[value(name = "item")]
    Item,
}

impl UserLeaderboard {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLeaderboard::Rank => "rank",
            UserLeaderboard::QuestLevel => "questLevel",
            UserLeaderboard::Stat => "stat",
            UserLeaderboard::Item => "item",
        }
    }
}

/// Faction leaderboard statistics
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactionStat {
    #[value(name = "fpDepositedMonthly")]
    FpDepositedMonthly,
    #[value(name = "fpDepositedTotal")]
    FpDepositedTotal,
}

impl FactionStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactionStat::FpDepositedMonthly => "fpDepositedMonthly",
            FactionStat::FpDepositedTotal => "fpDepositedTotal",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum LeaderboardCommand {
    /// Show user leaderboard
    User {
        /// Leaderboard type
        #[arg(short = 't', long = "lb-type", value_enum)]
        lb_type: UserLeaderboard,

        /// Statistic name (required if --lb-type=stat)
        #[arg(short, long)]
        stat: Option<String>,

        /// Item ID (required if --lb-type=item)
        #[arg(short, long = "item-id")]
        item_id: Option<i64>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show faction leaderboard
    Faction {
        #[arg(short, long, value_enum)]
        stat: FactionStat,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show pets leaderboard
    Pets {
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

/// ID types logs can be filtered by
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogIdType {
    Faction,
    Item,
}

impl LogIdType {
    pub fn id_type(&self) -> &'static str {
        match self {
            LogIdType::Faction => "factionId",
            LogIdType::Item => "itemId",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum LogsCommand {
    /// List logs for a user by BCID
    Bcid {
        #[arg(value_parser = parse_id)]
        bc_id: i64,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List logs by ID type (faction or item)
    Idtype {
        #[arg(value_enum)]
        id_type: LogIdType,

        #[arg(value_parser = parse_id)]
        id: i64,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List logs by log type
    Logtype {
        log_type: String,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List daily inputs for a user on a date
    Inputs {
        #[arg(value_parser = parse_id)]
        bc_id: i64,

        date: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SearchCommand {
    /// Search users by name
    User { query: String },
    /// Search factions by name
    Faction { query: String },
    /// Search pets by properties
    Pet {
        /// Skin filter: specific, 'no skin', or 'any skin'
        #[arg(short, long, default_value = "any skin")]
        skin: String,

        /// Aura filter: specific, 'no aura', or 'any aura'
        #[arg(short, long, default_value = "any aura")]
        aura: String,

        /// Species filter: specific or 'any species'
        #[arg(short = 'c', long, default_value = "any species")]
        species: String,

        /// Name query filter
        #[arg(short, long, default_value = "")]
        name: String,
    },
}
