//! Command handlers
//!
//! Each handler builds a request descriptor from parsed arguments, fetches it
//! through the shared [`Context`], and writes either pretty JSON or a table to
//! the given output.

mod faction;
mod gamedata;
mod leaderboard;
mod logs;
mod market;
mod pet;
mod profile;
mod search;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::cache::{CacheLoader, FreshnessPolicy, LoadError};
use crate::cli::Command;
use crate::client::{DataFetcher, FetchError, HttpTransport, RequestDescriptor, Transport};
use crate::config::Config;
use crate::data::market::InvalidOverviewSort;
use crate::data::{Item, PetFieldError};
use crate::render::print_json;

/// Errors surfaced to the user by a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Could not load item data: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    PetField(#[from] PetFieldError),

    #[error(transparent)]
    OverviewSort(#[from] InvalidOverviewSort),

    #[error("Item {0:?} not found")]
    ItemNotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Everything a command needs besides its own arguments
#[derive(Debug)]
pub struct Context<T = HttpTransport> {
    pub fetcher: DataFetcher<T>,
    /// Location of the item catalog cache
    pub cache_path: PathBuf,
    /// Freshness used when a command needs item names
    pub freshness: FreshnessPolicy,
    /// Reference time for "time elapsed" columns
    pub now: DateTime<Utc>,
}

impl Context<HttpTransport> {
    /// Builds the HTTP-backed context described by `config`
    pub fn from_config(config: &Config) -> Self {
        let fetcher =
            DataFetcher::new(config.api_key.clone()).with_endpoint(config.endpoint.clone());
        Self::new(fetcher, config.cache_path.clone(), config.freshness)
    }
}

impl<T: Transport> Context<T> {
    pub fn new(fetcher: DataFetcher<T>, cache_path: PathBuf, freshness: FreshnessPolicy) -> Self {
        Self {
            fetcher,
            cache_path,
            freshness,
            now: Utc::now(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn cache(&self) -> CacheLoader<'_, T> {
        CacheLoader::new(&self.fetcher, self.cache_path.clone())
    }

    /// Loads the item catalog for name lookups; `persist` rewrites a missing or stale cache
    async fn load_items(&self, persist: bool) -> Result<Vec<Item>, CommandError> {
        Ok(self.cache().load(self.freshness, persist).await?)
    }

    /// Fetches `request` and pretty-prints the response body
    async fn print_raw<W: Write>(
        &self,
        request: &RequestDescriptor,
        out: &mut W,
    ) -> Result<(), CommandError> {
        let bytes = self.fetcher.fetch(request).await?;
        print_json(out, &bytes)?;
        Ok(())
    }
}

/// Runs a parsed command, writing its output to `out`
pub async fn run<T: Transport, W: Write>(
    command: &Command,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        Command::Gamedata { command } => gamedata::run(command, ctx, out).await,
        Command::Profile { command } => profile::run(command, ctx, out).await,
        Command::Pet { command } => pet::run_pet(command, ctx, out).await,
        Command::Egg { command } => pet::run_egg(command, ctx, out).await,
        Command::Faction { command } => ctx.print_raw(&faction::request(command), out).await,
        Command::Market { command } => market::run(command, ctx, out).await,
        Command::Leaderboard { command } => {
            ctx.print_raw(&leaderboard::request(command)?, out).await
        }
        Command::Logs { command } => ctx.print_raw(&logs::request(command), out).await,
        Command::Search { command } => ctx.print_raw(&search::request(command), out).await,
    }
}

fn parse_json<D: DeserializeOwned>(bytes: &[u8], what: &'static str) -> Result<D, CommandError> {
    serde_json::from_slice(bytes).map_err(|source| CommandError::Parse { what, source })
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::cli::{FactionCommand, SearchCommand};
    use crate::client::mock::MockTransport;

    #[tokio::test]
    async fn test_run_pass_through_prints_pretty_json() {
        let (ctx, _dir) = context_with_cache(r#"{"id":4,"tag":"ABC"}"#);
        let command = Command::Faction {
            command: FactionCommand::Info { id: 4 },
        };

        let mut out = Vec::new();
        run(&command, &ctx, &mut out).await.unwrap();

        assert_eq!(rendered(out), "{\n  \"id\": 4,\n  \"tag\": \"ABC\"\n}\n");
        let request = ctx.fetcher.transport().last_request().unwrap();
        assert_eq!(request.api_key, "test-key");
        assert_eq!(request.body["type"], "faction");
    }

    #[tokio::test]
    async fn test_run_without_api_key_sends_nothing() {
        let fetcher = DataFetcher::with_transport(MockTransport::with_response(200, "{}"), None);
        let ctx = Context::new(
            fetcher,
            PathBuf::from("itemid.json"),
            FreshnessPolicy::default(),
        );
        let command = Command::Search {
            command: SearchCommand::User {
                query: "bob".to_string(),
            },
        };

        let mut out = Vec::new();
        let err = run(&command, &ctx, &mut out).await.unwrap_err();

        assert!(matches!(err, CommandError::Fetch(FetchError::MissingApiKey)));
        assert_eq!(ctx.fetcher.transport().calls(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_is_reported() {
        let fetcher = DataFetcher::with_transport(
            MockTransport::with_response(403, "forbidden"),
            Some("k".to_string()),
        );
        let ctx = Context::new(fetcher, PathBuf::from("itemid.json"), FreshnessPolicy::default());
        let command = Command::Faction {
            command: FactionCommand::Recruiting,
        };

        let err = run(&command, &ctx, &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "API returned status 403: forbidden");
    }

    #[test]
    fn test_context_from_config() {
        let config = Config {
            api_key: Some("abc".to_string()),
            cache_path: PathBuf::from("/opt/bcn/itemid.json"),
            freshness: FreshnessPolicy::from_secs(10),
            endpoint: "http://localhost:9000/api/data".to_string(),
            config_file: None,
        };

        let ctx = Context::from_config(&config);
        assert_eq!(ctx.fetcher.endpoint(), "http://localhost:9000/api/data");
        assert_eq!(ctx.cache_path(), Path::new("/opt/bcn/itemid.json"));
        assert_eq!(ctx.freshness, FreshnessPolicy::from_secs(10));
    }
}
