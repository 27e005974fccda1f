//! Configuration loading
//!
//! The API key is resolved from, in order: the `--apikey` flag, the `apikey`
//! value of a `config.json` file, and the `BCONOMYAPI` environment variable.
//! The config file is looked up in the current directory, then in the
//! platform config directory (`~/.config/bcncli/` on Linux).

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cache::{resolve_cache_path, FreshnessPolicy, DEFAULT_CACHE_FILE};
use crate::client::API_URL;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BCONOMYAPI";

/// Name of the config file
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine the executable directory: {0}")]
    ExecutableDir(#[source] io::Error),
}

/// Contents of `config.json`; unknown keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub apikey: Option<String>,
    pub cache_file: Option<PathBuf>,
    pub freshness_secs: Option<u64>,
    pub endpoint: Option<String>,
}

/// Values given on the command line, which take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub cache_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    /// Absolute location of the item catalog cache
    pub cache_path: PathBuf,
    pub freshness: FreshnessPolicy,
    pub endpoint: String,
    /// The config file that was used, if any
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the command line, config file and environment.
    ///
    /// Relative cache paths are resolved against the executable's directory.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match &overrides.config_file {
            Some(path) => Some((path.clone(), read_config_file(path)?)),
            None => find_config_file(&config_search_paths())?,
        };
        if let Some((path, _)) = &file {
            info!("Using config file: {}", path.display());
        }

        let env_key = env::var(API_KEY_ENV).ok();
        Ok(Self::resolve(overrides, file, env_key, &executable_dir()?))
    }

    /// Combines the configuration sources without touching the environment
    pub fn resolve(
        overrides: &Overrides,
        file: Option<(PathBuf, FileConfig)>,
        env_key: Option<String>,
        base_dir: &Path,
    ) -> Self {
        let (config_file, file) = match file {
            Some((path, contents)) => (Some(path), contents),
            None => (None, FileConfig::default()),
        };

        let api_key = resolve_api_key(
            overrides.api_key.as_deref(),
            file.apikey.as_deref(),
            env_key.as_deref(),
        );

        let cache_file = overrides
            .cache_file
            .clone()
            .or(file.cache_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE));

        let freshness = file
            .freshness_secs
            .map(FreshnessPolicy::from_secs)
            .unwrap_or_default();

        Self {
            api_key,
            cache_path: resolve_cache_path(cache_file, base_dir),
            freshness,
            endpoint: file.endpoint.unwrap_or_else(|| API_URL.to_string()),
            config_file,
        }
    }
}

/// Picks the first non-blank key: flag, then config file, then environment
pub fn resolve_api_key(
    flag: Option<&str>,
    file: Option<&str>,
    env: Option<&str>,
) -> Option<String> {
    [flag, file, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}

/// Candidate config file locations, in lookup order
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("", "", "bcncli") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

/// Reads the first existing config file from `candidates`
pub fn find_config_file(
    candidates: &[PathBuf],
) -> Result<Option<(PathBuf, FileConfig)>, ConfigError> {
    for path in candidates {
        if path.is_file() {
            return Ok(Some((path.clone(), read_config_file(path)?)));
        }
        debug!(path = %path.display(), "no config file");
    }
    Ok(None)
}

/// Parses a config file
pub fn read_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(ConfigError::ExecutableDir)?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_with_key(key: &str) -> Option<(PathBuf, FileConfig)> {
        Some((
            PathBuf::from("config.json"),
            FileConfig {
                apikey: Some(key.to_string()),
                ..Default::default()
            },
        ))
    }

    #[test]
    fn test_flag_beats_file_and_env() {
        let overrides = Overrides {
            api_key: Some("flag-key".to_string()),
            ..Default::default()
        };
        let config = Config::resolve(
            &overrides,
            file_with_key("file-key"),
            Some("env-key".to_string()),
            Path::new("/bin"),
        );
        assert_eq!(config.api_key.as_deref(), Some("flag-key"));
    }

    #[test]
    fn test_file_beats_env() {
        let config = Config::resolve(
            &Overrides::default(),
            file_with_key("file-key"),
            Some("env-key".to_string()),
            Path::new("/bin"),
        );
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.config_file, Some(PathBuf::from("config.json")));
    }

    #[test]
    fn test_env_used_when_nothing_else() {
        let config = Config::resolve(
            &Overrides::default(),
            None,
            Some("env-key".to_string()),
            Path::new("/bin"),
        );
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_blank_values_are_skipped() {
        assert_eq!(
            resolve_api_key(Some(""), Some("  "), Some("env")),
            Some("env".to_string())
        );
        assert_eq!(resolve_api_key(None, None, None), None);
    }

    #[test]
    fn test_defaults_resolve_cache_next_to_base_dir() {
        let config = Config::resolve(&Overrides::default(), None, None, Path::new("/opt/bcn"));
        assert_eq!(config.cache_path, PathBuf::from("/opt/bcn/itemid.json"));
        assert_eq!(config.freshness, FreshnessPolicy::from_secs(3600));
        assert_eq!(config.endpoint, API_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_cache_file_override_and_file_settings() {
        let file = Some((
            PathBuf::from("config.json"),
            FileConfig {
                cache_file: Some(PathBuf::from("from-file.json")),
                freshness_secs: Some(60),
                endpoint: Some("http://localhost:8080/api/data".to_string()),
                ..Default::default()
            },
        ));
        let overrides = Overrides {
            cache_file: Some(PathBuf::from("/tmp/items.json")),
            ..Default::default()
        };

        let config = Config::resolve(&overrides, file, None, Path::new("/opt/bcn"));
        assert_eq!(config.cache_path, PathBuf::from("/tmp/items.json"));
        assert_eq!(config.freshness, FreshnessPolicy::from_secs(60));
        assert_eq!(config.endpoint, "http://localhost:8080/api/data");
    }

    #[test]
    fn test_read_config_file_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"apikey": "abc", "theme": "dark", "freshnessSecs": 5}"#).unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.apikey.as_deref(), Some("abc"));
        assert_eq!(config.freshness_secs, Some(5));
    }

    #[test]
    fn test_read_config_file_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "apikey = abc").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_find_config_file_uses_first_existing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let present = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&present, r#"{"apikey": "found"}"#).unwrap();

        let (path, config) = find_config_file(&[missing, present.clone()])
            .unwrap()
            .expect("Should find a config file");
        assert_eq!(path, present);
        assert_eq!(config.apikey.as_deref(), Some("found"));

        assert!(find_config_file(&[]).unwrap().is_none());
    }

    #[test]
    fn test_search_paths_start_with_current_directory() {
        let paths = config_search_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE_NAME));
    }
}
