//! Cache-or-fetch loader for the item catalog

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{DataFetcher, FetchError, RequestDescriptor, Transport};
use crate::data::item::{parse_items, Item};

/// Request type for the item catalog
pub const ITEM_DATA_REQUEST: &str = "itemData";

/// File name of the catalog cache when none is configured
pub const DEFAULT_CACHE_FILE: &str = "itemid.json";

/// Default maximum age of the cache file, in seconds
pub const DEFAULT_FRESHNESS_SECS: u64 = 3600;

/// Errors that can occur when loading the item catalog
#[derive(Debug, Error)]
pub enum LoadError {
    /// Fetching the catalog from the API failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The cache file exists but could not be inspected or read
    #[error("Could not access cache file {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The payload was empty
    #[error("Item data is empty")]
    EmptyPayload,

    /// The payload was not a JSON array of items
    #[error("Failed to parse item data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How old the cache file may be before it is refetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    max_age: Duration,
}

impl FreshnessPolicy {
    /// A policy of `0` seconds always refetches
    pub fn from_secs(secs: u64) -> Self {
        Self {
            max_age: Duration::from_secs(secs),
        }
    }

    pub fn always_refetch() -> Self {
        Self::from_secs(0)
    }

    pub fn is_always_refetch(&self) -> bool {
        self.max_age.is_zero()
    }

    /// A file is stale once its age exceeds the maximum
    pub fn is_stale(&self, age: Duration) -> bool {
        age > self.max_age
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::from_secs(DEFAULT_FRESHNESS_SECS)
    }
}

/// Where loaded items came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Remote,
}

/// Result of a load, including where the data came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub items: Vec<Item>,
    pub source: Source,
    /// Whether fetched bytes were written to the cache file
    pub persisted: bool,
}

/// Resolves a cache file name against a base directory; absolute paths are kept
pub fn resolve_cache_path(file: impl AsRef<Path>, base: impl AsRef<Path>) -> PathBuf {
    let file = file.as_ref();
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.as_ref().join(file)
    }
}

/// Loads the item catalog from a cache file or the API
#[derive(Debug)]
pub struct CacheLoader<'a, T> {
    fetcher: &'a DataFetcher<T>,
    path: PathBuf,
}

impl<'a, T: Transport> CacheLoader<'a, T> {
    /// Creates a loader bound to a cache file path
    pub fn new(fetcher: &'a DataFetcher<T>, path: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, refetching when the cache is missing or stale.
    ///
    /// # Arguments
    /// * `freshness` - Maximum tolerated age of the cache file
    /// * `persist` - Whether fetched data is written back to the cache file
    pub async fn load(
        &self,
        freshness: FreshnessPolicy,
        persist: bool,
    ) -> Result<Vec<Item>, LoadError> {
        Ok(self.load_with_source(freshness, persist).await?.items)
    }

    /// Same as [`load`](Self::load), but also reports where the data came from
    pub async fn load_with_source(
        &self,
        freshness: FreshnessPolicy,
        persist: bool,
    ) -> Result<LoadOutcome, LoadError> {
        if freshness.is_always_refetch() {
            debug!("freshness is zero, refetching item data");
            return self.refresh(persist).await;
        }

        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cached item data");
                return self.refresh(persist).await;
            }
            Err(source) => return Err(self.filesystem_error(source)),
        };

        let modified = metadata
            .modified()
            .map_err(|source| self.filesystem_error(source))?;
        // A modification time in the future counts as brand new
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);

        if freshness.is_stale(age) {
            debug!(
                path = %self.path.display(),
                age_secs = age.as_secs(),
                "cached item data is stale"
            );
            return self.refresh(persist).await;
        }

        let bytes = fs::read(&self.path).map_err(|source| self.filesystem_error(source))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "using cached item data");
        Ok(LoadOutcome {
            items: parse_payload(&bytes)?,
            source: Source::Cache,
            persisted: false,
        })
    }

    /// Fetches the raw catalog JSON, writing it to the cache file when `persist` is set.
    ///
    /// Returns the bytes and whether they were written.
    pub async fn fetch_raw(&self, persist: bool) -> Result<(Vec<u8>, bool), LoadError> {
        let request = RequestDescriptor::new(ITEM_DATA_REQUEST);
        let bytes = self.fetcher.fetch(&request).await?;

        let persisted = persist && self.write_cache(&bytes);
        Ok((bytes, persisted))
    }

    async fn refresh(&self, persist: bool) -> Result<LoadOutcome, LoadError> {
        let (bytes, persisted) = self.fetch_raw(persist).await?;
        Ok(LoadOutcome {
            items: parse_payload(&bytes)?,
            source: Source::Remote,
            persisted,
        })
    }

    /// Best-effort write; failures are logged and reported as `false`
    fn write_cache(&self, bytes: &[u8]) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!(path = %parent.display(), error = %e, "could not create cache directory");
                    return false;
                }
            }
        }

        match fs::write(&self.path, bytes) {
            Ok(()) => {
                info!(path = %self.path.display(), "cached item data");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not cache item data");
                false
            }
        }
    }

    fn filesystem_error(&self, source: io::Error) -> LoadError {
        LoadError::Filesystem {
            path: self.path.clone(),
            source,
        }
    }
}

fn parse_payload(bytes: &[u8]) -> Result<Vec<Item>, LoadError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::EmptyPayload);
    }
    Ok(parse_items(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use std::fs::File;
    use tempfile::TempDir;

    const REMOTE_ITEMS: &str = r#"[{"id": 1, "name": "Seaweed"}, {"id": 2, "name": "Kiwi"}]"#;
    const CACHED_ITEMS: &str = r#"[{"id": 7, "name": "Cached Melon"}]"#;

    fn create_fetcher(body: &str) -> DataFetcher<MockTransport> {
        DataFetcher::with_transport(
            MockTransport::with_response(200, body),
            Some("test-key".to_string()),
        )
    }

    fn write_cache_file(dir: &TempDir, contents: &str, age: Duration) -> PathBuf {
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        fs::write(&path, contents).expect("Should write cache file");
        let file = File::options()
            .write(true)
            .open(&path)
            .expect("Should open cache file");
        file.set_modified(SystemTime::now() - age)
            .expect("Should set modification time");
        path
    }

    #[tokio::test]
    async fn test_zero_freshness_always_fetches() {
        let dir = TempDir::new().unwrap();
        // Unparseable contents prove the file is never read
        let path = write_cache_file(&dir, "garbage", Duration::ZERO);
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let outcome = loader
            .load_with_source(FreshnessPolicy::always_refetch(), false)
            .await
            .unwrap();

        assert_eq!(fetcher.transport().calls(), 1);
        assert_eq!(outcome.source, Source::Remote);
        assert_eq!(outcome.items.len(), 2);
        assert!(!outcome.persisted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[tokio::test]
    async fn test_fresh_file_is_read_without_fetching() {
        let dir = TempDir::new().unwrap();
        let path = write_cache_file(&dir, CACHED_ITEMS, Duration::from_secs(60));
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let outcome = loader
            .load_with_source(FreshnessPolicy::from_secs(3600), true)
            .await
            .unwrap();

        assert_eq!(fetcher.transport().calls(), 0);
        assert_eq!(outcome.source, Source::Cache);
        assert_eq!(outcome.items[0].name, "Cached Melon");
    }

    #[tokio::test]
    async fn test_stale_file_fetches_once_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = write_cache_file(&dir, CACHED_ITEMS, Duration::from_secs(7200));
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let outcome = loader
            .load_with_source(FreshnessPolicy::from_secs(3600), true)
            .await
            .unwrap();

        assert_eq!(fetcher.transport().calls(), 1);
        assert_eq!(outcome.source, Source::Remote);
        assert!(outcome.persisted);
        assert_eq!(fs::read_to_string(&path).unwrap(), REMOTE_ITEMS);
    }

    #[tokio::test]
    async fn test_missing_file_fetches_and_requests_item_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CACHE_FILE);
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let items = loader.load(FreshnessPolicy::default(), true).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(fetcher.transport().calls(), 1);
        let sent = fetcher.transport().last_request().unwrap();
        assert_eq!(sent.body, serde_json::json!({"type": "itemData"}));
        assert!(path.exists(), "Fetched data should be written to the cache");
    }

    #[tokio::test]
    async fn test_without_persist_file_is_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let outcome = loader
            .load_with_source(FreshnessPolicy::default(), false)
            .await
            .unwrap();

        assert!(!outcome.persisted);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_failure_still_returns_fetched_items() {
        let dir = TempDir::new().unwrap();
        // A directory at the cache path makes the write fail
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let outcome = loader
            .load_with_source(FreshnessPolicy::always_refetch(), true)
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 2);
        assert!(!outcome.persisted);
    }

    #[tokio::test]
    async fn test_empty_remote_payload_is_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = create_fetcher("");
        let loader = CacheLoader::new(&fetcher, dir.path().join(DEFAULT_CACHE_FILE));

        let err = loader
            .load(FreshnessPolicy::always_refetch(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::EmptyPayload));
    }

    #[tokio::test]
    async fn test_malformed_cache_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_cache_file(&dir, "{\"not\": \"a list\"}", Duration::ZERO);
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let err = loader.load(FreshnessPolicy::default(), false).await.unwrap_err();

        assert!(matches!(err, LoadError::Parse(_)));
        assert_eq!(fetcher.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_error_propagates() {
        let dir = TempDir::new().unwrap();
        let fetcher = DataFetcher::with_transport(
            MockTransport::with_response(500, "boom"),
            Some("k".to_string()),
        );
        let loader = CacheLoader::new(&fetcher, dir.path().join(DEFAULT_CACHE_FILE));

        let err = loader.load(FreshnessPolicy::default(), true).await.unwrap_err();

        assert!(matches!(
            err,
            LoadError::Fetch(FetchError::Remote { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_raw_returns_unparsed_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let (bytes, persisted) = loader.fetch_raw(true).await.unwrap();

        assert_eq!(bytes, REMOTE_ITEMS.as_bytes());
        assert!(persisted);
        assert_eq!(loader.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_uninspectable_path_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.json");
        fs::write(&file, CACHED_ITEMS).unwrap();
        // A regular file cannot have children
        let path = file.join("child");
        let fetcher = create_fetcher(REMOTE_ITEMS);
        let loader = CacheLoader::new(&fetcher, &path);

        let err = loader.load(FreshnessPolicy::default(), true).await.unwrap_err();

        match err {
            LoadError::Filesystem { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected filesystem error, got {:?}", other),
        }
        assert_eq!(fetcher.transport().calls(), 0);
    }

    #[test]
    fn test_resolve_cache_path() {
        let base = Path::new("/opt/bcncli");
        assert_eq!(
            resolve_cache_path("itemid.json", base),
            PathBuf::from("/opt/bcncli/itemid.json")
        );
        assert_eq!(
            resolve_cache_path("/var/cache/items.json", base),
            PathBuf::from("/var/cache/items.json")
        );
    }

    #[test]
    fn test_freshness_policy() {
        let policy = FreshnessPolicy::from_secs(10);
        assert!(!policy.is_always_refetch());
        assert!(!policy.is_stale(Duration::from_secs(10)));
        assert!(policy.is_stale(Duration::from_secs(11)));
        assert!(FreshnessPolicy::always_refetch().is_always_refetch());
        assert_eq!(FreshnessPolicy::default().max_age(), Duration::from_secs(3600));
    }
}
