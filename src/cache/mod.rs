//! Local cache for the item catalog
//!
//! The item catalog is stored as the raw API response in a single JSON file.
//! [`CacheLoader`] decides, from the file's modification time and a
//! [`FreshnessPolicy`], whether to read that file or refetch the catalog.
//! Cache writes are best-effort: a failed write is logged and the freshly
//! fetched data is still returned.

mod loader;

pub use loader::{
    resolve_cache_path, CacheLoader, FreshnessPolicy, LoadError, LoadOutcome, Source,
    DEFAULT_CACHE_FILE, DEFAULT_FRESHNESS_SECS, ITEM_DATA_REQUEST,
};
