//! Local listing cache
//!
//! One JSON file per key under the cache directory. Each file carries the
//! time it was written, so freshness is decided per read against whatever
//! threshold the caller passes. Entries are never expired on disk: stale
//! entries stay readable until overwritten or cleared.

mod keys;

pub use keys::CacheKey;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// On-disk entry with its write time
#[derive(Debug, Serialize, Deserialize)]
struct CachedEntry<T> {
    /// Unix milliseconds at write time
    cached_at: u64,
    data: T,
}

/// Just the write time, for age checks without decoding the payload
#[derive(Deserialize)]
struct CachedStamp {
    cached_at: u64,
}

fn millis_since_epoch(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Time elapsed since a stamp, measured against the full-precision clock
///
/// A stamp in the future counts as zero age.
fn elapsed_since(cached_at: u64) -> Duration {
    UNIX_EPOCH
        .checked_add(Duration::from_millis(cached_at))
        .and_then(|written| SystemTime::now().duration_since(written).ok())
        .unwrap_or_default()
}

/// Directory-backed key-value cache
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    /// Whether an entry exists for `key`
    pub fn exists(&self, key: &CacheKey) -> bool {
        self.file(key).is_file()
    }

    /// Time since `key` was last written, `None` if absent or unreadable
    pub fn age(&self, key: &CacheKey) -> Option<Duration> {
        let data = fs::read_to_string(self.file(key)).ok()?;
        let stamp: CachedStamp = serde_json::from_str(&data).ok()?;
        Some(elapsed_since(stamp.cached_at))
    }

    /// An entry is fresh iff it exists and its age is within `max_age`
    pub fn is_fresh(&self, key: &CacheKey, max_age: Duration) -> bool {
        matches!(self.age(key), Some(age) if age <= max_age)
    }

    /// Load the payload stored under `key`
    ///
    /// Returns `Ok(None)` when there is no entry and an error when the entry
    /// cannot be read or decoded.
    pub fn load<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>> {
        let file = self.file(key);
        if !file.is_file() {
            return Ok(None);
        }
        let data = fs::read_to_string(&file)?;
        let entry: CachedEntry<T> = serde_json::from_str(&data)?;
        Ok(Some(entry.data))
    }

    /// Store `value` under `key`, stamped with the current time
    pub fn store<T: Serialize>(&self, key: &CacheKey, value: &T) -> Result<()> {
        self.store_at(key, value, SystemTime::now())
    }

    /// Store `value` under `key` with an explicit write time
    pub fn store_at<T: Serialize>(
        &self,
        key: &CacheKey,
        value: &T,
        written: SystemTime,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = CachedEntry {
            cached_at: millis_since_epoch(written),
            data: value,
        };
        let json = serde_json::to_string(&entry)?;
        fs::write(self.file(key), json)?;
        debug!(key = %key, "cache write");

        Ok(())
    }

    /// Remove every entry
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Summarize the cache contents
    pub fn status(&self) -> CacheStatus {
        let mut status = CacheStatus::default();
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return status;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            status.entries += 1;
            status.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);

            let age = fs::read_to_string(&path)
                .ok()
                .and_then(|data| serde_json::from_str::<CachedStamp>(&data).ok())
                .map(|stamp| elapsed_since(stamp.cached_at).as_secs());
            if let Some(age) = age {
                status.oldest_secs = Some(status.oldest_secs.map_or(age, |o| o.max(age)));
                status.newest_secs = Some(status.newest_secs.map_or(age, |n| n.min(age)));
            }
        }

        status
    }
}

/// Overall cache status
#[derive(Debug, Default, Serialize)]
pub struct CacheStatus {
    pub entries: usize,
    pub bytes: u64,
    /// Age of the oldest entry in seconds
    pub oldest_secs: Option<u64>,
    /// Age of the newest entry in seconds
    pub newest_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ago(secs: u64) -> SystemTime {
        SystemTime::now() - Duration::from_secs(secs)
    }

    fn epoch_plus(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn store() -> (TempDir, CacheStore) {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path().join("cache"));
        (temp_dir, cache)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load/Store Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_returns_none() {
        let (_tmp, cache) = store();
        let loaded: Option<Vec<String>> = cache.load(&CacheKey::recent()).unwrap();

        assert!(loaded.is_none());
        assert!(!cache.exists(&CacheKey::recent()));
        assert!(cache.age(&CacheKey::recent()).is_none());
    }

    #[test]
    fn test_store_creates_directory_and_loads_back() {
        let (_tmp, cache) = store();
        let key = CacheKey::query("plan");

        cache.store(&key, &vec!["a".to_string(), "b".to_string()]).unwrap();

        assert!(cache.dir().exists());
        assert!(cache.exists(&key));
        let loaded: Vec<String> = cache.load(&key).unwrap().unwrap();
        assert_eq!(loaded, vec!["a", "b"]);
    }

    #[test]
    fn test_store_overwrites_and_resets_age() {
        let (_tmp, cache) = store();
        let key = CacheKey::groups();

        cache.store_at(&key, &1, epoch_plus(1_000_000_000)).unwrap();
        assert!(cache.age(&key).unwrap() > Duration::from_secs(3600));

        cache.store(&key, &2).unwrap();
        assert!(cache.age(&key).unwrap() < Duration::from_secs(5));
        assert_eq!(cache.load::<i32>(&key).unwrap(), Some(2));
    }

    #[test]
    fn test_load_malformed_is_error() {
        let (_tmp, cache) = store();
        let key = CacheKey::recent();
        fs::create_dir_all(cache.dir()).unwrap();
        fs::write(cache.dir().join(key.as_str()), "not json").unwrap();

        assert!(cache.exists(&key));
        assert!(cache.load::<Vec<String>>(&key).is_err());
        assert!(cache.age(&key).is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Freshness Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_is_fresh_within_threshold() {
        let (_tmp, cache) = store();
        let key = CacheKey::recent();
        cache.store(&key, &0).unwrap();

        assert!(cache.is_fresh(&key, Duration::from_secs(180 * 60)));
    }

    #[test]
    fn test_is_fresh_false_when_older_than_threshold() {
        let (_tmp, cache) = store();
        let key = CacheKey::recent();
        cache.store_at(&key, &0, ago(600)).unwrap();

        assert!(!cache.is_fresh(&key, Duration::from_secs(5 * 60)));
        assert!(cache.is_fresh(&key, Duration::from_secs(15 * 60)));
    }

    #[test]
    fn test_zero_threshold_is_never_fresh() {
        let (_tmp, cache) = store();
        let key = CacheKey::query("plan");
        cache.store(&key, &0).unwrap();

        assert!(!cache.is_fresh(&key, Duration::ZERO));
        assert!(cache.age(&key).unwrap() > Duration::ZERO);
    }

    #[test]
    fn test_future_stamp_counts_as_zero_age() {
        let (_tmp, cache) = store();
        let key = CacheKey::groups();
        cache.store_at(&key, &0, SystemTime::now() + Duration::from_secs(3600)).unwrap();

        assert_eq!(cache.age(&key), Some(Duration::ZERO));
    }

    #[test]
    fn test_is_fresh_false_when_missing() {
        let (_tmp, cache) = store();
        assert!(!cache.is_fresh(&CacheKey::recent(), Duration::MAX));
    }

    #[test]
    fn test_stale_entry_still_loads() {
        let (_tmp, cache) = store();
        let key = CacheKey::query("old");
        cache.store_at(&key, &vec![1, 2, 3], epoch_plus(1_000_000_000)).unwrap();

        assert!(!cache.is_fresh(&key, Duration::from_secs(60)));
        assert_eq!(cache.load::<Vec<i32>>(&key).unwrap(), Some(vec![1, 2, 3]));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clear/Status Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_clear_removes_entries() {
        let (_tmp, cache) = store();
        cache.store(&CacheKey::recent(), &1).unwrap();
        cache.store(&CacheKey::groups(), &2).unwrap();

        cache.clear().unwrap();

        assert!(cache.dir().exists());
        assert!(!cache.exists(&CacheKey::recent()));
        assert_eq!(cache.status().entries, 0);
    }

    #[test]
    fn test_clear_without_directory() {
        let (_tmp, cache) = store();
        cache.clear().unwrap();
    }

    #[test]
    fn test_status_counts_entries_and_ages() {
        let (_tmp, cache) = store();
        cache.store(&CacheKey::recent(), &1).unwrap();
        cache.store_at(&CacheKey::groups(), &2, ago(120)).unwrap();

        let status = cache.status();
        assert_eq!(status.entries, 2);
        assert!(status.bytes > 0);
        assert!(status.oldest_secs.unwrap() >= 120);
        assert!(status.newest_secs.unwrap() < 5);
    }

    #[test]
    fn test_status_when_missing_directory() {
        let (_tmp, cache) = store();
        let status = cache.status();
        assert_eq!(status.entries, 0);
        assert!(status.oldest_secs.is_none());
    }
}
