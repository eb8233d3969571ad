//! Listing orchestration
//!
//! Each listing follows the same read-through protocol: load whatever is
//! cached as the baseline, return it untouched when it is fresh, otherwise
//! ask the remote API. A successful fetch replaces the baseline and the cache
//! entry; a failed one keeps the baseline and reports the failure alongside
//! it.

mod folder;

pub use folder::{FolderEntry, FolderListing};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::config::{CacheConfig, ListingKind};
use crate::error::{KdocsError, Result};
use crate::kdocs::{Doc, DocsApi, Group, GroupFile, LatestFile, PathSegment};
use crate::navigation::{child_path, NavigationResolver};
use crate::secret::{SecretStore, SESSION_KEY};

/// Local folder name the desktop client syncs shared groups into
pub const TEAM_DOCS_DIR: &str = "团队文档";

/// Local folder name the desktop client syncs personal documents into
pub const MY_DOCS_DIR: &str = "我的云文档";

/// Why a listing could not be refreshed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The remote call or its decoding failed
    Remote(String),
    /// The folder path has no known group id
    UnknownLocation(String),
}

/// Listing data plus how it was obtained
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    /// True when `data` came from the remote API during this call
    pub refreshed: bool,
    pub failure: Option<Failure>,
}

impl<T> Fetched<T> {
    fn cached(data: T) -> Self {
        Self {
            data,
            refreshed: false,
            failure: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            refreshed: self.refreshed,
            failure: self.failure,
        }
    }
}

/// Cache-backed access to the four listings plus path resolution
pub struct Listings<'a> {
    api: &'a dyn DocsApi,
    cache: &'a CacheStore,
    secrets: &'a dyn SecretStore,
    thresholds: CacheConfig,
}

impl<'a> Listings<'a> {
    pub fn new(
        api: &'a dyn DocsApi,
        cache: &'a CacheStore,
        secrets: &'a dyn SecretStore,
        thresholds: CacheConfig,
    ) -> Self {
        Self {
            api,
            cache,
            secrets,
            thresholds,
        }
    }

    /// Stored session id, or [`KdocsError::AuthMissing`]
    pub fn session(&self) -> Result<String> {
        self.secrets
            .get(SESSION_KEY)?
            .filter(|sid| !sid.is_empty())
            .ok_or(KdocsError::AuthMissing)
    }

    pub fn resolver(&self) -> NavigationResolver<'a> {
        NavigationResolver::new(self.cache)
    }

    /// Serve `key` from the cache when fresh, otherwise refresh via `fetch`
    fn read_through<T, F>(&self, kind: ListingKind, key: &CacheKey, fetch: F) -> Fetched<T>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce() -> Result<T>,
    {
        let cached = match self.cache.load::<T>(key) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(%kind, key = %key, error = %e, "discarding unreadable cache entry");
                None
            }
        };

        let max_age = self.thresholds.max_age(kind);
        let fresh = cached.is_some() && self.cache.is_fresh(key, max_age);
        let mut fetched = Fetched::cached(cached.unwrap_or_default());
        if fresh {
            debug!(%kind, key = %key, "cache hit");
            return fetched;
        }

        debug!(%kind, key = %key, "cache stale or missing, refreshing");
        match fetch() {
            Ok(data) => {
                if let Err(e) = self.cache.store(key, &data) {
                    warn!(%kind, key = %key, error = %e, "failed to write cache entry");
                }
                fetched.data = data;
                fetched.refreshed = true;
            }
            Err(e) => {
                warn!(%kind, error = %e, "query failed, serving cached data");
                fetched.failure = Some(Failure::Remote(e.to_string()));
            }
        }
        fetched
    }

    /// Recently opened documents
    pub fn recent(&self) -> Result<Fetched<Vec<LatestFile>>> {
        let sid = self.session()?;
        Ok(self.read_through(ListingKind::Recent, &CacheKey::recent(), || {
            self.api.recent(&sid)
        }))
    }

    /// Documents matching a keyword
    pub fn search(&self, query: &str) -> Result<Fetched<Vec<Doc>>> {
        let sid = self.session()?;
        Ok(self.read_through(ListingKind::Search, &CacheKey::query(query), || {
            self.api.search(&sid, query).map(|resp| resp.files)
        }))
    }

    /// Top-level groups
    ///
    /// A refresh also records navigation state for each group at `/<name>`,
    /// so browsing into a group works without ids from the launcher.
    pub fn groups(&self) -> Result<Fetched<Vec<Group>>> {
        let sid = self.session()?;
        let fetched = self.read_through(ListingKind::Groups, &CacheKey::groups(), || {
            self.api.groups(&sid).map(|resp| resp.files)
        });

        if fetched.refreshed {
            let resolver = self.resolver();
            for group in &fetched.data {
                resolver.record(
                    &child_path("/", &group.file.fname),
                    &GroupFile {
                        group_id: group.effective_group_id().to_string(),
                        is_link_group: group.is_link_group(),
                        file_id: group.file.id,
                    },
                );
            }
            info!(groups = fetched.data.len(), "recorded group navigation state");
        }

        Ok(fetched)
    }

    /// Path segments from the group root to `file_id`
    pub fn file_path(&self, group_id: i64, file_id: &str) -> Result<Fetched<Vec<PathSegment>>> {
        let sid = self.session()?;
        Ok(self.read_through(ListingKind::FilePath, &CacheKey::file_path(file_id), || {
            self.api.file_path(&sid, group_id, file_id).map(|resp| resp.path)
        }))
    }
}

/// Display path for resolved segments, as synced under the local cache dir
///
/// Paths inside a shared group live under the team documents folder.
pub fn display_path(segments: &[PathSegment]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 1);
    for (index, segment) in segments.iter().enumerate() {
        if index == 0 && segment.kind == "linkfolder" {
            parts.push(TEAM_DOCS_DIR);
        }
        parts.push(&segment.fname);
    }
    format!("/{}", parts.join("/"))
}
