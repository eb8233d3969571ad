//! Folder navigation state
//!
//! Every launcher invocation is a fresh process, so the group id and parent
//! id needed to list a folder either arrive with the invocation or are
//! rebuilt from entries written by earlier listings, keyed by the folder's
//! path.

use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::kdocs::GroupFile;

/// Parent id of a group root
pub const ROOT_PARENT_ID: &str = "0";

/// Resolved (group id, parent id, linked-group flag) for a folder path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub group_id: String,
    pub parent_id: String,
    pub is_link_group: bool,
}

impl NavigationState {
    /// Location that could not be resolved
    pub fn unknown() -> Self {
        Self {
            group_id: String::new(),
            parent_id: ROOT_PARENT_ID.to_string(),
            is_link_group: true,
        }
    }

    /// False for the unresolved location
    pub fn is_known(&self) -> bool {
        !self.group_id.is_empty()
    }
}

impl From<GroupFile> for NavigationState {
    fn from(entry: GroupFile) -> Self {
        Self {
            group_id: entry.group_id,
            parent_id: entry.file_id.to_string(),
            is_link_group: entry.is_link_group,
        }
    }
}

/// Rebuilds navigation state from invocation parameters or the cache
pub struct NavigationResolver<'a> {
    cache: &'a CacheStore,
}

impl<'a> NavigationResolver<'a> {
    pub fn new(cache: &'a CacheStore) -> Self {
        Self { cache }
    }

    /// Resolve where `path` points
    ///
    /// A non-empty `explicit_group_id` wins and is used with
    /// `explicit_parent_id` (root when absent). The linked-group flag is not
    /// carried by the launcher, so it comes from the recorded entry for `path`
    /// when one exists and defaults to linked otherwise. Without an explicit
    /// group id the recorded entry is used, or [`NavigationState::unknown`].
    pub fn resolve(
        &self,
        path: &str,
        explicit_group_id: Option<&str>,
        explicit_parent_id: Option<&str>,
    ) -> NavigationState {
        let recorded = self.lookup(path);

        match explicit_group_id.filter(|id| !id.is_empty()) {
            Some(group_id) => NavigationState {
                group_id: group_id.to_string(),
                parent_id: explicit_parent_id
                    .filter(|id| !id.is_empty())
                    .unwrap_or(ROOT_PARENT_ID)
                    .to_string(),
                is_link_group: recorded.map_or(true, |entry| entry.is_link_group),
            },
            None => match recorded {
                Some(entry) => entry.into(),
                None => {
                    debug!(path, "no recorded navigation state");
                    NavigationState::unknown()
                }
            },
        }
    }

    /// Recorded entry for `path`, if any
    pub fn lookup(&self, path: &str) -> Option<GroupFile> {
        match self.cache.load(&CacheKey::path(path)) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path, error = %e, "unreadable navigation state");
                None
            }
        }
    }

    /// Record where `path` points for later invocations
    pub fn record(&self, path: &str, entry: &GroupFile) {
        if let Err(e) = self.cache.store(&CacheKey::path(path), entry) {
            warn!(path, error = %e, "failed to record navigation state");
        }
    }
}

/// Join a folder path and a child name
pub fn child_path(parent: &str, name: &str) -> String {
    format!("{}/{name}", parent.trim_end_matches('/'))
}

/// `path` with its last `/`-separated segment removed, never shorter than `/`
pub fn parent_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() <= 2 {
        return "/".to_string();
    }
    format!("/{}", segments[1..segments.len() - 1].join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache() -> (TempDir, CacheStore) {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        (temp_dir, cache)
    }

    fn entry(group: &str, link: bool, file_id: i64) -> GroupFile {
        GroupFile {
            group_id: group.to_string(),
            is_link_group: link,
            file_id,
        }
    }

    #[test]
    fn test_explicit_ids_win() {
        let (_tmp, cache) = cache();
        let resolver = NavigationResolver::new(&cache);
        resolver.record("/Team", &entry("other", false, 99));

        let state = resolver.resolve("/Team", Some("g1"), Some("p1"));
        assert_eq!(state.group_id, "g1");
        assert_eq!(state.parent_id, "p1");
        assert!(!state.is_link_group);
    }

    #[test]
    fn test_explicit_group_without_parent_is_root() {
        let (_tmp, cache) = cache();
        let resolver = NavigationResolver::new(&cache);

        let state = resolver.resolve("/Team", Some("g1"), None);
        assert_eq!(state.parent_id, ROOT_PARENT_ID);
        assert!(state.is_link_group);
    }

    #[test]
    fn test_empty_explicit_group_falls_back_to_record() {
        let (_tmp, cache) = cache();
        let resolver = NavigationResolver::new(&cache);
        resolver.record("/Team/Specs", &entry("g7", false, 4242));

        let state = resolver.resolve("/Team/Specs", Some(""), Some("ignored"));
        assert_eq!(
            state,
            NavigationState {
                group_id: "g7".into(),
                parent_id: "4242".into(),
                is_link_group: false,
            }
        );
    }

    #[test]
    fn test_unknown_path_resolves_to_zero_state() {
        let (_tmp, cache) = cache();
        let state = NavigationResolver::new(&cache).resolve("/Nowhere", None, None);

        assert_eq!(state, NavigationState::unknown());
        assert!(!state.is_known());
        assert_eq!(state.parent_id, "0");
        assert!(state.is_link_group);
    }

    #[test]
    fn test_record_then_lookup_roundtrip() {
        let (_tmp, cache) = cache();
        let resolver = NavigationResolver::new(&cache);
        let recorded = entry("g", true, 1);

        resolver.record("/A/x", &recorded);
        assert_eq!(resolver.lookup("/A/x"), Some(recorded));
        assert!(cache.exists(&CacheKey::path("/A/x")));
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/A"), "/");
        assert_eq!(parent_path("/A/x"), "/A");
        assert_eq!(parent_path("/A/x/y"), "/A/x");
        assert_eq!(parent_path("/"), "/");
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("/A", "x"), "/A/x");
        assert_eq!(child_path("/", "Team"), "/Team");
    }
}
