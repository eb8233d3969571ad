//! Cache key derivation

use std::fmt;

use md5::{Digest, Md5};

const SUFFIX: &str = ".json";

/// File name of a cache entry inside the cache directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Recently opened documents
    pub fn recent() -> Self {
        Self(format!("recent{SUFFIX}"))
    }

    /// Top-level group listing
    pub fn groups() -> Self {
        Self(format!("group{SUFFIX}"))
    }

    /// Keyword search results, keyed by the raw query text
    ///
    /// Path separators are replaced so a query always maps to a single file
    /// directly under the cache directory.
    pub fn query(query: &str) -> Self {
        let name: String = query
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
            .collect();
        Self(format!("{name}{SUFFIX}"))
    }

    /// Navigation state for a folder path, keyed by the path's MD5 digest
    pub fn path(path: &str) -> Self {
        let digest = Md5::digest(path.as_bytes());
        Self(format!("{}{SUFFIX}", hex::encode(digest)))
    }

    /// Children of a folder, keyed by group id and parent id
    pub fn id_pair(group_id: &str, parent_id: &str) -> Self {
        Self(format!("{group_id}-{parent_id}{SUFFIX}"))
    }

    /// Resolved path segments of a file
    pub fn file_path(file_id: &str) -> Self {
        Self(format!("{file_id}-path{SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
