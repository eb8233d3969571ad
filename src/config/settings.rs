use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::time::Duration;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::Paths;
use crate::error::{KdocsError, Result};

/// Default remote API root
pub const DEFAULT_BASE_URL: &str = "https://www.kdocs.cn/3rd/drive/api";

/// Default web root for "open in browser" links
pub const DEFAULT_OPEN_URL: &str = "https://www.kdocs.cn";

/// Default staleness threshold in minutes
pub const DEFAULT_MAX_AGE_MINS: u64 = 180;

/// The listing operations, each with its own staleness threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListingKind {
    Recent,
    Search,
    Groups,
    Folder,
    FilePath,
}

impl ListingKind {
    pub const ALL: [ListingKind; 5] = [
        Self::Recent,
        Self::Search,
        Self::Groups,
        Self::Folder,
        Self::FilePath,
    ];

    /// Per-invocation environment override, in minutes
    pub fn env_key(self) -> &'static str {
        match self {
            Self::Recent => "latest_expire_mins",
            Self::Search => "query_expire_mins",
            Self::Groups => "groups_expire_mins",
            Self::Folder => "group_file_expire_mins",
            Self::FilePath => "file_path_expire_mins",
        }
    }

    /// Key under the `[cache]` table
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Recent => "recent_mins",
            Self::Search => "search_mins",
            Self::Groups => "groups_mins",
            Self::Folder => "folder_mins",
            Self::FilePath => "file_path_mins",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recent => "recent",
            Self::Search => "search",
            Self::Groups => "groups",
            Self::Folder => "folder",
            Self::FilePath => "file-path",
        };
        f.write_str(name)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Cache staleness thresholds
    #[serde(default)]
    pub cache: CacheConfig,
}

/// API-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Remote API root
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Web root used for document links
    #[serde(default = "default_open_url")]
    pub open_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_open_url() -> String {
    DEFAULT_OPEN_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            open_url: default_open_url(),
        }
    }
}

/// Staleness thresholds in minutes, one per listing kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_age")]
    pub recent_mins: u64,
    #[serde(default = "default_max_age")]
    pub search_mins: u64,
    #[serde(default = "default_max_age")]
    pub groups_mins: u64,
    #[serde(default = "default_max_age")]
    pub folder_mins: u64,
    #[serde(default = "default_max_age")]
    pub file_path_mins: u64,
}

fn default_max_age() -> u64 {
    DEFAULT_MAX_AGE_MINS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            recent_mins: DEFAULT_MAX_AGE_MINS,
            search_mins: DEFAULT_MAX_AGE_MINS,
            groups_mins: DEFAULT_MAX_AGE_MINS,
            folder_mins: DEFAULT_MAX_AGE_MINS,
            file_path_mins: DEFAULT_MAX_AGE_MINS,
        }
    }
}

impl CacheConfig {
    /// Configured threshold for a listing kind, in minutes
    pub fn minutes(&self, kind: ListingKind) -> u64 {
        match kind {
            ListingKind::Recent => self.recent_mins,
            ListingKind::Search => self.search_mins,
            ListingKind::Groups => self.groups_mins,
            ListingKind::Folder => self.folder_mins,
            ListingKind::FilePath => self.file_path_mins,
        }
    }

    fn minutes_mut(&mut self, kind: ListingKind) -> &mut u64 {
        match kind {
            ListingKind::Recent => &mut self.recent_mins,
            ListingKind::Search => &mut self.search_mins,
            ListingKind::Groups => &mut self.groups_mins,
            ListingKind::Folder => &mut self.folder_mins,
            ListingKind::FilePath => &mut self.file_path_mins,
        }
    }

    /// Replace the threshold for one listing kind
    pub fn with_minutes(mut self, kind: ListingKind, minutes: u64) -> Self {
        *self.minutes_mut(kind) = minutes;
        self
    }

    /// Configured threshold as a duration, saturating for huge minute counts
    pub fn max_age(&self, kind: ListingKind) -> Duration {
        Duration::from_secs(self.minutes(kind).saturating_mul(60))
    }
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }

    /// Set a value by dotted key (`api.base_url`, `cache.search_mins`, ...)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = parse_url(value)?,
            "api.open_url" => self.api.open_url = parse_url(value)?,
            _ => {
                let kind = key
                    .strip_prefix("cache.")
                    .and_then(|k| ListingKind::ALL.into_iter().find(|kind| kind.config_key() == k))
                    .ok_or_else(|| {
                        KdocsError::InvalidArgument(format!("Unknown config key: {key}"))
                    })?;
                let minutes = value.parse::<u64>().map_err(|_| {
                    KdocsError::InvalidArgument(format!(
                        "{key} expects a number of minutes, got '{value}'"
                    ))
                })?;
                *self.cache.minutes_mut(kind) = minutes;
            }
        }
        Ok(())
    }
}

fn parse_url(value: &str) -> Result<String> {
    url::Url::parse(value)
        .map_err(|e| KdocsError::InvalidArgument(format!("Invalid URL '{value}': {e}")))?;
    Ok(value.trim_end_matches('/').to_string())
}
