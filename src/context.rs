//! Invocation parameters and the context threaded through commands
//!
//! The launcher starts a fresh process for every keystroke, so everything an
//! invocation knows arrives as the query text plus a handful of optional
//! parameters. Navigation ids absent from those parameters are recovered
//! from the state recorded by earlier listings.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::{CacheConfig, Config, ListingKind, Paths};
use crate::error::{KdocsError, Result};
use crate::kdocs::{DocsApi, KdocsClient};
use crate::listing::Listings;
use crate::output::Locations;
use crate::secret::{FileSecretStore, SecretStore, SESSION_KEY};

/// Everything one launcher invocation supplies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub query: String,
    pub group_id: Option<String>,
    pub file_id: Option<String>,
    /// Id of the folder enclosing the current one, for the ".." entry
    pub parent_file_id: Option<String>,
    /// Directory the desktop client syncs documents into
    pub wps_cache_dir: String,
    /// Staleness thresholds in minutes that win over the config file
    pub max_age_overrides: BTreeMap<ListingKind, u64>,
}

impl Invocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Read threshold overrides from the process environment
    pub fn with_env_overrides(mut self) -> Self {
        self.max_age_overrides = overrides_from(|key| std::env::var(key).ok());
        self
    }

    /// Configured thresholds with this invocation's overrides applied
    pub fn thresholds(&self, base: &CacheConfig) -> CacheConfig {
        self.max_age_overrides
            .iter()
            .fold(base.clone(), |config, (kind, minutes)| config.with_minutes(*kind, *minutes))
    }
}

/// Collect threshold overrides through `lookup`, skipping unparseable values
pub fn overrides_from<F>(lookup: F) -> BTreeMap<ListingKind, u64>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = BTreeMap::new();
    for kind in ListingKind::ALL {
        let Some(raw) = lookup(kind.env_key()) else {
            continue;
        };
        match raw.trim().parse::<u64>() {
            Ok(minutes) => {
                debug!(%kind, minutes, "threshold override");
                overrides.insert(kind, minutes);
            }
            Err(_) => warn!(key = kind.env_key(), value = %raw, "ignoring unparseable threshold"),
        }
    }
    overrides
}

/// Collaborators shared by every command, built once per process
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub cache: CacheStore,
    pub secrets: Box<dyn SecretStore>,
    pub api: Box<dyn DocsApi>,
}

impl Context {
    /// Build the context from the config and credential files under `paths`
    pub fn load(paths: Paths) -> Result<Self> {
        let config = Config::load_from(&paths)?;
        let api = KdocsClient::new(&config)?;
        let secrets = FileSecretStore::new(&paths.credentials_file);
        Ok(Self::new(paths, config, Box::new(secrets), Box::new(api)))
    }

    pub fn new(
        paths: Paths,
        config: Config,
        secrets: Box<dyn SecretStore>,
        api: Box<dyn DocsApi>,
    ) -> Self {
        Self {
            cache: CacheStore::new(&paths.cache_dir),
            paths,
            config,
            secrets,
            api,
        }
    }

    /// Listings using this invocation's thresholds
    pub fn listings(&self, invocation: &Invocation) -> Listings<'_> {
        Listings::new(
            self.api.as_ref(),
            &self.cache,
            self.secrets.as_ref(),
            invocation.thresholds(&self.config.cache),
        )
    }

    pub fn locations(&self, invocation: &Invocation) -> Locations {
        Locations {
            open_url: self.config.api.open_url.clone(),
            cache_dir: invocation.wps_cache_dir.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self
            .secrets
            .get(SESSION_KEY)?
            .is_some_and(|sid| !sid.is_empty()))
    }

    /// Store the session id
    pub fn login(&self, sid: &str) -> Result<()> {
        let sid = sid.trim();
        if sid.is_empty() {
            return Err(KdocsError::InvalidArgument(
                "session id cannot be empty".to_string(),
            ));
        }
        self.paths.ensure_dirs()?;
        self.secrets.set(SESSION_KEY, sid)?;
        info!("session stored");
        Ok(())
    }

    /// Forget the session id and everything cached under it
    pub fn logout(&self) -> Result<()> {
        self.secrets.delete(SESSION_KEY)?;
        self.cache.clear()?;
        info!("session removed and cache cleared");
        Ok(())
    }
}
