use std::fs;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Environment variable overriding the data root
pub const HOME_ENV: &str = "KDOCS_HOME";

/// Manages paths for kdocs configuration, credentials and cache
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory (~/.kdocs)
    pub root: PathBuf,
    /// Configuration file path (~/.kdocs/config.toml)
    pub config_file: PathBuf,
    /// Credential file path (~/.kdocs/credentials.toml)
    pub credentials_file: PathBuf,
    /// Listing cache directory (~/.kdocs/cache)
    pub cache_dir: PathBuf,
}

impl Paths {
    /// Resolve paths from `KDOCS_HOME`, falling back to `$HOME/.kdocs`
    pub fn new() -> Result<Self> {
        let root = match std::env::var(HOME_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(std::env::var("HOME")?).join(".kdocs"),
        };
        Ok(Self::with_root(root))
    }

    /// Lay out all paths under an explicit root
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config_file: root.join("config.toml"),
            credentials_file: root.join("credentials.toml"),
            cache_dir: root.join("cache"),
            root,
        }
    }

    /// Ensure the root directory exists with owner-only permissions
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}
