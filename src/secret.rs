//! Session credential storage
//!
//! The core only needs get/set/delete on string secrets. The file store keeps
//! them in an owner-only TOML file next to the configuration.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use tracing::debug;

use crate::error::{KdocsError, Result};

/// Key under which the kdocs session id is stored
pub const SESSION_KEY: &str = "wps_sid";

/// Key-value secret store
pub trait SecretStore {
    /// Fetch a secret, `None` if it was never set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store or overwrite a secret
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a secret; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

/// Secrets persisted in a 0600 TOML file
pub struct FileSecretStore {
    file: PathBuf,
}

impl FileSecretStore {
    pub fn new(file: impl AsRef<Path>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.file.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.file)?;
        toml::from_str(&contents)
            .map_err(|e| KdocsError::Secret(format!("{}: {e}", self.file.display())))
    }

    fn write_all(&self, secrets: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.file, toml::to_string(secrets)?)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file, perms)?;
        }

        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key).filter(|v| !v.is_empty()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut secrets = self.read_all()?;
        secrets.insert(key.to_string(), value.to_string());
        self.write_all(&secrets)?;
        debug!(key, "stored secret");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut secrets = self.read_all()?;
        if secrets.remove(key).is_some() {
            self.write_all(&secrets)?;
            debug!(key, "deleted secret");
        }
        Ok(())
    }
}

/// In-process store, used when nothing should touch disk
#[derive(Default)]
pub struct MemorySecretStore {
    secrets: RefCell<BTreeMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session id
    pub fn with_session(sid: &str) -> Self {
        let store = Self::new();
        store
            .secrets
            .borrow_mut()
            .insert(SESSION_KEY.to_string(), sid.to_string());
        store
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.secrets.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.secrets
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.secrets.borrow_mut().remove(key);
        Ok(())
    }
}
