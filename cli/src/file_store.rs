//! Credentials persisted as a flat JSON object on disk.
//!
//! The file mirrors browser `localStorage`: the same `adminToken` /
//! `adminData` keys, string values. Every call reads or rewrites the whole
//! file; it holds two entries.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use medinfo::{CredentialStore, StoreError};

/// Location used when neither `--credentials` nor `MEDQR_CREDENTIALS` is set.
pub fn default_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(".medqr").join("credentials.json")
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Unavailable(format!("{}: {e}", self.path.display()))),
        }
    }

    fn write(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_error = |message: String| StoreError::Write { key: key.to_owned(), message };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|e| write_error(e.to_string()))?;
        fs::write(&self.path, rendered).map_err(|e| write_error(e.to_string()))?;
        restrict_to_owner(&self.path).map_err(|e| write_error(e.to_string()))
    }
}

/// The file holds a bearer token: owner read/write only.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!(error = %e, "credentials file unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is overwritten.
        let mut entries = self.read().unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(key, &entries)
    }

    fn remove(&self, key: &str) {
        let Ok(mut entries) = self.read() else {
            return;
        };
        if entries.remove(key).is_none() {
            return;
        }
        let result = if entries.is_empty() {
            fs::remove_file(&self.path).map_err(|e| StoreError::Write { key: key.to_owned(), message: e.to_string() })
        } else {
            self.write(key, &entries)
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to update credentials file");
        }
    }
}
