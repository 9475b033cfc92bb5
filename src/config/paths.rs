//! Path management for the contact book
//!
//! Provides XDG-compliant path resolution for the store file, settings and
//! exports.
//!
//! ## Path Resolution Order
//!
//! 1. `CONTACTBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/contact-book` or `~/.config/contact-book`
//! 3. Windows: `%APPDATA%\contact-book`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ContactError;

/// Default store file name
pub const STORE_FILE_NAME: &str = "contacts.dat";

/// Default CSV export file name
pub const CSV_FILE_NAME: &str = "contacts.csv";

/// Manages all paths used by the contact book
#[derive(Debug, Clone)]
pub struct ContactPaths {
    /// Base directory for settings and default data
    base_dir: PathBuf,
    /// Explicit store file, overriding `base_dir/contacts.dat`
    store_override: Option<PathBuf>,
}

impl ContactPaths {
    /// Create a new ContactPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ContactError> {
        let base_dir = if let Ok(custom) = std::env::var("CONTACTBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self {
            base_dir,
            store_override: None,
        })
    }

    /// Create ContactPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            store_override: None,
        }
    }

    /// Use an explicit store file instead of the default location
    pub fn with_store_file(mut self, store_file: PathBuf) -> Self {
        self.store_override = Some(store_file);
        self
    }

    /// Get the base directory (~/.config/contact-book/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the binary store file
    pub fn store_file(&self) -> PathBuf {
        self.store_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join(STORE_FILE_NAME))
    }

    /// Get the path the corrupted store is copied to (`<store>.backup`)
    pub fn backup_file(&self) -> PathBuf {
        backup_path_for(&self.store_file())
    }

    /// Get the default CSV export path, next to the store file
    pub fn csv_file(&self) -> PathBuf {
        let store = self.store_file();
        match store.parent() {
            Some(parent) => parent.join(CSV_FILE_NAME),
            None => PathBuf::from(CSV_FILE_NAME),
        }
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ContactError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ContactError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Sibling backup path for a store file: `contacts.dat` -> `contacts.dat.backup`
pub fn backup_path_for(store_file: &Path) -> PathBuf {
    let mut name: OsString = store_file.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ContactError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("contact-book"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| ContactError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("contact-book"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ContactError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ContactError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("contact-book"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.store_file(), temp_dir.path().join("contacts.dat"));
        assert_eq!(
            paths.backup_file(),
            temp_dir.path().join("contacts.dat.backup")
        );
        assert_eq!(paths.csv_file(), temp_dir.path().join("contacts.csv"));
    }

    #[test]
    fn test_store_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("work").join("book.bin");
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf())
            .with_store_file(custom.clone());

        assert_eq!(paths.store_file(), custom);
        assert_eq!(
            paths.backup_file(),
            temp_dir.path().join("work").join("book.bin.backup")
        );
        assert_eq!(
            paths.csv_file(),
            temp_dir.path().join("work").join("contacts.csv")
        );
        // Settings stay in the base directory
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("book");
        let paths = ContactPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();
        assert!(base.exists());
    }
}
