//! Contact repository for the binary store file
//!
//! Owns the in-memory [`ContactStore`] and moves it to and from disk. Loading
//! never fails: a missing file yields an empty store, and an unreadable or
//! corrupted file is copied to `<store>.backup` before starting empty.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::codec;
use super::file_io::{copy_file, read_bytes, write_bytes_atomic};
use super::store::ContactStore;
use crate::config::paths::backup_path_for;
use crate::error::ContactResult;

/// What happened when the store file was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No store file yet; started empty
    Missing,
    /// Loaded this many contacts
    Loaded(usize),
    /// The file could not be read or decoded; started empty
    Recovered {
        reason: String,
        /// Where the original bytes were copied, if the copy succeeded
        backup: Option<PathBuf>,
    },
}

/// Repository for contact persistence
pub struct ContactRepository {
    path: PathBuf,
    store: ContactStore,
}

impl ContactRepository {
    /// Create a repository backed by `path`, starting empty
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            store: ContactStore::new(),
        }
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the store file is copied to on corruption
    pub fn backup_path(&self) -> PathBuf {
        backup_path_for(&self.path)
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ContactStore {
        &mut self.store
    }

    /// Replace the in-memory store with the contents of the store file
    pub fn load(&mut self) -> LoadOutcome {
        self.store.clear();

        let decoded = match read_bytes(&self.path) {
            Ok(None) => {
                info!(path = %self.path.display(), "no store file yet, starting empty");
                return LoadOutcome::Missing;
            }
            Ok(Some(bytes)) => codec::decode(&bytes),
            Err(e) => Err(e),
        };

        match decoded {
            Ok(contacts) => {
                let count = contacts.len();
                self.store = ContactStore::from_contacts(contacts);
                info!(path = %self.path.display(), count, "loaded contacts");
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(path = %self.path.display(), %reason, "store file unusable, starting empty");
                let backup = self.backup_corrupt_file();
                LoadOutcome::Recovered { reason, backup }
            }
        }
    }

    /// Write the whole store to disk, replacing the previous file
    pub fn save(&self) -> ContactResult<()> {
        let bytes = codec::encode(self.store.as_slice());
        write_bytes_atomic(&self.path, &bytes)?;
        info!(path = %self.path.display(), count = self.store.len(), "saved contacts");
        Ok(())
    }

    fn backup_corrupt_file(&self) -> Option<PathBuf> {
        let backup = self.backup_path();
        match copy_file(&self.path, &backup) {
            Ok(_) => {
                warn!(backup = %backup.display(), "copied unreadable store file");
                Some(backup)
            }
            Err(e) => {
                error!(error = %e, "failed to back up unreadable store file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Contact};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ContactRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.dat");
        let repo = ContactRepository::new(path);
        (temp_dir, repo)
    }

    fn sample(name: &str) -> Contact {
        let mut contact = Contact::new(name, "+12345678901", "person@example.com");
        contact.address = "Flat 2, 10 High St".into();
        contact.notes = "naïve café ☕".into();
        contact
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (temp_dir, mut repo) = create_test_repo();
        assert_eq!(repo.load(), LoadOutcome::Missing);
        assert!(repo.store().is_empty());
        assert!(!temp_dir.path().join("contacts.dat.backup").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, mut repo) = create_test_repo();
        repo.load();

        for count in [0usize, 1, 3] {
            repo.store_mut().clear();
            for i in 0..count {
                repo.store_mut()
                    .add(sample(&format!("Person {}", i)).with_category(Category::Family));
            }
            repo.save().unwrap();

            let mut repo2 = ContactRepository::new(temp_dir.path().join("contacts.dat"));
            assert_eq!(repo2.load(), LoadOutcome::Loaded(count));
            assert_eq!(repo2.store(), repo.store());
        }
    }

    #[test]
    fn test_truncated_file_is_backed_up() {
        let (temp_dir, mut repo) = create_test_repo();
        repo.store_mut().add(sample("Alice"));
        repo.store_mut().add(sample("Bob"));
        repo.save().unwrap();

        let full = fs::read(repo.path()).unwrap();
        let truncated = &full[..full.len() - 5];
        fs::write(repo.path(), truncated).unwrap();

        let outcome = repo.load();
        let backup = temp_dir.path().join("contacts.dat.backup");
        match outcome {
            LoadOutcome::Recovered { backup: Some(path), .. } => assert_eq!(path, backup),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(repo.store().is_empty());
        assert_eq!(fs::read(&backup).unwrap(), truncated);
    }

    #[test]
    fn test_backup_is_overwritten_on_next_corruption() {
        let (temp_dir, mut repo) = create_test_repo();
        let backup = temp_dir.path().join("contacts.dat.backup");

        fs::write(repo.path(), b"first garbage").unwrap();
        repo.load();
        assert_eq!(fs::read(&backup).unwrap(), b"first garbage");

        fs::write(repo.path(), b"xx").unwrap();
        repo.load();
        assert_eq!(fs::read(&backup).unwrap(), b"xx");
    }

    #[test]
    fn test_unreadable_path_recovers_empty() {
        let (temp_dir, _) = create_test_repo();
        // A directory exists at the store path but cannot be read as a file
        let dir_path = temp_dir.path().join("contacts.dat");
        fs::create_dir(&dir_path).unwrap();

        let mut repo = ContactRepository::new(dir_path);
        let outcome = repo.load();
        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
        assert!(repo.store().is_empty());
    }

    #[test]
    fn test_save_failure_keeps_memory() {
        let (temp_dir, _) = create_test_repo();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a dir").unwrap();

        let mut repo = ContactRepository::new(blocker.join("contacts.dat"));
        repo.store_mut().add(sample("Alice"));
        assert!(repo.save().is_err());
        assert_eq!(repo.store().len(), 1);
    }
}
