//! Contact service
//!
//! The command API a front end calls: validates input, mutates the store, and
//! flushes the whole store to disk after every mutation. A failed flush never
//! undoes the mutation; it is logged and reported through [`Saved::durable`]
//! so the caller can warn the user, and the next flush retries.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ContactError, ContactResult};
use crate::export::{export_contacts_csv, export_contacts_json, CsvStyle};
use crate::models::{Category, Clock, Contact, ContactInput, ContactPatch};
use crate::storage::ContactRepository;

/// The result of a mutation plus whether it reached the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub value: T,
    /// False when the flush after the mutation failed
    pub durable: bool,
}

/// Outcome of a delete request for an existing contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Saved<Contact>),
    /// The contact exists but the request was not confirmed
    Cancelled,
}

/// Interpret a y/n confirmation answer
///
/// Only a bare `y` or `Y` confirms; the line terminator is ignored but any
/// other whitespace is not.
pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim_end_matches(['\n', '\r']), "y" | "Y")
}

/// Service for contact management
pub struct ContactService<'a> {
    repo: &'a mut ContactRepository,
    clock: &'a dyn Clock,
    default_category: Category,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service over a loaded repository
    pub fn new(repo: &'a mut ContactRepository, clock: &'a dyn Clock) -> Self {
        Self {
            repo,
            clock,
            default_category: Category::default(),
        }
    }

    /// Category given to new contacts whose category is left blank
    pub fn with_default_category(mut self, category: Category) -> Self {
        self.default_category = category;
        self
    }

    /// Clock used for birthday validation
    pub fn clock(&self) -> &'a dyn Clock {
        self.clock
    }

    pub fn default_category(&self) -> Category {
        self.default_category
    }

    /// Validate and append a new contact
    pub fn add_contact(&mut self, input: ContactInput) -> ContactResult<Saved<Contact>> {
        let contact = input.validate(self.clock, self.default_category)?;
        debug!(name = %contact.name, "adding contact");
        self.repo.store_mut().add(contact.clone());
        Ok(self.saved(contact))
    }

    /// All contacts, in store order
    pub fn list_contacts(&self) -> &[Contact] {
        self.repo.store().as_slice()
    }

    /// Contacts whose name contains `text` (case-sensitive), in store order
    pub fn search_by_name_substring(&self, text: &str) -> Vec<Contact> {
        self.repo
            .store()
            .find_containing(text)
            .into_iter()
            .cloned()
            .collect()
    }

    /// First contact with exactly this name
    pub fn find(&self, name: &str) -> ContactResult<Contact> {
        self.repo
            .store()
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| ContactError::not_found(name))
    }

    /// Update the first contact named `name`
    ///
    /// Every provided field is validated with the rules used on add; nothing
    /// changes if any check fails.
    pub fn edit_contact(&mut self, name: &str, patch: ContactPatch) -> ContactResult<Saved<Contact>> {
        if self.repo.store().find_by_name(name).is_none() {
            return Err(ContactError::not_found(name));
        }
        patch.validate(self.clock)?;

        let updated = self
            .repo
            .store_mut()
            .update(name, &patch)
            .cloned()
            .ok_or_else(|| ContactError::not_found(name))?;
        debug!(name, new_name = %updated.name, "updated contact");
        Ok(self.saved(updated))
    }

    /// Delete the first contact named `name` if `confirmed`
    pub fn delete_contact(&mut self, name: &str, confirmed: bool) -> ContactResult<DeleteOutcome> {
        if self.repo.store().find_by_name(name).is_none() {
            return Err(ContactError::not_found(name));
        }
        if !confirmed {
            debug!(name, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = self
            .repo
            .store_mut()
            .remove(name)
            .ok_or_else(|| ContactError::not_found(name))?;
        debug!(name, "deleted contact");
        Ok(DeleteOutcome::Deleted(self.saved(removed)))
    }

    /// Sort the store by name (stable, bytewise)
    pub fn sort_by_name(&mut self) -> Saved<()> {
        self.repo.store_mut().sort_by_name();
        debug!("sorted contacts by name");
        self.saved(())
    }

    /// Contacts in `category`, in store order
    pub fn filter_by_category(&self, category: Category) -> Vec<Contact> {
        self.repo
            .store()
            .filter_by_category(category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Write a CSV snapshot to `path`; returns the number of contacts written
    pub fn export_csv(&self, path: &Path, style: CsvStyle) -> ContactResult<usize> {
        let contacts = self.list_contacts();
        let mut writer = create_export_file(path)?;
        export_contacts_csv(contacts, &mut writer, style)?;
        Ok(contacts.len())
    }

    /// Write a JSON export to `path`; returns the number of contacts written
    pub fn export_json(&self, path: &Path) -> ContactResult<usize> {
        let contacts = self.list_contacts();
        let mut writer = create_export_file(path)?;
        export_contacts_json(contacts, &mut writer)?;
        writer
            .flush()
            .map_err(|e| ContactError::Export(e.to_string()))?;
        Ok(contacts.len())
    }

    /// Write the store to disk; returns false (after logging) on failure
    pub fn flush(&self) -> bool {
        match self.repo.save() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, path = %self.repo.path().display(), "changes may not have been saved");
                false
            }
        }
    }

    fn saved<T>(&self, value: T) -> Saved<T> {
        Saved {
            value,
            durable: self.flush(),
        }
    }
}

fn create_export_file(path: &Path) -> ContactResult<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| ContactError::Io(format!("Could not create {}: {}", path.display(), e)))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedClock;
    use std::fs;
    use tempfile::TempDir;

    const CLOCK: FixedClock = FixedClock(2025);

    fn create_test_repo() -> (TempDir, ContactRepository) {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = ContactRepository::new(temp_dir.path().join("contacts.dat"));
        repo.load();
        (temp_dir, repo)
    }

    fn input(name: &str) -> ContactInput {
        ContactInput {
            name: name.into(),
            phone: "+441234567890".into(),
            email: "someone@example.com".into(),
            ..Default::default()
        }
    }

    fn reload(temp_dir: &TempDir) -> ContactRepository {
        let mut repo = ContactRepository::new(temp_dir.path().join("contacts.dat"));
        repo.load();
        repo
    }

    #[test]
    fn test_add_persists_immediately() {
        let (temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);

        let saved = service.add_contact(input("Alice")).unwrap();
        assert!(saved.durable);
        assert_eq!(saved.value.category, Category::Personal);

        let reloaded = reload(&temp_dir);
        assert_eq!(reloaded.store().len(), 1);
        assert_eq!(reloaded.store().as_slice()[0].name, "Alice");
    }

    #[test]
    fn test_add_rejects_invalid_field() {
        let (temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);

        let mut bad = input("Alice");
        bad.phone = "0123456789".into();
        let err = service.add_contact(bad).unwrap_err();
        assert_eq!(err.field(), Some("phone"));
        assert!(service.list_contacts().is_empty());
        assert!(!temp_dir.path().join("contacts.dat").exists());
    }

    #[test]
    fn test_default_category_applies() {
        let (_temp_dir, mut repo) = create_test_repo();
        let mut service =
            ContactService::new(&mut repo, &CLOCK).with_default_category(Category::Family);

        let saved = service.add_contact(input("Alice")).unwrap();
        assert_eq!(saved.value.category, Category::Family);
    }

    #[test]
    fn test_search_by_substring() {
        let (_temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);
        for name in ["Alice", "bob", "Alicia"] {
            service.add_contact(input(name)).unwrap();
        }

        let names: Vec<_> = service
            .search_by_name_substring("Ali")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Alice", "Alicia"]);
    }

    #[test]
    fn test_edit_revalidates_and_persists() {
        let (temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);
        service.add_contact(input("Alice")).unwrap();

        let bad = ContactPatch {
            phone: Some("+15550001111".into()),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let err = service.edit_contact("Alice", bad).unwrap_err();
        assert_eq!(err.field(), Some("email"));
        assert_eq!(service.find("Alice").unwrap().phone, "+441234567890");

        let good = ContactPatch {
            name: Some("Alicia".into()),
            phone: Some("+15550001111".into()),
            ..Default::default()
        };
        let saved = service.edit_contact("Alice", good).unwrap();
        assert_eq!(saved.value.name, "Alicia");
        assert_eq!(saved.value.email, "someone@example.com");

        let reloaded = reload(&temp_dir);
        assert_eq!(reloaded.store().as_slice()[0].phone, "+15550001111");
    }

    #[test]
    fn test_edit_missing_is_not_found() {
        let (_temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);
        let err = service
            .edit_contact("Nobody", ContactPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);
        service.add_contact(input("Sam")).unwrap();
        let mut second = input("Sam");
        second.notes = "second".into();
        service.add_contact(second).unwrap();

        let outcome = service.delete_contact("Sam", is_confirmed("n")).unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(service.list_contacts().len(), 2);

        let outcome = service.delete_contact("Sam", is_confirmed("y")).unwrap();
        match outcome {
            DeleteOutcome::Deleted(saved) => {
                assert_eq!(saved.value.notes, "");
                assert!(saved.durable);
            }
            DeleteOutcome::Cancelled => panic!("expected deletion"),
        }
        assert_eq!(service.list_contacts().len(), 1);
        assert_eq!(service.list_contacts()[0].notes, "second");
        assert_eq!(reload(&temp_dir).store().len(), 1);

        assert!(service
            .delete_contact("Nobody", true)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_confirmed("y"));
        assert!(is_confirmed("Y"));
        assert!(is_confirmed("y\n"));
        assert!(!is_confirmed("n"));
        assert!(!is_confirmed("yes"));
        assert!(!is_confirmed(""));
        assert!(!is_confirmed(" y "));
        assert!(!is_confirmed("y "));
        assert!(is_confirmed("Y\r\n"));
    }

    #[test]
    fn test_sort_and_filter() {
        let (temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);
        for (name, category) in [("Zed", "Work"), ("amy", ""), ("Bea", "Work")] {
            let mut i = input(name);
            i.category = category.into();
            service.add_contact(i).unwrap();
        }

        assert!(service.sort_by_name().durable);
        let names: Vec<_> = service.list_contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Bea", "Zed", "amy"]);

        let work: Vec<_> = service
            .filter_by_category(Category::Work)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(work, ["Bea", "Zed"]);

        let reloaded = reload(&temp_dir);
        assert_eq!(reloaded.store().as_slice()[0].name, "Bea");
    }

    #[test]
    fn test_flush_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();
        let mut repo = ContactRepository::new(blocker.join("contacts.dat"));
        repo.load();

        let mut service = ContactService::new(&mut repo, &CLOCK);
        let saved = service.add_contact(input("Alice")).unwrap();
        assert!(!saved.durable);
        assert_eq!(service.list_contacts().len(), 1);
    }

    #[test]
    fn test_export_csv_and_json() {
        let (temp_dir, mut repo) = create_test_repo();
        let mut service = ContactService::new(&mut repo, &CLOCK);
        let mut i = input("Alice");
        i.address = "1 Main St, Springfield".into();
        service.add_contact(i).unwrap();

        let csv_path = temp_dir.path().join("contacts.csv");
        assert_eq!(service.export_csv(&csv_path, CsvStyle::Quoted).unwrap(), 1);
        let csv = fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("Name,Category,Phone,Email,Address,Birthday,Notes\n"));
        assert!(csv.contains("\"1 Main St, Springfield\""));

        let json_path = temp_dir.path().join("contacts.json");
        assert_eq!(service.export_json(&json_path).unwrap(), 1);
        assert!(fs::read_to_string(&json_path).unwrap().contains("\"Alice\""));

        let bad_path = temp_dir.path().join("missing").join("out.csv");
        assert!(matches!(
            service.export_csv(&bad_path, CsvStyle::Raw),
            Err(ContactError::Io(_))
        ));
    }
}
