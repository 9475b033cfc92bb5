//! In-memory contact store
//!
//! An ordered sequence of contacts. Insertion order is kept until an explicit
//! sort. Names are not unique; lookups by name act on the first match.
//! Nothing here touches the disk or validates fields.

use crate::models::{Category, Contact, ContactPatch};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Append a contact
    pub fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// First contact whose name equals `name` exactly
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name == name)
    }

    /// Every contact whose name contains `needle` (case-sensitive), in store order
    pub fn find_containing(&self, needle: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.name_contains(needle))
            .collect()
    }

    /// Every contact in `category`, in store order
    pub fn filter_by_category(&self, category: Category) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Apply `patch` to the first contact named `name`
    ///
    /// Returns the updated contact, or `None` if no contact matched.
    pub fn update(&mut self, name: &str, patch: &ContactPatch) -> Option<&Contact> {
        let contact = self.contacts.iter_mut().find(|c| c.name == name)?;
        patch.apply(contact);
        Some(contact)
    }

    /// Remove and return the first contact named `name`
    pub fn remove(&mut self, name: &str) -> Option<Contact> {
        let index = self.contacts.iter().position(|c| c.name == name)?;
        Some(self.contacts.remove(index))
    }

    /// Stable ascending sort by name, comparing bytes
    pub fn sort_by_name(&mut self) {
        self.contacts.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}
