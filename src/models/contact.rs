//! Contact model
//!
//! A contact is one address-book entry with seven text fields. Values are
//! validated when a contact is built from user input ([`ContactInput`]) or
//! edited ([`ContactPatch`]); reads never re-validate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::validation::{is_valid_date, is_valid_email, is_valid_phone, Clock};
use crate::error::{ContactError, ContactResult};

/// One address-book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Human-facing key; never empty, not unique
    pub name: String,

    /// International phone number (optional `+`, 8-15 digits)
    pub phone: String,

    /// Email address
    pub email: String,

    /// Free-form postal address
    #[serde(default)]
    pub address: String,

    /// `DD/MM/YYYY`, or empty when unset
    #[serde(default)]
    pub birthday: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    pub category: Category,
}

impl Contact {
    /// Create a contact with the required fields and default category
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: String::new(),
            birthday: String::new(),
            notes: String::new(),
            category: Category::default(),
        }
    }

    /// Builder-style category setter
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Whether the name contains `needle` (case-sensitive)
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.contains(needle)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Raw, unvalidated fields for a new contact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub birthday: String,
    pub notes: String,
    /// Blank means "use the default category"
    pub category: String,
}

impl ContactInput {
    /// Validate every field and build a contact
    ///
    /// Fields are checked in entry order and the first failure is returned.
    pub fn validate(self, clock: &dyn Clock, default_category: Category) -> ContactResult<Contact> {
        check_name(&self.name)?;
        check_phone(&self.phone)?;
        check_email(&self.email)?;
        check_birthday(&self.birthday, clock)?;
        let category = check_category(&self.category, default_category)?;

        Ok(Contact {
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            birthday: self.birthday,
            notes: self.notes,
            category,
        })
    }
}

/// Partial update for an existing contact
///
/// `None` and empty strings both mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
}

impl ContactPatch {
    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.email,
            &self.address,
            &self.birthday,
            &self.notes,
            &self.category,
        ]
        .into_iter()
        .all(|field| provided(field).is_none())
    }

    /// Check every provided field with the same rules used on add
    pub fn validate(&self, clock: &dyn Clock) -> ContactResult<()> {
        if let Some(phone) = provided(&self.phone) {
            check_phone(phone)?;
        }
        if let Some(email) = provided(&self.email) {
            check_email(email)?;
        }
        if let Some(birthday) = provided(&self.birthday) {
            check_birthday(birthday, clock)?;
        }
        if let Some(category) = provided(&self.category) {
            Category::parse(category).ok_or_else(|| {
                ContactError::invalid("category", "choose from Personal, Work, Family or Other")
            })?;
        }
        Ok(())
    }

    /// Overwrite each provided field on `contact`
    ///
    /// Unknown category text is ignored here; call [`ContactPatch::validate`]
    /// first to reject it.
    pub fn apply(&self, contact: &mut Contact) {
        if let Some(name) = provided(&self.name) {
            contact.name = name.to_string();
        }
        if let Some(phone) = provided(&self.phone) {
            contact.phone = phone.to_string();
        }
        if let Some(email) = provided(&self.email) {
            contact.email = email.to_string();
        }
        if let Some(address) = provided(&self.address) {
            contact.address = address.to_string();
        }
        if let Some(birthday) = provided(&self.birthday) {
            contact.birthday = birthday.to_string();
        }
        if let Some(notes) = provided(&self.notes) {
            contact.notes = notes.to_string();
        }
        if let Some(category) = provided(&self.category).and_then(Category::parse) {
            contact.category = category;
        }
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn check_name(name: &str) -> ContactResult<()> {
    if name.is_empty() {
        return Err(ContactError::invalid("name", "name cannot be empty"));
    }
    Ok(())
}

fn check_phone(phone: &str) -> ContactResult<()> {
    if !is_valid_phone(phone) {
        return Err(ContactError::invalid(
            "phone",
            "enter 8-15 digits with an optional '+' at the start",
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> ContactResult<()> {
    if !is_valid_email(email) {
        return Err(ContactError::invalid(
            "email",
            "enter a valid email address (e.g., user@domain.com)",
        ));
    }
    Ok(())
}

fn check_birthday(birthday: &str, clock: &dyn Clock) -> ContactResult<()> {
    if !is_valid_date(birthday, clock) {
        return Err(ContactError::invalid(
            "birthday",
            "use DD/MM/YYYY format or leave empty",
        ));
    }
    Ok(())
}

fn check_category(category: &str, default: Category) -> ContactResult<Category> {
    Category::parse_or_default(category, default).ok_or_else(|| {
        ContactError::invalid("category", "choose from Personal, Work, Family or Other")
    })
}
