//! JSON Export functionality
//!
//! Exports every contact to a single JSON document with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::ContactResult;
use crate::models::Contact;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full address book export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub contact_count: usize,

    /// All contacts, in store order
    pub contacts: Vec<Contact>,
}

impl ContactExport {
    pub fn new(contacts: &[Contact]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_count: contacts.len(),
            contacts: contacts.to_vec(),
        }
    }
}

/// Export all contacts as pretty-printed JSON
pub fn export_contacts_json<W: Write>(contacts: &[Contact], writer: &mut W) -> ContactResult<()> {
    let export = ContactExport::new(contacts);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}
