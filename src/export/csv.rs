//! CSV Export functionality
//!
//! Exports contacts with the header `Name,Category,Phone,Email,Address,Birthday,Notes`.
//! Two styles are supported:
//!
//! - [`CsvStyle::Quoted`]: fields containing commas, quotes or newlines are
//!   quoted per RFC 4180, so every record survives a spreadsheet import.
//! - [`CsvStyle::Raw`]: fields are joined with commas verbatim. Embedded
//!   commas or newlines in address/notes break the column layout; this is the
//!   legacy format kept for compatibility.

use std::io::Write;

use crate::error::{ContactError, ContactResult};
use crate::models::Contact;

/// Column names, in output order
pub const CSV_HEADER: [&str; 7] = [
    "Name", "Category", "Phone", "Email", "Address", "Birthday", "Notes",
];

/// How free-text fields are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvStyle {
    #[default]
    Quoted,
    Raw,
}

impl CsvStyle {
    pub fn from_quoting(quoting: bool) -> Self {
        if quoting {
            Self::Quoted
        } else {
            Self::Raw
        }
    }
}

/// Export contacts to CSV
pub fn export_contacts_csv<W: Write>(
    contacts: &[Contact],
    writer: &mut W,
    style: CsvStyle,
) -> ContactResult<()> {
    match style {
        CsvStyle::Quoted => write_quoted(contacts, writer),
        CsvStyle::Raw => write_raw(contacts, writer),
    }
}

fn row(contact: &Contact) -> [&str; 7] {
    [
        contact.name.as_str(),
        contact.category.as_str(),
        contact.phone.as_str(),
        contact.email.as_str(),
        contact.address.as_str(),
        contact.birthday.as_str(),
        contact.notes.as_str(),
    ]
}

fn write_quoted<W: Write>(contacts: &[Contact], writer: &mut W) -> ContactResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for contact in contacts {
        csv_writer.write_record(row(contact))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ContactError::Export(e.to_string()))
}

fn write_raw<W: Write>(contacts: &[Contact], writer: &mut W) -> ContactResult<()> {
    writeln!(writer, "{}", CSV_HEADER.join(",")).map_err(|e| ContactError::Export(e.to_string()))?;
    for contact in contacts {
        writeln!(writer, "{}", row(contact).join(","))
            .map_err(|e| ContactError::Export(e.to_string()))?;
    }
    writer.flush().map_err(|e| ContactError::Export(e.to_string()))
}
