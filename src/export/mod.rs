//! Export module for the contact book
//!
//! - CSV: one-way, spreadsheet-compatible snapshot
//! - JSON: machine-readable full export

pub mod csv;
pub mod json;

pub use self::csv::{export_contacts_csv, CsvStyle, CSV_HEADER};
pub use self::json::{export_contacts_json, ContactExport, EXPORT_SCHEMA_VERSION};
