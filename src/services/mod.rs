//! Service layer for the contact book
//!
//! The service layer provides the command API on top of the storage layer,
//! handling validation and persistence after every mutation.

pub mod contacts;

pub use contacts::{is_confirmed, ContactService, DeleteOutcome, Saved};
