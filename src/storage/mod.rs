//! Storage layer for the contact book
//!
//! Provides the in-memory contact store, the binary file codec, and a
//! repository tying them to a file with atomic writes.

pub mod codec;
pub mod contacts;
pub mod file_io;
pub mod store;

pub use contacts::{ContactRepository, LoadOutcome};
pub use file_io::{read_bytes, write_bytes_atomic};
pub use store::ContactStore;
