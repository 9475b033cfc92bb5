//! Contact Book - a single-user terminal address book
//!
//! This library provides the core functionality for the `contacts` binary:
//! validated contact records, an in-memory store persisted to a compact
//! binary file after every change, and CSV/JSON export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Contact records, categories and field validators
//! - `storage`: In-memory store, binary codec and file persistence
//! - `services`: The command API used by both front ends
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: One-shot subcommands and the interactive menu
//! - `logging`: Diagnostic output setup
//!
//! # Example
//!
//! ```rust,ignore
//! use contactbook::config::ContactPaths;
//! use contactbook::models::SystemClock;
//! use contactbook::services::ContactService;
//! use contactbook::storage::ContactRepository;
//!
//! let paths = ContactPaths::new()?;
//! let mut repo = ContactRepository::new(paths.store_file());
//! repo.load();
//! let clock = SystemClock;
//! let service = ContactService::new(&mut repo, &clock);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ContactError, ContactResult};
