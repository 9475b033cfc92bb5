//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod contact;
pub mod interactive;
pub mod settings;

pub use contact::{handle_contact_command, ContactCommands, ExportFormat};
pub use interactive::Session;
pub use settings::{handle_config_command, ConfigArgs};
