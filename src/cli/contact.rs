//! Contact CLI commands
//!
//! Implements one-shot CLI commands for contact management.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::{ContactPaths, Settings};
use crate::display::{format_contact_details, format_contact_list};
use crate::error::{ContactError, ContactResult};
use crate::export::CsvStyle;
use crate::models::{Category, ContactInput, ContactPatch};
use crate::services::{is_confirmed, ContactService, DeleteOutcome};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV snapshot (spreadsheet-compatible)
    Csv,
    /// Full JSON export
    Json,
}

/// Contact subcommands
#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add a new contact
    Add {
        /// Contact name
        name: String,
        /// Phone number (E.g., +1234567890)
        #[arg(short, long)]
        phone: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Postal address
        #[arg(short, long, default_value = "")]
        address: String,
        /// Birthday (DD/MM/YYYY)
        #[arg(short, long, default_value = "")]
        birthday: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Category (Personal/Work/Family/Other)
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// List all contacts
    #[command(alias = "ls")]
    List,
    /// Search contacts by name substring (case-sensitive)
    Search {
        /// Text the name must contain
        text: String,
    },
    /// Show every field of a contact
    Show {
        /// Exact contact name
        name: String,
    },
    /// Edit a contact; omitted options keep their current value
    Edit {
        /// Exact name of the contact to edit
        name: String,
        /// New name
        #[arg(long = "name", value_name = "NEW_NAME")]
        new_name: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
        #[arg(short, long)]
        birthday: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Exact contact name
        name: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Sort contacts by name
    Sort,
    /// List contacts in a category
    Filter {
        /// Category (Personal/Work/Family/Other)
        category: Category,
    },
    /// Export contacts to a file
    Export {
        /// Output file path (default: contacts.csv next to the store)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Write CSV fields unquoted (legacy layout)
        #[arg(long)]
        raw: bool,
    },
}

/// Handle a contact command
pub fn handle_contact_command(
    service: &mut ContactService<'_>,
    settings: &Settings,
    paths: &ContactPaths,
    cmd: ContactCommands,
) -> ContactResult<()> {
    match cmd {
        ContactCommands::Add {
            name,
            phone,
            email,
            address,
            birthday,
            notes,
            category,
        } => {
            let saved = service.add_contact(ContactInput {
                name,
                phone,
                email,
                address,
                birthday,
                notes,
                category,
            })?;
            println!("Added contact: {} ({})", saved.value.name, saved.value.category);
            warn_if_not_durable(saved.durable);
        }

        ContactCommands::List => {
            println!("{}", format_contact_list(service.list_contacts()));
        }

        ContactCommands::Search { text } => {
            let matches = service.search_by_name_substring(&text);
            if matches.is_empty() {
                println!("No matching contacts found.");
            } else {
                println!("{}", format_contact_list(&matches));
            }
        }

        ContactCommands::Show { name } => {
            let contact = service.find(&name)?;
            println!("{}", format_contact_details(&contact));
        }

        ContactCommands::Edit {
            name,
            new_name,
            phone,
            email,
            address,
            birthday,
            notes,
            category,
        } => {
            let patch = ContactPatch {
                name: new_name,
                phone,
                email,
                address,
                birthday,
                notes,
                category,
            };
            if patch.is_empty() {
                println!("Nothing to change. Pass at least one field option.");
                return Ok(());
            }
            let saved = service.edit_contact(&name, patch)?;
            println!("Updated contact: {}", saved.value.name);
            warn_if_not_durable(saved.durable);
        }

        ContactCommands::Delete { name, yes } => {
            let contact = service.find(&name)?;
            let confirmed = if yes || !settings.confirm_deletes {
                true
            } else {
                println!("{}", format_contact_details(&contact));
                is_confirmed(&prompt("Are you sure you want to delete this contact? (y/n): ")?)
            };

            match service.delete_contact(&name, confirmed)? {
                DeleteOutcome::Deleted(saved) => {
                    println!("Deleted contact: {}", saved.value.name);
                    warn_if_not_durable(saved.durable);
                }
                DeleteOutcome::Cancelled => println!("Deletion cancelled."),
            }
        }

        ContactCommands::Sort => {
            let saved = service.sort_by_name();
            println!("Contacts sorted by name.");
            warn_if_not_durable(saved.durable);
        }

        ContactCommands::Filter { category } => {
            let matches = service.filter_by_category(category);
            if matches.is_empty() {
                println!("No contacts found in category '{}'.", category);
            } else {
                println!("{}", format_contact_list(&matches));
            }
        }

        ContactCommands::Export {
            output,
            format,
            raw,
        } => {
            let count = match format {
                ExportFormat::Csv => {
                    let path = output.unwrap_or_else(|| paths.csv_file());
                    let style = if raw {
                        CsvStyle::Raw
                    } else {
                        CsvStyle::from_quoting(settings.csv_quoting)
                    };
                    let count = service.export_csv(&path, style)?;
                    println!("Exported {} contacts to {}", count, path.display());
                    count
                }
                ExportFormat::Json => {
                    let path = output.unwrap_or_else(|| paths.csv_file().with_extension("json"));
                    let count = service.export_json(&path)?;
                    println!("Exported {} contacts to {}", count, path.display());
                    count
                }
            };
            tracing::info!(count, ?format, "export finished");
        }
    }

    Ok(())
}

pub(crate) fn warn_if_not_durable(durable: bool) {
    if !durable {
        eprintln!("Warning: your changes may not have been saved!");
    }
}

/// Prompt for a line on stdin
fn prompt(message: &str) -> ContactResult<String> {
    print!("{}", message);
    io::stdout()
        .flush()
        .map_err(|e| ContactError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| ContactError::Io(e.to_string()))?;

    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}
