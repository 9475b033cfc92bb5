//! Interactive menu
//!
//! A line-oriented front end over [`ContactService`]: a numbered menu, field
//! prompts that repeat until the value is valid, and y/n confirmation before
//! deletes. Reading and writing go through generic handles so the loop can be
//! driven from tests. End of input behaves like choosing Exit.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::Settings;
use crate::display::{format_contact_details, format_contact_list};
use crate::error::{ContactError, ContactResult};
use crate::export::CsvStyle;
use crate::models::{
    is_valid_date, is_valid_email, is_valid_phone, Category, ContactInput, ContactPatch,
};
use crate::services::{is_confirmed, ContactService, DeleteOutcome};

const MENU: &str = "
=== Contact Management System ===
1.  Add Contact
2.  View All Contacts
3.  Search Contact
4.  Edit Contact
5.  Delete Contact
6.  Sort Contacts by Name
7.  Filter Contacts by Category
8.  Export Contacts to CSV
9.  Exit
=================================
Enter your choice (1-9): ";

const NOT_SAVED: &str = "Warning: your changes may not have been saved!";

/// Line-oriented terminal session
pub struct Session<'s, 'a, R, W> {
    service: &'s mut ContactService<'a>,
    settings: &'s Settings,
    csv_path: &'s Path,
    input: R,
    output: W,
}

impl<'s, 'a, R: BufRead, W: Write> Session<'s, 'a, R, W> {
    pub fn new(
        service: &'s mut ContactService<'a>,
        settings: &'s Settings,
        csv_path: &'s Path,
        input: R,
        output: W,
    ) -> Self {
        Self {
            service,
            settings,
            csv_path,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self) -> ContactResult<()> {
        self.say("Welcome to Contact Management System")?;

        loop {
            let Some(choice) = self.ask(MENU)? else {
                return Ok(());
            };

            // Surrounding blanks are skipped, as a numeric read would
            let step = match choice.trim() {
                "1" => self.add(),
                "2" => self.view(),
                "3" => self.search(),
                "4" => self.edit(),
                "5" => self.delete(),
                "6" => self.sort(),
                "7" => self.filter(),
                "8" => self.export(),
                "9" => {
                    self.say("\nThank you for using Contact Management System!\nGoodbye!")?;
                    return Ok(());
                }
                _ => {
                    self.say("Invalid choice! Please enter a number from 1 to 9.")?;
                    Ok(Flow::Continue)
                }
            };

            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::EndOfInput) => return Ok(()),
                // Terminal failures end the session; everything else is reported
                Err(ContactError::Io(e)) => return Err(ContactError::Io(e)),
                Err(e) => self.say(&format!("Error: {}", e))?,
            }
        }
    }

    fn add(&mut self) -> ContactResult<Flow> {
        let clock = self.service.clock();
        let default_category = self.service.default_category();

        let Some(name) = self.ask_until("Enter Name: ", "Name cannot be empty! Please try again.", |s| {
            !s.is_empty()
        })?
        else {
            return Ok(Flow::EndOfInput);
        };
        let Some(phone) = self.ask_until(
            "Enter Phone Number (E.g., +1234567890): ",
            "Invalid phone number format! Please enter 8-15 digits with optional '+' at start.",
            is_valid_phone,
        )?
        else {
            return Ok(Flow::EndOfInput);
        };
        let Some(email) = self.ask_until(
            "Enter Email: ",
            "Invalid email format! Please enter a valid email address (e.g., user@domain.com).",
            is_valid_email,
        )?
        else {
            return Ok(Flow::EndOfInput);
        };
        let Some(address) = self.ask("Enter Address (optional): ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(birthday) = self.ask_until(
            "Enter Birthday (DD/MM/YYYY) (optional - press Enter to skip): ",
            "Invalid date format! Please use DD/MM/YYYY format or leave empty.",
            |s| is_valid_date(s, clock),
        )?
        else {
            return Ok(Flow::EndOfInput);
        };
        let Some(notes) = self.ask("Enter Notes (optional): ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(category) = self.ask_until(
            "Enter Category (Personal/Work/Family/Other): ",
            "Invalid category! Please choose from: Personal, Work, Family, or Other.",
            |s| Category::parse_or_default(s, default_category).is_some(),
        )?
        else {
            return Ok(Flow::EndOfInput);
        };

        let saved = self.service.add_contact(ContactInput {
            name,
            phone,
            email,
            address,
            birthday,
            notes,
            category,
        })?;
        self.say("Contact added successfully!")?;
        self.warn_unless(saved.durable)?;
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> ContactResult<Flow> {
        if self.service.list_contacts().is_empty() {
            self.say("No contacts found!")?;
            return Ok(Flow::Continue);
        }
        let details: Vec<String> = self
            .service
            .list_contacts()
            .iter()
            .map(format_contact_details)
            .collect();
        self.say(&format!("\nContact List:\n{}", details.join("\n")))?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> ContactResult<Flow> {
        if self.service.list_contacts().is_empty() {
            self.say("No contacts to search!")?;
            return Ok(Flow::Continue);
        }
        let Some(term) = self.ask("Enter name to search: ")? else {
            return Ok(Flow::EndOfInput);
        };

        let matches = self.service.search_by_name_substring(&term);
        if matches.is_empty() {
            self.say("No matching contacts found!")?;
        } else {
            self.say(&format!("\nSearch Results:\n{}", format_contact_list(&matches)))?;
        }
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> ContactResult<Flow> {
        if self.service.list_contacts().is_empty() {
            self.say("No contacts to edit!")?;
            return Ok(Flow::Continue);
        }
        let Some(name) = self.ask("Enter name of contact to edit: ")? else {
            return Ok(Flow::EndOfInput);
        };
        if self.service.find(&name).is_err() {
            self.say("Contact not found!")?;
            return Ok(Flow::Continue);
        }

        let clock = self.service.clock();
        let prompts = [
            ("Enter new name (press enter to keep current): ", ""),
            (
                "Enter new phone (press enter to keep current): ",
                "Invalid phone number format! Please enter 8-15 digits with optional '+' at start.",
            ),
            (
                "Enter new email (press enter to keep current): ",
                "Invalid email format! Please enter a valid email address (e.g., user@domain.com).",
            ),
            ("Enter new address (press enter to keep current): ", ""),
            (
                "Enter new birthday DD/MM/YYYY (press enter to keep current): ",
                "Invalid date format! Please use DD/MM/YYYY format.",
            ),
            ("Enter new notes (press enter to keep current): ", ""),
            (
                "Enter new category (press enter to keep current): ",
                "Invalid category! Please choose from: Personal, Work, Family, or Other.",
            ),
        ];

        let mut answers: [Option<String>; 7] = Default::default();
        for (index, (prompt, retry)) in prompts.into_iter().enumerate() {
            let answer = match index {
                1 => self.ask_until(prompt, retry, blank_or(is_valid_phone))?,
                2 => self.ask_until(prompt, retry, blank_or(is_valid_email))?,
                4 => self.ask_until(prompt, retry, |s| is_valid_date(s, clock))?,
                6 => self.ask_until(prompt, retry, |s| s.is_empty() || Category::parse(s).is_some())?,
                _ => self.ask(prompt)?,
            };
            if answer.is_none() {
                return Ok(Flow::EndOfInput);
            }
            answers[index] = answer;
        }

        let [new_name, phone, email, address, birthday, notes, category] = answers;
        let patch = ContactPatch {
            name: new_name,
            phone,
            email,
            address,
            birthday,
            notes,
            category,
        };

        let saved = self.service.edit_contact(&name, patch)?;
        self.say("Contact updated successfully!")?;
        self.warn_unless(saved.durable)?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> ContactResult<Flow> {
        if self.service.list_contacts().is_empty() {
            self.say("No contacts to delete!")?;
            return Ok(Flow::Continue);
        }
        let Some(name) = self.ask("Enter name of contact to delete: ")? else {
            return Ok(Flow::EndOfInput);
        };
        if self.service.find(&name).is_err() {
            self.say("Contact not found!")?;
            return Ok(Flow::Continue);
        }

        let confirmed = if self.settings.confirm_deletes {
            match self.ask("Are you sure you want to delete this contact? (y/n): ")? {
                Some(answer) => is_confirmed(&answer),
                None => return Ok(Flow::EndOfInput),
            }
        } else {
            true
        };

        match self.service.delete_contact(&name, confirmed)? {
            DeleteOutcome::Deleted(saved) => {
                self.say("Contact deleted successfully!")?;
                self.warn_unless(saved.durable)?;
            }
            DeleteOutcome::Cancelled => self.say("Deletion cancelled.")?,
        }
        Ok(Flow::Continue)
    }

    fn sort(&mut self) -> ContactResult<Flow> {
        let saved = self.service.sort_by_name();
        self.say("Contacts sorted by name!")?;
        self.warn_unless(saved.durable)?;
        Ok(Flow::Continue)
    }

    fn filter(&mut self) -> ContactResult<Flow> {
        if self.service.list_contacts().is_empty() {
            self.say("No contacts to filter!")?;
            return Ok(Flow::Continue);
        }
        let Some(text) = self.ask("Enter category to filter (Personal/Work/Family/Other): ")? else {
            return Ok(Flow::EndOfInput);
        };

        let matches = Category::parse(&text)
            .map(|category| self.service.filter_by_category(category))
            .unwrap_or_default();
        if matches.is_empty() {
            self.say(&format!("No contacts found in category '{}'!", text))?;
        } else {
            self.say(&format!(
                "\nContacts in category '{}':\n{}",
                text,
                format_contact_list(&matches)
            ))?;
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> ContactResult<Flow> {
        let style = CsvStyle::from_quoting(self.settings.csv_quoting);
        match self.service.export_csv(self.csv_path, style) {
            Ok(count) => self.say(&format!(
                "Exported {} contacts to '{}' successfully!",
                count,
                self.csv_path.display()
            ))?,
            Err(e) => self.say(&format!("Error: could not create CSV file! ({})", e))?,
        }
        Ok(Flow::Continue)
    }

    fn warn_unless(&mut self, durable: bool) -> ContactResult<()> {
        if !durable {
            self.say(NOT_SAVED)?;
        }
        Ok(())
    }

    fn say(&mut self, text: &str) -> ContactResult<()> {
        writeln!(self.output, "{}", text).map_err(|e| ContactError::Io(e.to_string()))
    }

    /// Print `prompt` and read one line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> ContactResult<Option<String>> {
        write!(self.output, "{}", prompt).map_err(|e| ContactError::Io(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| ContactError::Io(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ContactError::Io(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Ask repeatedly until `valid` accepts the answer
    fn ask_until(
        &mut self,
        prompt: &str,
        retry: &str,
        valid: impl Fn(&str) -> bool,
    ) -> ContactResult<Option<String>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if valid(&answer) {
                return Ok(Some(answer));
            }
            self.say(retry)?;
        }
    }
}

enum Flow {
    Continue,
    EndOfInput,
}

/// Accept a blank answer ("keep current") or one passing `check`
fn blank_or(check: fn(&str) -> bool) -> impl Fn(&str) -> bool {
    move |s| s.is_empty() || check(s)
}
