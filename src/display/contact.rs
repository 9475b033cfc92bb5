//! Contact display formatting
//!
//! Formats contacts for terminal output in table and detail views.

use crate::models::Contact;

/// Format a list of contacts as a table
pub fn format_contact_list<'a, I>(contacts: I) -> String
where
    I: IntoIterator<Item = &'a Contact>,
{
    let contacts: Vec<&Contact> = contacts.into_iter().collect();
    if contacts.is_empty() {
        return "No contacts found.".to_string();
    }

    let name_width = column_width(contacts.iter().map(|c| c.name.as_str()), "Name");
    let phone_width = column_width(contacts.iter().map(|c| c.phone.as_str()), "Phone");
    let email_width = column_width(contacts.iter().map(|c| c.email.as_str()), "Email");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:<phone_width$}  {:<email_width$}  {}\n",
        "Name", "Category", "Phone", "Email", "Birthday",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<8}  {:-<phone_width$}  {:-<email_width$}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for contact in &contacts {
        output.push_str(&format!(
            "{:<name_width$}  {:<8}  {:<phone_width$}  {:<email_width$}  {}\n",
            contact.name,
            contact.category.as_str(),
            contact.phone,
            contact.email,
            contact.birthday,
        ));
    }

    output.push_str(&format!("\nTotal: {} contacts", contacts.len()));
    output
}

/// Format one contact with every field
pub fn format_contact_details(contact: &Contact) -> String {
    let rows = [
        ("Name", contact.name.as_str()),
        ("Category", contact.category.as_str()),
        ("Phone", contact.phone.as_str()),
        ("Email", contact.email.as_str()),
        ("Address", contact.address.as_str()),
        ("Birthday", contact.birthday.as_str()),
        ("Notes", contact.notes.as_str()),
    ];

    let mut output = String::from("--- Contact Details ---\n");
    for (label, value) in rows {
        output.push_str(&format!("{:<9}: {}\n", label, value));
    }
    output.push_str("-----------------------");
    output
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_empty_list() {
        let none: [Contact; 0] = [];
        assert_eq!(format_contact_list(&none), "No contacts found.");
    }

    #[test]
    fn test_list_has_header_and_total() {
        let contacts = vec![
            Contact::new("Alice", "+441234567890", "alice@example.com"),
            Contact::new("Bob", "12345678", "bob@work.io").with_category(Category::Work),
        ];
        let output = format_contact_list(&contacts);
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[0].starts_with("Name "));
        assert!(lines[1].starts_with("-----"));
        assert!(lines[2].starts_with("Alice"));
        assert!(lines[3].contains("Work"));
        assert!(output.ends_with("Total: 2 contacts"));
    }

    #[test]
    fn test_details_show_every_field() {
        let mut contact = Contact::new("Alice", "+441234567890", "alice@example.com");
        contact.notes = "likes tea".into();
        let output = format_contact_details(&contact);

        assert!(output.contains("Name     : Alice"));
        assert!(output.contains("Category : Personal"));
        assert!(output.contains("Notes    : likes tea"));
        assert!(output.contains("Address  : \n"));
    }
}
