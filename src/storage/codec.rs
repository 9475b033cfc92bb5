//! Binary store format
//!
//! Layout, with every integer an 8-byte `u64` in native byte order:
//!
//! ```text
//! count
//! repeated `count` times:
//!     7 x (len, len bytes of UTF-8)   name, phone, email, address,
//!                                     birthday, notes, category
//! ```
//!
//! There are no delimiters, escapes or version markers. Any premature end
//! of data, invalid UTF-8, unknown category or trailing garbage is reported as
//! [`ContactError::Corruption`].

use crate::error::{ContactError, ContactResult};
use crate::models::{Category, Contact};

const WORD: usize = std::mem::size_of::<u64>();

/// Fields per record on disk
pub const FIELDS_PER_CONTACT: usize = 7;

/// Serialize contacts into the binary store format
pub fn encode(contacts: &[Contact]) -> Vec<u8> {
    let payload: usize = contacts
        .iter()
        .map(|c| fields(c).iter().map(|f| WORD + f.len()).sum::<usize>())
        .sum();
    let mut out = Vec::with_capacity(WORD + payload);

    put_word(&mut out, contacts.len());
    for contact in contacts {
        for field in fields(contact) {
            put_word(&mut out, field.len());
            out.extend_from_slice(field.as_bytes());
        }
    }
    out
}

/// Parse the binary store format
pub fn decode(bytes: &[u8]) -> ContactResult<Vec<Contact>> {
    let mut reader = Reader { bytes, pos: 0 };

    let count = reader.word("record count")?;
    // Smallest possible record is seven zero lengths
    let max_possible = reader.remaining() / (WORD * FIELDS_PER_CONTACT);
    let mut contacts = Vec::with_capacity(usize::try_from(count).unwrap_or(0).min(max_possible));

    for index in 0..count {
        contacts.push(reader.contact(index)?);
    }

    if reader.remaining() > 0 {
        return Err(ContactError::Corruption(format!(
            "{} unexpected trailing bytes after {} records",
            reader.remaining(),
            count
        )));
    }

    Ok(contacts)
}

fn fields(contact: &Contact) -> [&str; FIELDS_PER_CONTACT] {
    [
        contact.name.as_str(),
        contact.phone.as_str(),
        contact.email.as_str(),
        contact.address.as_str(),
        contact.birthday.as_str(),
        contact.notes.as_str(),
        contact.category.as_str(),
    ]
}

fn put_word(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&(value as u64).to_ne_bytes());
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> ContactResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ContactError::Corruption(format!(
                "unexpected end of data reading {} at byte {} (need {}, have {})",
                what,
                self.pos,
                len,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn word(&mut self, what: &str) -> ContactResult<u64> {
        let raw = self.take(WORD, what)?;
        let mut buf = [0u8; WORD];
        buf.copy_from_slice(raw);
        Ok(u64::from_ne_bytes(buf))
    }

    fn field(&mut self, index: u64, name: &str) -> ContactResult<String> {
        let what = format!("{} of record {}", name, index);
        let len = self.word(&format!("length of {}", what))?;
        let len = usize::try_from(len)
            .map_err(|_| ContactError::Corruption(format!("length of {} overflows", what)))?;
        let raw = self.take(len, &what)?;
        String::from_utf8(raw.to_vec())
            .map_err(|e| ContactError::Corruption(format!("{} is not valid UTF-8: {}", what, e)))
    }

    fn contact(&mut self, index: u64) -> ContactResult<Contact> {
        let name = self.field(index, "name")?;
        let phone = self.field(index, "phone")?;
        let email = self.field(index, "email")?;
        let address = self.field(index, "address")?;
        let birthday = self.field(index, "birthday")?;
        let notes = self.field(index, "notes")?;
        let category_text = self.field(index, "category")?;

        if name.is_empty() {
            return Err(ContactError::Corruption(format!(
                "record {} has an empty name",
                index
            )));
        }
        let category = Category::parse(&category_text).ok_or_else(|| {
            ContactError::Corruption(format!(
                "record {} has unknown category '{}'",
                index, category_text
            ))
        })?;

        Ok(Contact {
            name,
            phone,
            email,
            address,
            birthday,
            notes,
            category,
        })
    }
}
