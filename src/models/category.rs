//! Contact category model
//!
//! Every contact belongs to exactly one of a fixed set of categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Personal,
    Work,
    Family,
    Other,
}

impl Category {
    /// All categories, in menu order
    pub const ALL: [Category; 4] = [
        Category::Personal,
        Category::Work,
        Category::Family,
        Category::Other,
    ];

    /// The exact text stored on disk and matched on input
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Family => "Family",
            Self::Other => "Other",
        }
    }

    /// Parse a category by exact, case-sensitive name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Parse user input, treating blank input as `default`
    pub fn parse_or_default(s: &str, default: Category) -> Option<Self> {
        if s.is_empty() {
            Some(default)
        } else {
            Self::parse(s)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text is not one of the known categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected Personal, Work, Family or Other)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
