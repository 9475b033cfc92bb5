//! Field validators for contact records
//!
//! All predicates are total: any input, including empty strings and control
//! characters, yields `true` or `false`. `is_valid_date` depends on the current
//! year, which is passed in through a [`Clock`] so tests can pin it.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;

use super::category::Category;

// ASCII classes only; `\d` would match non-ASCII digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{7,14}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/([0-9]{4})$").expect("valid date regex")
});

/// Source of the current calendar year
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// Reads the year from the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// A clock frozen at a given year
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Optional `+`, then 8-15 digits, the first of which is not zero
pub fn is_valid_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

/// `local@domain.tld` with a final label of at least two letters
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// Empty, or a calendar-valid `DD/MM/YYYY` date whose year is not in the future
pub fn is_valid_date(text: &str, clock: &dyn Clock) -> bool {
    if text.is_empty() {
        return true;
    }

    let Some(caps) = DATE_RE.captures(text) else {
        return false;
    };

    let (Ok(day), Ok(month), Ok(year)) = (
        caps[1].parse::<u32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<i32>(),
    ) else {
        return false;
    };

    if year > clock.current_year() {
        return false;
    }

    day <= days_in_month(month, year)
}

/// Membership test against the four known categories
pub fn is_valid_category(text: &str) -> bool {
    Category::parse(text).is_some()
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: FixedClock = FixedClock(2025);

    #[test]
    fn test_phone_edge_cases() {
        assert!(!is_valid_phone("+1234567"));
        assert!(is_valid_phone("+12345678"));
        assert!(is_valid_phone("+123456789012345"));
        assert!(!is_valid_phone("+1234567890123456"));
        assert!(!is_valid_phone("0123456789"));
        assert!(!is_valid_phone("+0123456789"));
        assert!(is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123-456-7890"));
        assert!(!is_valid_phone("++1234567890"));
        assert!(!is_valid_phone("1234567890\n"));
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("user@domain.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("a_b%c@x-y.io"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@domain.c"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user domain.com"));
        assert!(!is_valid_email("user@domain.c0m"));
        assert!(!is_valid_email(" user@domain.com"));
    }

    #[test]
    fn test_date_edge_cases() {
        assert!(is_valid_date("", &CLOCK));
        assert!(is_valid_date("29/02/2024", &CLOCK));
        assert!(!is_valid_date("29/02/2023", &CLOCK));
        assert!(!is_valid_date("31/04/2024", &CLOCK));
        assert!(is_valid_date("30/04/2024", &CLOCK));
        assert!(is_valid_date("29/02/2000", &CLOCK));
        assert!(!is_valid_date("29/02/1900", &CLOCK));
        assert!(!is_valid_date("00/01/2020", &CLOCK));
        assert!(!is_valid_date("01/13/2020", &CLOCK));
        assert!(!is_valid_date("1/1/2020", &CLOCK));
        assert!(!is_valid_date("2020-01-01", &CLOCK));
    }

    #[test]
    fn test_date_rejects_future_year() {
        assert!(is_valid_date("31/12/2025", &FixedClock(2025)));
        assert!(!is_valid_date("01/01/2026", &FixedClock(2025)));
        assert!(is_valid_date("01/01/2026", &FixedClock(2026)));
    }

    #[test]
    fn test_category() {
        assert!(is_valid_category("Personal"));
        assert!(is_valid_category("Other"));
        assert!(!is_valid_category("personal"));
        assert!(!is_valid_category(""));
    }

    #[test]
    fn test_validators_are_total() {
        let inputs = [
            "",
            "\0",
            "\u{7f}\u{1b}[31m",
            "\n\r\t",
            "😀😀😀",
            "29/02/\u{0}024",
            "+",
            "@.",
            "//",
        ];
        for input in inputs {
            let _ = is_valid_phone(input);
            let _ = is_valid_email(input);
            let _ = is_valid_date(input, &CLOCK);
            let _ = is_valid_category(input);
        }
        let long = "9".repeat(100_000);
        assert!(!is_valid_phone(&long));
        assert!(!is_valid_date(&long, &CLOCK));
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }
}
