//! Core data models for the contact book
//!
//! This module contains the contact record, its category, and the field
//! validators that guard record integrity.

pub mod category;
pub mod contact;
pub mod validation;

pub use category::{Category, UnknownCategory};
pub use contact::{Contact, ContactInput, ContactPatch};
pub use validation::{
    is_valid_category, is_valid_date, is_valid_email, is_valid_phone, Clock, FixedClock,
    SystemClock,
};
