//! # Field Validators
//!
//! Atomic, validated values that make up a contact [`Record`](crate::record::Record).
//! Every constructor takes raw user text and either returns the validated value or
//! an [`AssistantError::Validation`] carrying a message fit to show the user.
//!
//! ## Two contracts
//!
//! The plain constructors (`Phone::new`, `Email::new`, ...) are permissive: they trim
//! and reject only empty input. [`FieldPolicy::Strict`] layers format checks on top:
//! Ukrainian phone numbers normalized to `+380XXXXXXXXX` and `local@domain.tld` emails.
//! The policy is applied by the command layer before values reach a record, so a
//! record loaded from disk never fails because the policy changed.

use crate::error::{AssistantError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap());
static STRICT_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(38)?0\d{9}$").unwrap());
static STRICT_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AssistantError::validation("Name cannot be empty."));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AssistantError::validation("Phone number cannot be empty."));
        }
        Ok(Self(value.to_string()))
    }

    /// Validates a Ukrainian number and normalizes it to `+380XXXXXXXXX`.
    pub fn strict(value: &str) -> Result<Self> {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
        if !STRICT_PHONE.is_match(&digits) {
            return Err(AssistantError::validation(format!(
                "Invalid phone number: {}. Expected a Ukrainian number like 0501234567.",
                value.trim()
            )));
        }
        let normalized = if digits.starts_with("38") {
            format!("+{}", digits)
        } else {
            format!("+38{}", digits)
        };
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses `DD.MM.YYYY`, rejecting both malformed text and impossible dates.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let invalid = || {
            AssistantError::validation(format!(
                "Invalid date: {}. Use DD.MM.YYYY format.",
                value
            ))
        };
        if !DATE_SHAPE.is_match(value) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Birthday {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AssistantError::validation("Email cannot be empty."));
        }
        Ok(Self(value.to_string()))
    }

    pub fn strict(value: &str) -> Result<Self> {
        let email = Self::new(value)?;
        if !STRICT_EMAIL.is_match(email.as_str()) {
            return Err(AssistantError::validation(format!(
                "Invalid email: {}",
                email.as_str()
            )));
        }
        Ok(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AssistantError::validation("Address cannot be empty."));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which validation contract user input goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    #[default]
    Permissive,
    Strict,
}

impl FieldPolicy {
    pub fn phone(self, value: &str) -> Result<Phone> {
        match self {
            FieldPolicy::Permissive => Phone::new(value),
            FieldPolicy::Strict => Phone::strict(value),
        }
    }

    pub fn email(self, value: &str) -> Result<Email> {
        match self {
            FieldPolicy::Permissive => Email::new(value),
            FieldPolicy::Strict => Email::strict(value),
        }
    }
}
