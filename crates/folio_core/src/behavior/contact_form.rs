//! Contact form validation.
//!
//! # Responsibility
//! - Decide whether a submission is accepted, before any side effect.
//! - Provide the user-facing notification texts.
//!
//! # Invariants
//! - A rejected submission leaves every field untouched.
//! - Submission is simulated; nothing leaves the page.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const CONFIRMATION_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// Raw field values read at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Why a submission was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRejection {
    /// A required field is blank after trimming.
    MissingFields,
    /// Email does not have the `local@domain.tld` shape.
    InvalidEmail,
}

impl ContactRejection {
    /// Text shown to the visitor.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingFields => MISSING_FIELDS_MESSAGE,
            Self::InvalidEmail => INVALID_EMAIL_MESSAGE,
        }
    }
}

impl Display for ContactRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "contact submission has blank required fields"),
            Self::InvalidEmail => write!(f, "contact submission email is malformed"),
        }
    }
}

impl Error for ContactRejection {}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validates one submission. Blank checks run before the email shape check.
pub fn validate_contact(submission: &ContactSubmission) -> Result<(), ContactRejection> {
    let blank = [&submission.name, &submission.email, &submission.message]
        .iter()
        .any(|value| value.trim().is_empty());
    if blank {
        return Err(ContactRejection::MissingFields);
    }
    // The untrimmed value is checked, so padded addresses are rejected.
    if !is_valid_email(&submission.email) {
        return Err(ContactRejection::InvalidEmail);
    }
    Ok(())
}
