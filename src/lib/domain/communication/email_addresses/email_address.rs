//! Email Address

use std::fmt;

use lettre::{message::Mailbox, Address};
use thiserror::Error;

use EmailAddressError::*;

/// An error that can occur when creating an email address
#[derive(Debug, Error)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email is invalid: {0}")]
    InvalidEmailAddress(String),
}

/// An email address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(Address);

impl EmailAddress {
    /// Create a new email address
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        trimmed
            .parse::<Address>()
            .map(Self)
            .map_err(|_| InvalidEmailAddress(trimmed.to_string()))
    }

    /// Create an email address from a user identity.
    ///
    /// A bare login name such as `alice` has no domain part, so it is
    /// qualified with `host` (`alice@host`). Anything containing an `@` is
    /// parsed as-is.
    pub fn from_identity(raw: &str, host: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.contains('@') {
            return Self::new(trimmed);
        }

        Self::new(&format!("{trimmed}@{host}"))
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0.to_string()
    }
}

impl From<EmailAddress> for Mailbox {
    fn from(email: EmailAddress) -> Self {
        Mailbox::new(None, email.0)
    }
}
