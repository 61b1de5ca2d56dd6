//! Email Value Object
//!
//! Login identifier. Compared byte-for-byte: no trimming and no case folding,
//! so `Alice@example.com` and `alice@example.com` are different accounts.
//! Format checks are left to the transport adapter.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_empty_rejected() {
        assert!(Email::new("").is_err());
        assert!("".parse::<Email>().is_err());
    }

    #[test]
    fn test_email_verbatim() {
        let email = Email::new(" Alice@Example.com ").unwrap();
        assert_eq!(email.as_str(), " Alice@Example.com ");
    }

    #[test]
    fn test_email_case_sensitive() {
        let upper = Email::new("Alice@example.com").unwrap();
        let lower = Email::new("alice@example.com").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_email_serde_validates() {
        let email: Email = serde_json::from_str("\"bob@example.com\"").unwrap();
        assert_eq!(email.as_str(), "bob@example.com");
        assert!(serde_json::from_str::<Email>("\"\"").is_err());
    }
}
