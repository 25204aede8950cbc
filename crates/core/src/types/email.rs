//! Validated email address.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest address we accept, per RFC 5321's practical limit.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Why an email address failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    /// The input was empty or all whitespace.
    #[error("email address cannot be empty")]
    Empty,
    /// The input exceeded [`MAX_EMAIL_LENGTH`] bytes.
    #[error("email address exceeds {MAX_EMAIL_LENGTH} characters (got {len})")]
    TooLong {
        /// Length of the rejected input in bytes.
        len: usize,
    },
    /// The input lacked a local part, an `@`, or a domain with a dot.
    #[error("email address is malformed")]
    Malformed,
}

/// An email address that passed shape validation.
///
/// Validation is deliberately shallow: a non-empty local part, one `@`,
/// and a domain containing a dot. Deliverability is the identity
/// provider's problem, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes `input` into an [`Email`].
    ///
    /// Surrounding whitespace is trimmed and the address is lowercased
    /// so that lookups are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first failed check.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong { len: trimmed.len() });
        }
        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::Malformed)?;
        if local.is_empty() || domain.is_empty() {
            return Err(EmailError::Malformed);
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailError::Malformed);
        }
        if domain.contains('@') {
            return Err(EmailError::Malformed);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the normalized address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the normalized address.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let email = Email::parse("customer@shreyapharmacy.com").unwrap();
        assert_eq!(email.as_str(), "customer@shreyapharmacy.com");
    }

    #[test]
    fn test_parse_trims_and_lowercases() {
        let email = Email::parse("  Customer@ShreyaPharmacy.COM ").unwrap();
        assert_eq!(email.as_str(), "customer@shreyapharmacy.com");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Email::parse("").unwrap_err(), EmailError::Empty);
        assert_eq!(Email::parse("   ").unwrap_err(), EmailError::Empty);
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(matches!(
            Email::parse(&long).unwrap_err(),
            EmailError::TooLong { .. }
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "no-at-sign",
            "@missing-local.com",
            "missing-domain@",
            "no-dot@domain",
            "dot-edge@.com",
            "dot-edge@com.",
            "two@signs@x.com",
        ] {
            assert_eq!(
                Email::parse(input).unwrap_err(),
                EmailError::Malformed,
                "expected {input:?} to be malformed"
            );
        }
    }

    #[test]
    fn test_from_str() {
        let email: Email = "demo@shreyapharmacy.com".parse().unwrap();
        assert_eq!(email.to_string(), "demo@shreyapharmacy.com");
    }

    #[test]
    fn test_serde_transparent() {
        let email = Email::parse("x@y.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"x@y.com\"");
    }
}
