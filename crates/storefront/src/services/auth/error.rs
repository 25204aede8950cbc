//! Authentication error types.

use shreya_pharmacy_core::EmailError;
use thiserror::Error;

use crate::storage::StorageError;

use super::MIN_PASSWORD_LENGTH;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email is already registered.
    #[error("email already in use")]
    EmailAlreadyInUse,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No account exists for the email.
    #[error("user not found")]
    UserNotFound,

    /// Password does not match the account.
    #[error("wrong password")]
    WrongPassword,

    /// Password shorter than the minimum.
    #[error("password validation failed: fewer than {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// The provider flow was abandoned before completing.
    #[error("sign-in cancelled")]
    Cancelled,

    /// The identity provider could not be reached.
    #[error("network failure during sign-in")]
    Network,

    /// The session slot could not be read or written.
    #[error("session storage error: {0}")]
    Session(#[from] StorageError),
}

impl AuthError {
    /// Message shown to the user for this failure.
    ///
    /// The wording matches the storefront's established copy, so display
    /// surfaces print these verbatim rather than the internal description.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => "This email is already registered.",
            Self::InvalidEmail(_) => "Please enter a valid email address.",
            Self::UserNotFound => "No account found with this email.",
            Self::WrongPassword => "Incorrect password.",
            Self::WeakPassword => "Password should be at least 6 characters.",
            Self::Cancelled => "Sign-in was cancelled.",
            Self::Network => "Network error. Please check your connection.",
            Self::Session(_) => "An error occurred. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_display_copy() {
        assert_eq!(
            AuthError::WeakPassword.user_message(),
            "Password should be at least 6 characters."
        );
        assert_eq!(
            AuthError::Cancelled.user_message(),
            "Sign-in was cancelled."
        );
    }

    #[test]
    fn test_internal_display_differs_from_user_copy() {
        let err = AuthError::UserNotFound;
        assert_eq!(err.to_string(), "user not found");
        assert_eq!(err.user_message(), "No account found with this email.");
    }
}
