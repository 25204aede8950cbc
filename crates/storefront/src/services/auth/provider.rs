//! Identity provider seam.
//!
//! The manager talks to a provider for the actual credential exchange.
//! Production deployments would slot a delegated provider in here; the
//! storefront ships with [`DemoProvider`], which accepts any valid
//! credentials and fabricates a local identity, matching the demo mode
//! of the original site.

use async_trait::async_trait;
use chrono::Utc;
use shreya_pharmacy_core::Email;
use uuid::Uuid;

use super::error::AuthError;
use super::{AuthProvider, AuthUser};

/// Email used when the provider has none to offer (Google demo flow).
pub const DEMO_EMAIL: &str = "demo@shreyapharmacy.com";

/// Display name used when the caller supplies none.
pub const DEMO_DISPLAY_NAME: &str = "Demo User";

/// Credential exchange behind the auth manager.
///
/// Implementations perform the provider round-trip and hand back the
/// signed-in identity; persistence and listener notification stay in the
/// manager.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email credentials for an identity.
    async fn sign_in(&self, email: &Email, password: &str) -> Result<AuthUser, AuthError>;

    /// Register a new account and sign it in.
    async fn sign_up(
        &self,
        email: &Email,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError>;

    /// Run the delegated Google flow.
    async fn sign_in_with_google(&self) -> Result<AuthUser, AuthError>;

    /// Tear down any provider-side session state.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Stand-in provider that fabricates demo identities.
///
/// Every sign-in succeeds. Identities get a fresh `demo-` uid each time;
/// nothing is remembered between calls, the manager's storage slot is the
/// only session record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

impl DemoProvider {
    fn fabricate(email: Email, display_name: &str, provider: AuthProvider) -> AuthUser {
        let display_name = if display_name.trim().is_empty() {
            DEMO_DISPLAY_NAME.to_string()
        } else {
            display_name.to_string()
        };

        AuthUser {
            uid: format!("demo-{}", Uuid::new_v4()),
            email,
            display_name,
            photo_url: None,
            provider,
            created_at: Some(Utc::now()),
        }
    }
}

#[async_trait]
impl IdentityProvider for DemoProvider {
    async fn sign_in(&self, email: &Email, _password: &str) -> Result<AuthUser, AuthError> {
        Ok(Self::fabricate(email.clone(), "", AuthProvider::Email))
    }

    async fn sign_up(
        &self,
        email: &Email,
        _password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        Ok(Self::fabricate(email.clone(), display_name, AuthProvider::Email))
    }

    async fn sign_in_with_google(&self) -> Result<AuthUser, AuthError> {
        let email = Email::parse(DEMO_EMAIL)?;
        Ok(Self::fabricate(email, "", AuthProvider::Google))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_identities_are_unique() {
        let email = Email::parse("user@example.com").unwrap();

        let first = DemoProvider.sign_in(&email, "irrelevant").await.unwrap();
        let second = DemoProvider.sign_in(&email, "irrelevant").await.unwrap();

        assert!(first.uid.starts_with("demo-"));
        assert_ne!(first.uid, second.uid);
        assert_eq!(first.email, email);
        assert_eq!(first.display_name, DEMO_DISPLAY_NAME);
    }

    #[tokio::test]
    async fn test_google_flow_uses_demo_identity() {
        let user = DemoProvider.sign_in_with_google().await.unwrap();

        assert_eq!(user.email.as_str(), DEMO_EMAIL);
        assert_eq!(user.provider, AuthProvider::Google);
        assert_eq!(user.photo_url, None);
    }
}
