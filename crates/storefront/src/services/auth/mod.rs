//! Authentication service.
//!
//! Session state for the storefront. The manager validates input, hands
//! the credential exchange to an [`IdentityProvider`], keeps the signed-in
//! user in memory, persists it under the user storage slot, and tells
//! listeners whenever the state changes. No cart behavior depends on any
//! of this.

mod error;
mod provider;

pub use error::AuthError;
pub use provider::{DEMO_DISPLAY_NAME, DEMO_EMAIL, DemoProvider, IdentityProvider};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shreya_pharmacy_core::Email;

use crate::storage::{Storage, keys};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// User identity
// =============================================================================

/// Which provider vouched for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Delegated Google sign-in.
    Google,
    /// Email and password.
    Email,
}

impl AuthProvider {
    /// Lowercase provider tag, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed-in user.
///
/// Serialized in the session slot with the original site's field names
/// (`displayName`, `photoURL`); `createdAt` is newer and optional, so
/// sessions written by earlier builds still restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Provider-scoped user id; fabricated ids carry a `demo-` prefix.
    pub uid: String,
    /// Account email.
    pub email: Email,
    /// Name shown on account surfaces.
    pub display_name: String,
    /// Avatar URL, when the provider supplies one.
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    /// Which provider vouched for the identity.
    pub provider: AuthProvider,
    /// When the identity was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Auth manager
// =============================================================================

type Listener = Box<dyn Fn(Option<&AuthUser>)>;

/// Session state and sign-in/out orchestration.
///
/// Holds at most one signed-in user. Successful sign-ins persist the user
/// under the session slot; sign-out removes it. Listeners registered via
/// [`AuthManager::on_auth_state_change`] fire immediately with the current
/// state and again on every transition.
pub struct AuthManager {
    user: Option<AuthUser>,
    provider: Box<dyn IdentityProvider>,
    storage: Arc<dyn Storage>,
    listeners: Vec<Listener>,
}

impl AuthManager {
    /// Create a signed-out manager on the given provider and storage.
    ///
    /// Call [`AuthManager::restore`] afterwards to pick up a saved session.
    #[must_use]
    pub fn new(provider: Box<dyn IdentityProvider>, storage: Arc<dyn Storage>) -> Self {
        Self {
            user: None,
            provider,
            storage,
            listeners: Vec::new(),
        }
    }

    /// Create a manager backed by the demo provider.
    #[must_use]
    pub fn demo(storage: Arc<dyn Storage>) -> Self {
        Self::new(Box::new(DemoProvider), storage)
    }

    /// Restore a saved session from storage, if one exists.
    ///
    /// A corrupt or unreadable session is logged and ignored; the manager
    /// stays signed out.
    pub fn restore(&mut self) {
        let raw = match self.storage.get(keys::USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!("Could not read saved session: {err}");
                return;
            }
        };

        match serde_json::from_str::<AuthUser>(&raw) {
            Ok(user) => {
                tracing::info!("Restored session for {}", user.display_name);
                self.user = Some(user);
                self.notify();
            }
            Err(err) => {
                tracing::warn!("Discarding corrupt saved session: {err}");
            }
        }
    }

    // ===== State =====

    /// Whether a user is currently signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Register a state listener.
    ///
    /// Fires immediately with the current state, then again on every
    /// sign-in and sign-out.
    pub fn on_auth_state_change<F>(&mut self, callback: F)
    where
        F: Fn(Option<&AuthUser>) + 'static,
    {
        callback(self.user.as_ref());
        self.listeners.push(Box::new(callback));
    }

    // ===== Sign-in / sign-out =====

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed address, or
    /// whatever the provider reports for the exchange itself.
    pub async fn sign_in_with_email(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let email = Email::parse(email)?;
        let user = self.provider.sign_in(&email, password).await?;
        Ok(self.establish(user))
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed address,
    /// [`AuthError::WeakPassword`] for a password shorter than six
    /// characters, or whatever the provider reports.
    pub async fn sign_up_with_email(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let user = self.provider.sign_up(&email, password, display_name).await?;
        Ok(self.establish(user))
    }

    /// Sign in through the delegated Google flow.
    ///
    /// # Errors
    ///
    /// Returns whatever the provider reports for the exchange.
    pub async fn sign_in_with_google(&mut self) -> Result<AuthUser, AuthError> {
        let user = self.provider.sign_in_with_google().await?;
        Ok(self.establish(user))
    }

    /// Sign out and remove the saved session.
    ///
    /// The in-memory state is cleared and listeners fire even when the
    /// saved session cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Session`] when the session slot cannot be
    /// removed; the slot would then restore a stale session on next start.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        self.user = None;
        self.notify();
        self.storage.remove(keys::USER)?;
        Ok(())
    }

    /// Record a fresh sign-in: persist best-effort, then notify.
    fn establish(&mut self, user: AuthUser) -> AuthUser {
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(err) = self.storage.set(keys::USER, &json) {
                    tracing::warn!("Session not persisted: {err}");
                }
            }
            Err(err) => {
                tracing::warn!("Session not serializable: {err}");
            }
        }

        self.user = Some(user.clone());
        self.notify();
        user
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self.user.as_ref());
        }
    }
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("user", &self.user)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::storage::MemoryStorage;

    fn manager() -> (AuthManager, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        (AuthManager::demo(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_sign_in_persists_session() {
        let (mut auth, storage) = manager();
        assert!(!auth.is_authenticated());

        let user = auth
            .sign_in_with_email("user@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "user@example.com");
        assert_eq!(user.display_name, DEMO_DISPLAY_NAME);
        assert_eq!(user.provider, AuthProvider::Email);
        assert!(auth.is_authenticated());
        assert_eq!(auth.current_user(), Some(&user));
        assert!(storage.get(keys::USER).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sign_in_rejects_malformed_email() {
        let (mut auth, storage) = manager();

        let err = auth
            .sign_in_with_email("not-an-email", "hunter22")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidEmail(_)));
        assert_eq!(err.user_message(), "Please enter a valid email address.");
        assert!(!auth.is_authenticated());
        assert_eq!(storage.get(keys::USER).unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_password() {
        let (mut auth, _) = manager();

        let err = auth
            .sign_up_with_email("ada@example.com", "12345", "Ada")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::WeakPassword));
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_up_keeps_display_name() {
        let (mut auth, _) = manager();

        let user = auth
            .sign_up_with_email("ada@example.com", "longenough", "Ada Lovelace")
            .await
            .unwrap();
        assert_eq!(user.display_name, "Ada Lovelace");

        let user = auth
            .sign_up_with_email("bob@example.com", "longenough", "  ")
            .await
            .unwrap();
        assert_eq!(user.display_name, DEMO_DISPLAY_NAME);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let (mut auth, storage) = manager();
        auth.sign_in_with_google().await.unwrap();
        assert!(auth.is_authenticated());

        auth.sign_out().await.unwrap();

        assert!(!auth.is_authenticated());
        assert_eq!(auth.current_user(), None);
        assert_eq!(storage.get(keys::USER).unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_roundtrip() {
        let storage = Arc::new(MemoryStorage::default());

        let mut first = AuthManager::demo(storage.clone());
        let signed_in = first
            .sign_in_with_email("user@example.com", "hunter22")
            .await
            .unwrap();

        let mut second = AuthManager::demo(storage);
        second.restore();

        assert_eq!(second.current_user(), Some(&signed_in));
    }

    #[tokio::test]
    async fn test_restore_ignores_corrupt_session() {
        let (mut auth, storage) = manager();
        storage.set(keys::USER, "{ definitely not json").unwrap();

        auth.restore();

        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_accepts_sessions_without_created_at() {
        let (mut auth, storage) = manager();
        storage
            .set(
                keys::USER,
                r#"{"uid":"demo-1724000000000","email":"demo@shreyapharmacy.com","displayName":"Demo User","photoURL":null,"provider":"email"}"#,
            )
            .unwrap();

        auth.restore();

        let user = auth.current_user().unwrap();
        assert_eq!(user.uid, "demo-1724000000000");
        assert_eq!(user.created_at, None);
    }

    #[tokio::test]
    async fn test_listeners_fire_immediately_and_on_transitions() {
        let (mut auth, _) = manager();

        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        auth.on_auth_state_change(move |user| {
            sink.borrow_mut()
                .push(user.map(|u| u.display_name.clone()));
        });
        assert_eq!(*seen.borrow(), vec![None]);

        auth.sign_in_with_google().await.unwrap();
        auth.sign_out().await.unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![None, Some(DEMO_DISPLAY_NAME.to_string()), None]
        );
    }

    #[tokio::test]
    async fn test_session_serde_shape() {
        let (mut auth, storage) = manager();
        auth.sign_in_with_email("user@example.com", "hunter22")
            .await
            .unwrap();

        let raw = storage.get(keys::USER).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["displayName"], "Demo User");
        assert_eq!(json["photoURL"], serde_json::Value::Null);
        assert_eq!(json["provider"], "email");
        assert!(json["uid"].as_str().unwrap().starts_with("demo-"));
    }
}
