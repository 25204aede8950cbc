//! Account commands.
//!
//! Failures surface twice on purpose: a toast with the user-facing
//! message, and the underlying error for the log / exit code.

use shreya_pharmacy_storefront::services::auth::AuthError;
use shreya_pharmacy_storefront::state::AppState;

use super::{toast_error, toast_info, toast_success};

/// Sign in with email and password.
pub async fn login(state: &mut AppState, email: &str, password: &str) -> Result<(), AuthError> {
    match state.auth_mut().sign_in_with_email(email, password).await {
        Ok(user) => {
            toast_success(&format!("Welcome, {}!", user.display_name));
            Ok(())
        }
        Err(err) => {
            toast_error(err.user_message());
            Err(err)
        }
    }
}

/// Create an account and sign in.
pub async fn register(
    state: &mut AppState,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), AuthError> {
    match state.auth_mut().sign_up_with_email(email, password, name).await {
        Ok(user) => {
            toast_success(&format!("Account created! Welcome, {}!", user.display_name));
            Ok(())
        }
        Err(err) => {
            toast_error(err.user_message());
            Err(err)
        }
    }
}

/// Sign in with the Google demo flow.
pub async fn google(state: &mut AppState) -> Result<(), AuthError> {
    match state.auth_mut().sign_in_with_google().await {
        Ok(user) => {
            toast_success(&format!("Welcome, {}!", user.display_name));
            Ok(())
        }
        Err(err) => {
            toast_error(err.user_message());
            Err(err)
        }
    }
}

/// Sign out and clear the saved session.
pub async fn logout(state: &mut AppState) -> Result<(), AuthError> {
    match state.auth_mut().sign_out().await {
        Ok(()) => {
            toast_info("Signed out successfully");
            Ok(())
        }
        Err(err) => {
            toast_error(err.user_message());
            Err(err)
        }
    }
}

/// Print the current session.
pub fn status(state: &AppState) {
    match state.auth().current_user() {
        Some(user) => {
            println!(
                "Signed in as {} <{}> via {}",
                user.display_name, user.email, user.provider
            );
            if let Some(created_at) = user.created_at {
                println!("Account created {}", created_at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        None => println!("Not signed in"),
    }
}
