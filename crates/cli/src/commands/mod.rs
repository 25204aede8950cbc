//! CLI command implementations.
//!
//! Each module owns one subcommand family. Mutation feedback is printed
//! as toast-style status lines with the storefront's icons.

pub mod auth;
pub mod cart;
pub mod content;
pub mod products;
pub mod shell;

/// Print a success toast.
pub(crate) fn toast_success(message: &str) {
    println!("✓ {message}");
}

/// Print an error toast.
pub(crate) fn toast_error(message: &str) {
    println!("✗ {message}");
}

/// Print an informational toast.
pub(crate) fn toast_info(message: &str) {
    println!("ℹ {message}");
}
