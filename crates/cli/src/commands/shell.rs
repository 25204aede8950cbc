//! Interactive storefront session.
//!
//! A small read-eval loop over the same command implementations as the
//! one-shot subcommands. The cart badge line is pushed by the store's
//! subscription on every mutation rather than re-queried per command,
//! and the session line is pushed by the auth state listener.

use std::io::{self, BufRead, Write};

use shreya_pharmacy_core::Category;
use shreya_pharmacy_storefront::state::AppState;

use super::{auth, cart, content, products, toast_error};

/// Run the interactive loop until `quit` or end of input.
pub async fn run(state: &mut AppState) {
    println!("Shreya Pharmacy storefront. Type 'help' for commands, 'quit' to leave.");

    state.cart_mut().subscribe(|cart| {
        // Badge is hidden while the cart is empty
        if cart.count() > 0 {
            println!("🛒 {}", cart.count());
        }
    });

    state.auth_mut().on_auth_state_change(|user| {
        if let Some(user) = user {
            println!("👤 Signed in as {}", user.display_name);
        }
    });

    let mut input = io::stdin().lock();
    loop {
        print!("shreya> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::error!("Failed to read input: {err}");
                break;
            }
        }

        if !dispatch(state, line.trim()).await {
            break;
        }
    }
}

/// Handle one input line. Returns `false` when the session should end.
async fn dispatch(state: &mut AppState, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let rest: Vec<&str> = parts.collect();

    match command {
        "products" => match rest.first() {
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => products::list(state, Some(category)),
                Err(err) => toast_error(&err.to_string()),
            },
            None => products::list(state, None),
        },
        "search" => products::search(state, &rest.join(" ")),
        "testimonials" => content::testimonials(state),
        "cart" => cart::show(state),
        "add" => {
            let Some(id) = rest.first().and_then(|raw| raw.parse::<u32>().ok()) else {
                toast_error("Usage: add <product-id> [quantity]");
                return true;
            };
            let quantity = rest.get(1).and_then(|raw| raw.parse::<u32>().ok()).unwrap_or(1);
            if let Err(err) = cart::add(state, id, quantity) {
                toast_error(&err.to_string());
            }
        }
        "remove" => {
            let Some(id) = rest.first().and_then(|raw| raw.parse::<u32>().ok()) else {
                toast_error("Usage: remove <product-id>");
                return true;
            };
            cart::remove(state, id);
        }
        "qty" => {
            let (Some(id), Some(quantity)) = (
                rest.first().and_then(|raw| raw.parse::<u32>().ok()),
                rest.get(1).and_then(|raw| raw.parse::<u32>().ok()),
            ) else {
                toast_error("Usage: qty <product-id> <quantity>");
                return true;
            };
            cart::set_quantity(state, id, quantity);
        }
        "login" => {
            let (Some(email), Some(password)) = (rest.first(), rest.get(1)) else {
                toast_error("Usage: login <email> <password>");
                return true;
            };
            let _ = auth::login(state, email, password).await;
        }
        "register" => {
            let (Some(email), Some(password)) = (rest.first(), rest.get(1)) else {
                toast_error("Usage: register <email> <password> [name]");
                return true;
            };
            let name = rest.get(2..).map(|parts| parts.join(" ")).unwrap_or_default();
            let _ = auth::register(state, email, password, &name).await;
        }
        "google" => {
            let _ = auth::google(state).await;
        }
        "logout" => {
            let _ = auth::logout(state).await;
        }
        "status" => auth::status(state),
        "help" => help(),
        "quit" | "exit" => return false,
        other => toast_error(&format!("Unknown command: {other}. Type 'help'.")),
    }
    true
}

fn help() {
    println!("Commands:");
    println!("  products [category]                   List products");
    println!("  search <query>                        Search by name or category");
    println!("  testimonials                          Show customer testimonials");
    println!("  cart                                  Show the cart");
    println!("  add <id> [quantity]                   Add a product to the cart");
    println!("  remove <id>                           Remove a product from the cart");
    println!("  qty <id> <quantity>                   Set a line's quantity (1-99)");
    println!("  login <email> <password>              Sign in");
    println!("  register <email> <password> [name]    Create an account");
    println!("  google                                Sign in with Google (demo)");
    println!("  logout                                Sign out");
    println!("  status                                Show the current session");
    println!("  quit                                  Leave the shell");
}
