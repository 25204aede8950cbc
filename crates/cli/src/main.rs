//! Shreya Pharmacy CLI - Storefront browsing, cart, and account tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! sp-cli products
//! sp-cli products --category vitamins
//! sp-cli search omega
//!
//! # Manage the cart
//! sp-cli cart add 3 --quantity 2
//! sp-cli cart show
//! sp-cli cart remove 3
//!
//! # Accounts
//! sp-cli auth login -e demo@shreyapharmacy.com -p secret123
//! sp-cli auth status
//!
//! # Interactive session
//! sp-cli shell
//! ```
//!
//! # Commands
//!
//! - `products` - List catalog products, optionally filtered by category
//! - `search` - Search products by name or category
//! - `testimonials` - Show customer testimonials
//! - `cart` - Show and mutate the shopping cart
//! - `auth` - Sign in, register, and inspect the session
//! - `shell` - Interactive storefront session

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shreya_pharmacy_core::Category;
use shreya_pharmacy_storefront::config::StorefrontConfig;
use shreya_pharmacy_storefront::state::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(author, version, about = "Shreya Pharmacy storefront CLI")]
struct Cli {
    /// Data directory for cart and session state (overrides SHREYA_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog JSON file (overrides SHREYA_CATALOG)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Only show one shelf (`prescription`, `vitamins`, `otc`, `wellness`)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Search products by name or category
    Search {
        /// Search query (empty matches everything)
        query: String,
    },
    /// Show customer testimonials
    Testimonials,
    /// Show and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in, register, and inspect the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Interactive storefront session
    Shell,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and the order total
    Show,
    /// Add a product to the cart by id
    Add {
        /// Product id
        id: u32,

        /// Units to add (clamped to 1-99)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u32,
    },
    /// Set the quantity of a line already in the cart
    SetQty {
        /// Product id
        id: u32,

        /// New quantity (clamped to 1-99)
        quantity: u32,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
    },
    /// Sign in with the Google demo flow
    Google,
    /// Sign out and clear the saved session
    Logout,
    /// Show the current session
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shreya_pharmacy_storefront=info,shreya_pharmacy_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    let mut state = AppState::new(&config)?;

    match cli.command {
        Commands::Products { category } => commands::products::list(&state, category),
        Commands::Search { query } => commands::products::search(&state, &query),
        Commands::Testimonials => commands::content::testimonials(&state),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id, quantity } => commands::cart::add(&mut state, id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, id),
            CartAction::SetQty { id, quantity } => {
                commands::cart::set_quantity(&mut state, id, quantity);
            }
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut state, &email, &password).await?;
            }
            AuthAction::Register {
                email,
                password,
                name,
            } => {
                commands::auth::register(&mut state, &email, &password, &name).await?;
            }
            AuthAction::Google => commands::auth::google(&mut state).await?,
            AuthAction::Logout => commands::auth::logout(&mut state).await?,
            AuthAction::Status => commands::auth::status(&state),
        },
        Commands::Shell => commands::shell::run(&mut state).await,
    }
    Ok(())
}
