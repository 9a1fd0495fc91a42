//! Shopfront CLI - Inspect and edit the stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! shopfront cart show
//!
//! # Render the cart page as HTML
//! shopfront cart render
//!
//! # Add a product (single catalog object or `{ "products": [...] }`)
//! curl -s https://dummyjson.com/products/1 | shopfront cart add --product -
//!
//! # Adjust quantities by line position
//! shopfront cart increment 0
//! shopfront cart decrement 0
//!
//! # Remove all lines for product 1, or empty the cart
//! shopfront cart remove 1
//! shopfront cart clear
//!
//! # Dry run: preview an add against an empty cart, leaving storage untouched
//! shopfront --ephemeral cart add --product product.json
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the cart and order summary
//! - `cart render` - Print the cart page HTML
//! - `cart add` - Add catalog products
//! - `cart increment` / `cart decrement` - Change a line's quantity
//! - `cart remove` - Remove every line for a product
//! - `cart clear` - Empty the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use shopfront_core::ProductId;
use shopfront_storefront::config::LogFormat;
use shopfront_storefront::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use shopfront_storefront::{CartStore, StorefrontConfig, telemetry};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront cart tools")]
struct Cli {
    /// Directory holding the stored cart (overrides `SHOPFRONT_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Dry run against an empty in-memory cart; storage is neither read nor written
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart and order summary
    Show,
    /// Print the cart page as HTML
    Render,
    /// Add products from a catalog JSON payload
    Add {
        /// Path to the payload, or `-` for stdin
        #[arg(short, long)]
        product: PathBuf,

        /// Quantity for each added line
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove every line for a product
    Remove {
        /// Catalog product id
        id: ProductId,
    },
    /// Increase the quantity of a line by one
    Increment {
        /// Line position as shown by `cart show`
        line: usize,
    },
    /// Decrease the quantity of a line by one (never below 1)
    Decrement {
        /// Line position as shown by `cart show`
        line: usize,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = telemetry::init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let _ = telemetry::init_tracing(config.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    let storage = open_storage(cli.ephemeral, &config.storage_dir)?;
    let mut store = CartStore::load(storage);
    let currency = config.currency;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&mut store, currency, &mut out)?,
            CartAction::Render => commands::cart::render(&mut store, currency, &mut out)?,
            CartAction::Add { product, quantity } => {
                let payload = read_payload(&product)?;
                commands::cart::add(&mut store, &payload, quantity, currency, &mut out)?;
            }
            CartAction::Remove { id } => {
                commands::cart::remove(&mut store, id, currency, &mut out)?;
            }
            CartAction::Increment { line } => {
                commands::cart::adjust(&mut store, line, 1, currency, &mut out)?;
            }
            CartAction::Decrement { line } => {
                commands::cart::adjust(&mut store, line, -1, currency, &mut out)?;
            }
            CartAction::Clear => commands::cart::clear(&mut store, currency, &mut out)?,
        },
    }
    Ok(())
}

/// Pick the storage backend for this run.
///
/// An ephemeral run starts from an empty cart and its result is discarded when
/// the process exits, so it only previews what a command would print.
fn open_storage(ephemeral: bool, dir: &Path) -> Result<Box<dyn KeyValueStore>, StorageError> {
    if ephemeral {
        tracing::info!("dry run: cart changes will not be saved");
        Ok(Box::new(MemoryStore::new()))
    } else {
        Ok(Box::new(FileStore::open(dir)?))
    }
}

/// Read a payload from a file, or from stdin when the path is `-`.
fn read_payload(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut payload = String::new();
        std::io::stdin().read_to_string(&mut payload)?;
        Ok(payload)
    } else {
        std::fs::read_to_string(path)
    }
}
