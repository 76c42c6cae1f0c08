//! Redcart CLI - browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # Search and filter the catalog
//! redcart products --search phone --sort price-asc --page 2
//!
//! # Product detail with reviews and similar products
//! redcart product 12
//!
//! # Cart
//! redcart cart add 12
//! redcart cart set 12 3
//! redcart cart show --shipping delivery
//!
//! # Interactive catalog session
//! redcart browse
//! ```
//!
//! # Commands
//!
//! - `products` - One page of filtered, sorted products
//! - `product` - Product detail
//! - `cart` - Show and change the cart
//! - `wishlist` - Show and change the wishlist
//! - `settings` - Show and toggle account settings
//! - `browse` - Interactive catalog session
//!
//! The cart, wishlist and settings live in the data directory
//! (`--data-dir` / `REDCART_DATA_DIR`, default `.redcart`) and are shared
//! with the storefront server when it points at the same directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use redcart_core::{ProductId, Setting, ShippingMethod};

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "redcart")]
#[command(author, version, about = "Redcart command-line storefront")]
struct Cli {
    /// Directory holding the cart, wishlist and settings files
    #[arg(long, env = "REDCART_DATA_DIR", default_value = ".redcart", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    Products(commands::products::ListArgs),
    /// Show a product with its reviews and similar products
    Product {
        /// Product id
        id: ProductId,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Show or change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistCommand,
    },
    /// Show or change account settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// Interactive catalog session (type `help` once inside)
    Browse,
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show the cart and checkout totals
    Show {
        /// Shipping method (`pickup` or `delivery`)
        #[arg(short, long, default_value = "pickup")]
        shipping: ShippingMethod,
    },
    /// Add one of a product
    Add { id: ProductId },
    /// Remove a product's line
    Remove { id: ProductId },
    /// Set a line's quantity (values below 1 are ignored)
    Set {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistCommand {
    /// Show saved products
    Show,
    /// Save a product, or unsave it if already saved
    Toggle { id: ProductId },
    /// Remove a saved product
    Remove { id: ProductId },
    /// Remove every saved product
    Clear,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Show all settings
    Show,
    /// Flip one setting (`dark-mode`, `order-updates`,
    /// `shipping-notifications`, `promo-notifications`)
    Toggle { setting: Setting },
    /// Restore defaults
    Reset,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut ctx = Context::open(&cli.data_dir)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products(args) => commands::products::list(&ctx, &args, &mut out).await?,
        Commands::Product { id } => commands::products::show(&ctx, id, &mut out).await?,
        Commands::Cart { action } => match action {
            CartCommand::Show { shipping } => commands::cart::show(&ctx, shipping, &mut out)?,
            CartCommand::Add { id } => commands::cart::add(&mut ctx, id, &mut out).await?,
            CartCommand::Remove { id } => commands::cart::remove(&mut ctx, id, &mut out)?,
            CartCommand::Set { id, quantity } => {
                commands::cart::set_quantity(&mut ctx, id, quantity, &mut out)?;
            }
            CartCommand::Clear => commands::cart::clear(&mut ctx, &mut out)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistCommand::Show => commands::wishlist::show(&ctx, &mut out)?,
            WishlistCommand::Toggle { id } => {
                commands::wishlist::toggle(&mut ctx, id, &mut out).await?;
            }
            WishlistCommand::Remove { id } => commands::wishlist::remove(&mut ctx, id, &mut out)?,
            WishlistCommand::Clear => commands::wishlist::clear(&mut ctx, &mut out)?,
        },
        Commands::Settings { action } => match action {
            SettingsCommand::Show => commands::settings::show(&ctx, &mut out)?,
            SettingsCommand::Toggle { setting } => {
                commands::settings::toggle(&mut ctx, setting, &mut out)?;
            }
            SettingsCommand::Reset => commands::settings::reset(&mut ctx, &mut out)?,
        },
        Commands::Browse => {
            let stdin = std::io::stdin().lock();
            commands::browse::run(&mut ctx, stdin, &mut out).await?;
        }
    }
    Ok(())
}
