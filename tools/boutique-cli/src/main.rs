//! Boutique CLI - command line storefront for the Boutique shop.
//!
//! Commands:
//! - `boutique catalog` - Browse and filter products
//! - `boutique cart` - Manage the persisted cart
//! - `boutique checkout` - Ship, pay and place an order
//! - `boutique account` - Sign in and manage the customer account
//! - `boutique contact` - Send a message to the store
//! - `boutique config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod processor;
mod storefront;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AccountArgs, CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, ContactArgs};

/// Boutique CLI - Browse, fill a cart and check out from the terminal
#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Check out the current cart
    Checkout(CheckoutArgs),

    /// Sign in and manage the customer account
    Account(AccountArgs),

    /// Send a message to the store
    Contact(ContactArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, log_json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Account(args) => commands::account::run(args, &ctx).await,
        Commands::Contact(args) => commands::contact::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const CHECKOUT: [&str; 16] = [
        "boutique", "checkout", "--name", "Ana", "--email", "ana@example.com", "--street",
        "Av. Reforma 123", "--city", "CDMX", "--state", "CDMX", "--zip", "06600", "--yes",
        "--json",
    ];

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_checkout_parses() {
        let cli = Cli::try_parse_from(CHECKOUT).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Checkout(ref args) if args.yes));
    }

    #[test]
    fn test_checkout_has_no_coupon_flag() {
        let args = CHECKOUT.iter().copied().chain(["--coupon", "VIP20"]);
        assert!(Cli::try_parse_from(args).is_err());
    }
}
