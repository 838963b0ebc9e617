//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, optionally filtered and sorted.
    List(ListArgs),
    /// Show one product with related items.
    Show {
        /// Product id (e.g. bag-1).
        id: String,
    },
    /// Show the featured products.
    Featured,
}

/// Listing filters.
#[derive(Args)]
pub struct ListArgs {
    /// Free text matched against name, description and category.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category: bags, wallets or accessories.
    #[arg(long)]
    pub category: Option<String>,

    /// Badge: new or bestseller.
    #[arg(long)]
    pub badge: Option<String>,

    /// Minimum price in whole units.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Maximum price in whole units.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Color filter (repeatable, any-of).
    #[arg(long)]
    pub color: Vec<String>,

    /// Material filter (repeatable, any-of).
    #[arg(long)]
    pub material: Vec<String>,

    /// Sort: featured, price-asc, price-desc, name-asc, name-desc.
    #[arg(long, default_value = "featured")]
    pub sort: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a product.
    Add {
        /// Product id.
        id: String,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a product line.
    Remove {
        /// Product id.
        id: String,
    },
    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product id.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
    /// Preview the totals with a coupon code.
    Coupon {
        /// Coupon code.
        code: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name.
    #[arg(long)]
    pub name: String,

    /// Email for the receipt.
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub street: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    /// Postal code.
    #[arg(long)]
    pub zip: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Sign in.
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account.
    Signup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign out.
    Logout,
    /// Show or edit the profile.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Avatar image URL.
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Manage saved addresses.
    Addresses {
        #[command(subcommand)]
        command: Option<AddressCommand>,
    },
    /// Manage saved payment methods.
    Payments {
        #[command(subcommand)]
        command: Option<PaymentCommand>,
    },
    /// Show order history.
    Orders {
        /// Order number to show in detail.
        number: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AddressCommand {
    /// Add an address.
    Add {
        /// Label such as Casa or Oficina.
        #[arg(long)]
        label: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        zip: String,
        #[arg(long, default_value = "México")]
        country: String,
        /// Make it the default address.
        #[arg(long)]
        default: bool,
    },
    /// Make an address the default.
    Default {
        id: String,
    },
    /// Delete an address.
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PaymentCommand {
    /// Add a card.
    Add {
        /// visa, mastercard or amex.
        #[arg(long)]
        brand: String,
        #[arg(long)]
        last_four: String,
        /// Two-digit month.
        #[arg(long)]
        month: String,
        /// Four-digit year.
        #[arg(long)]
        year: String,
        /// Make it the default card.
        #[arg(long)]
        default: bool,
    },
    /// Make a card the default.
    Default {
        id: String,
    },
    /// Delete a card.
    Delete {
        id: String,
    },
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
