//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use quote_core::{CustomerContact, ProductId};

/// Quote cart for the storefront: build a cart, request a quotation.
#[derive(Parser, Debug)]
#[command(name = "quote", version, disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (default: platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Data directory holding the cart record; overrides config and env.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a catalog product to the cart.
    Add(AddArgs),

    /// Set the quantity of a cart line (0 or less removes it).
    Update(UpdateArgs),

    /// Remove a product from the cart.
    Remove {
        #[arg(value_name = "PRODUCT_ID")]
        product_id: ProductId,
    },

    /// Empty the cart.
    Clear,

    /// Show the cart.
    Cart,

    /// Submit the cart as a quotation request.
    Checkout(CheckoutArgs),

    /// Show one quotation.
    Show {
        #[arg(value_name = "QUOTATION_ID")]
        id: String,
    },

    /// List all quotations.
    History,

    /// Delete the stored cart and history.
    Reset,

    /// Write the effective configuration to the config file.
    InitConfig,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Catalog file (`{"data": [...]}` or a bare array).
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    #[arg(value_name = "PRODUCT_ID")]
    pub product_id: ProductId,

    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(value_name = "PRODUCT_ID")]
    pub product_id: ProductId,

    #[arg(value_name = "QUANTITY", allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Args, Debug, Clone)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub notes: Option<String>,
}

impl From<CheckoutArgs> for CustomerContact {
    fn from(args: CheckoutArgs) -> Self {
        CustomerContact {
            customer_name: args.name,
            customer_email: args.email,
            customer_phone: args.phone,
            notes: args.notes,
        }
    }
}
