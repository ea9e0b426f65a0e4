//! # quote CLI Library
//!
//! Terminal front end for the quote cart.
//!
//! ## Module Organization
//! ```text
//! quote_cli/
//! ├── lib.rs          ◄─── You are here (run, tracing setup)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── StorefrontConfig (TOML + env)
//! ├── context.rs      ◄─── AppContext wiring
//! ├── catalog.rs      ◄─── CMS catalog files
//! ├── checkout.rs     ◄─── CheckoutFlow
//! ├── commands/       ◄─── Subcommand handlers
//! └── error.rs        ◄─── CliError
//! ```

pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::Rendered;
use config::StorefrontConfig;
use context::AppContext;
use error::CliResult;

/// Runs one CLI invocation and returns what to print.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config ── file → QUOTE_* env → validate → --data-dir flag     │
/// │  2. Open store  ── FileStore(<data dir>), read record once             │
/// │  3. Dispatch    ── one handler, every mutation committed               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> CliResult<Rendered> {
    let mut config = StorefrontConfig::load(cli.config.clone())?;
    if let Some(dir) = cli.data_dir {
        debug!(?dir, "Overriding data dir from command line");
        config.storage.dir = Some(dir);
    }

    let ctx = AppContext::open(config)?;
    info!(command = ?cli.command, "Running command");

    match cli.command {
        Command::Add(args) => {
            commands::cart::add(&ctx, &args.catalog, args.product_id, args.quantity)
        }
        Command::Update(args) => commands::cart::update(&ctx, args.product_id, args.quantity),
        Command::Remove { product_id } => commands::cart::remove(&ctx, product_id),
        Command::Clear => commands::cart::clear(&ctx),
        Command::Cart => commands::cart::show_cart(&ctx),
        Command::Checkout(args) => commands::quotation::checkout(&ctx, args.into()).await,
        Command::Show { id } => commands::quotation::show(&ctx, &id),
        Command::History => commands::quotation::history(&ctx),
        Command::Reset => commands::quotation::reset(&ctx),
        Command::InitConfig => {
            let path = ctx.config.save(cli.config)?;
            Rendered::new(
                format!("Configuración guardada en {}\n", path.display()),
                &serde_json::json!({ "path": path }),
            )
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quote=trace` - Show trace for quote crates only
/// - Default: INFO, DEBUG for quote crates
///
/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,quote=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
