//! # Grocer Storefront Library
//!
//! Application layer of the grocery storefront: state containers, command
//! handlers, and the line-oriented shell the binary runs.
//!
//! ## Module Organization
//! ```text
//! grocer_storefront_lib/
//! ├── lib.rs          ◄─── You are here (CLI, logging, startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── Storefront bundle + exports
//! │   ├── catalog.rs  ◄─── Catalog + session favorites
//! │   ├── cart.rs     ◄─── Cart store + snapshot channel
//! │   ├── checkout.rs ◄─── Checkout draft + order client
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── product.rs  ◄─── Listing, search, favorites
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Bill, delivery details, place_order
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── shell.rs        ◄─── Line-oriented front end
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐ ┌──────────────┐ ┌───────────────┐ ┌──────────────┐  │
//! │  │ CatalogState │ │  CartState   │ │ CheckoutState │ │ ConfigState  │  │
//! │  │ • products   │ │ • lines      │ │ • city, notes │ │ • charges    │  │
//! │  │ • favorites  │ │ • indicator  │ │ • payment     │ │ • currency   │  │
//! │  │              │ │ • watch tx   │ │ • HTTP client │ │ • session id │  │
//! │  └──────────────┘ └──────────────┘ └───────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  Each command only takes the state it needs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grocer_checkout::StorefrontConfig;
use grocer_core::InMemoryCatalog;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::Storefront;

/// Command line of the `grocer-storefront` binary.
#[derive(Debug, Parser)]
#[command(name = "grocer-storefront")]
#[command(about = "Grocery storefront: browse, fill a cart, place an order", long_about = None)]
pub struct Cli {
    /// Config file path (default: platform config dir, or GROCER_CONFIG)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the product catalog
    Catalog,

    /// Search products by name
    Search {
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Interactive shell reading commands from stdin (default)
    Shell,
}

/// Runs the storefront binary.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse command line ───────────────────────────────────────────────► │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,grocer=debug,reqwest=warn; override with RUST_LOG   │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config, then GROCER_CONFIG, then the platform config dir        │
/// │     • GROCER_* environment overrides, then validation                   │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • Sample catalog, empty cart, empty checkout draft                  │
/// │                                                                         │
/// │  5. Run the requested subcommand on a tokio runtime ──────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing();
    info!("Starting grocer storefront");

    let config = StorefrontConfig::load(cli.config)?;
    info!(
        store = %config.store.name,
        endpoint = %config.order.endpoint,
        "Configuration loaded"
    );

    let storefront = Storefront::new(config, InMemoryCatalog::sample())?;
    info!(session_id = %storefront.config.session_id(), "State initialized");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let command = cli.command.unwrap_or(Command::Shell);

        match command {
            Command::Catalog => {
                let text = shell::execute(&storefront, shell::ShellCommand::Products).await?;
                println!("{}", text);
            }
            Command::Search { query } => {
                let query = query.join(" ");
                let text = shell::execute(&storefront, shell::ShellCommand::Search(query)).await?;
                println!("{}", text);
            }
            Command::Shell => {
                let stdin = BufReader::new(tokio::io::stdin());
                let mut stdout = std::io::stdout();
                shell::run_shell(&storefront, stdin, &mut stdout).await?;
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    info!("Storefront closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with shell output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=grocer=trace` - Show trace for grocer crates only
/// - Default: INFO, DEBUG for grocer crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grocer=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_shell() {
        let cli = Cli::try_parse_from(["grocer-storefront"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_search_joins_words() {
        let cli = Cli::try_parse_from(["grocer-storefront", "search", "cooking", "oil"]).unwrap();
        match cli.command {
            Some(Command::Search { query }) => assert_eq!(query, vec!["cooking", "oil"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli =
            Cli::try_parse_from(["grocer-storefront", "catalog", "--config", "/tmp/s.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Catalog)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["grocer-storefront", "search"]).is_err());
    }
}
