//! Footwa - interactive shoe storefront.
//!
//! # Usage
//!
//! ```bash
//! # Run the shop against the public demo catalog
//! footwa
//!
//! # Keep the store somewhere else
//! footwa --data-dir ~/.local/share/footwa
//!
//! # Point at another catalog host
//! footwa --catalog-url http://localhost:4010
//! ```
//!
//! The binary loads the catalog once at startup (both shoe categories,
//! fetched concurrently) and then drops into an interactive shell. Type
//! `help` inside the shell for the command list. If the catalog cannot be
//! loaded there is nothing to sell: the shop prints a connectivity message
//! and exits, and rerunning is the reload.

#![cfg_attr(not(test), forbid(unsafe_code))]
// The terminal is the UI; stdout/stderr printing is the product here.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod link;
mod shell;

use std::path::PathBuf;

use clap::Parser;
use console::style;

use footwa_storefront::catalog::CatalogClient;
use footwa_storefront::config::StorefrontConfig;
use footwa_storefront::session::Session;
use footwa_storefront::store::Store;

#[derive(Parser)]
#[command(name = "footwa")]
#[command(author, version, about = "Footwa - single-screen shoe storefront")]
struct Cli {
    /// Directory holding the local store (overrides FOOTWA_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Base URL of the catalog API (overrides FOOTWA_CATALOG_URL)
    #[arg(long)]
    catalog_url: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to info for our crates if RUST_LOG is unset
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "footwa=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {e}", style("error:").red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(base_url) = cli.catalog_url {
        config = config.with_catalog_url(base_url);
    }

    std::fs::create_dir_all(&config.data_dir)?;
    let store = Store::open(config.store_path())?;

    println!("{}", style("F O O T W A").bold().magenta());
    println!("Loading catalog...");

    let catalog = match CatalogClient::new(&config.catalog).load().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "catalog load failed");
            eprintln!("{}", style("Check your network connection.").red());
            std::process::exit(1);
        }
    };
    println!("{} shoes in stock\n", style(catalog.len()).green());

    shell::Shell::new(Session::new(catalog), store, config.display_rate).run()
}
