//! # Antenna CLI
//!
//! The main binary for the antenna grid tool.
//!
//! ## Usage
//!
//! ```bash
//! # Run the reference pipeline with default paths
//! antenna
//!
//! # Same pipeline with explicit files
//! antenna run --grid city.txt --output city.bin
//!
//! # Inspect and edit a record file
//! antenna show --binary city.bin
//! antenna insert -x 3 -y 4 -f A --binary city.bin
//! antenna status --binary city.bin --json-mode
//! ```

use antenna::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // ANTENNA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ANTENNA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "antenna=debug,antenna_core=debug"
    } else {
        "antenna=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so stdout carries only listings and notices.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    eprintln!("antenna v{} - nefasto antenna deriver", env!("CARGO_PKG_VERSION"));
}
