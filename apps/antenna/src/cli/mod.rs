//! # Antenna CLI Module
//!
//! This module implements the CLI interface for the antenna tool.
//!
//! ## Available Commands
//!
//! - `run` - Reference pipeline: grid -> mutate -> derive -> records -> reload
//! - `show` - List antennas from a grid or record file
//! - `derive` - Derive nefasto antennas from a grid and save the records
//! - `insert` - Insert an antenna into a record file
//! - `delete` - Delete an antenna from a record file
//! - `status` - Show store counts
//! - `hash` - Compute BLAKE3 digest of a record file

mod commands;

use crate::config::AppConfig;
use antenna_core::AntennaError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Antenna grid tool
///
/// Reads antenna grids, derives nefasto antennas on the midpoints of
/// even-distance pairs, and stores the result as packed binary records.
#[derive(Parser, Debug)]
#[command(name = "antenna")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where a command reads its antennas from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read a text grid
    #[arg(short, long, conflicts_with = "binary")]
    pub grid: Option<PathBuf>,

    /// Read a binary record file
    #[arg(short, long)]
    pub binary: Option<PathBuf>,
}

impl SourceArgs {
    /// Resolve to a concrete source, falling back to the configured grid.
    pub fn resolve(&self, config: &AppConfig) -> Source {
        match (&self.grid, &self.binary) {
            (_, Some(binary)) => Source::Binary(binary.clone()),
            (Some(grid), None) => Source::Grid(grid.clone()),
            (None, None) => Source::Grid(config.grid_file.clone()),
        }
    }
}

/// Single antenna given on the command line.
#[derive(Args, Debug, Clone)]
pub struct AntennaArgs {
    /// Row coordinate
    #[arg(short = 'x', long, allow_negative_numbers = true)]
    pub x: i32,

    /// Column coordinate
    #[arg(short = 'y', long, allow_negative_numbers = true)]
    pub y: i32,

    /// Frequency label (one printable ASCII character)
    #[arg(short, long)]
    pub frequency: char,

    /// Record file to modify (defaults to the configured binary file)
    #[arg(short, long)]
    pub binary: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline
    Run {
        /// Text grid to read (overrides the configuration)
        #[arg(short, long)]
        grid: Option<PathBuf>,

        /// Record file to write and reload (overrides the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List antennas
    Show {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Derive nefasto antennas and save the records
    Derive {
        /// Text grid to read (overrides the configuration)
        #[arg(short, long)]
        grid: Option<PathBuf>,

        /// Record file to write (overrides the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Insert an antenna into a record file
    Insert {
        #[command(flatten)]
        antenna: AntennaArgs,
    },

    /// Delete an antenna from a record file
    Delete {
        #[command(flatten)]
        antenna: AntennaArgs,
    },

    /// Show store counts
    Status {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compute BLAKE3 digest of a record file
    Hash {
        /// Record file to digest (defaults to the configured binary file)
        #[arg(short, long)]
        binary: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), AntennaError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Run { grid, output }) => {
            override_paths(&mut config, grid, output);
            cmd_run(&config, json_mode).map(|_| ())
        }
        Some(Commands::Show { source }) => cmd_show(&source.resolve(&config), json_mode),
        Some(Commands::Derive { grid, output }) => {
            override_paths(&mut config, grid, output);
            cmd_derive(&config, json_mode)
        }
        Some(Commands::Insert { antenna }) => {
            let path = antenna.binary.unwrap_or(config.binary_file);
            cmd_insert(&path, antenna.x, antenna.y, antenna.frequency)
        }
        Some(Commands::Delete { antenna }) => {
            let path = antenna.binary.unwrap_or(config.binary_file);
            cmd_delete(&path, antenna.x, antenna.y, antenna.frequency)
        }
        Some(Commands::Status { source }) => cmd_status(&source.resolve(&config), json_mode),
        Some(Commands::Hash { binary }) => {
            cmd_hash(&binary.unwrap_or(config.binary_file), json_mode).map(|_| ())
        }
        None => {
            // No subcommand - run the full pipeline by default
            cmd_run(&config, json_mode).map(|_| ())
        }
    }
}

fn override_paths(config: &mut AppConfig, grid: Option<PathBuf>, output: Option<PathBuf>) {
    if let Some(grid) = grid {
        config.grid_file = grid;
    }
    if let Some(output) = output {
        config.binary_file = output;
    }
}

// =============================================================================
// TESTS
// =============================================================================
