//! # Configuration
//!
//! Optional TOML configuration for the antenna CLI.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! reference pipeline:
//!
//! ```toml
//! grid_file = "antennasFile.txt"
//! binary_file = "antennas.bin"
//!
//! [[insertions]]
//! x = 3
//! y = 4
//! frequency = "A"
//!
//! [[insertions]]
//! x = 15
//! y = 5
//! frequency = "C"
//!
//! [[deletions]]
//! x = 15
//! y = 5
//! frequency = "C"
//! ```

use antenna_core::{Antenna, AntennaError, Frequency};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// One antenna named in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AntennaEntry {
    pub x: i32,
    pub y: i32,
    pub frequency: Frequency,
}

impl AntennaEntry {
    fn new(x: i32, y: i32, label: u8) -> Self {
        Self {
            x,
            y,
            frequency: Frequency::from_byte(label),
        }
    }
}

impl From<AntennaEntry> for Antenna {
    fn from(entry: AntennaEntry) -> Self {
        Antenna::at(entry.x, entry.y, entry.frequency)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Text grid read at the start of the pipeline.
    pub grid_file: PathBuf,

    /// Record file written after derivation and read back.
    pub binary_file: PathBuf,

    /// Antennas inserted after the grid is read.
    pub insertions: Vec<AntennaEntry>,

    /// Antennas deleted after the insertions.
    pub deletions: Vec<AntennaEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_file: PathBuf::from("antennasFile.txt"),
            binary_file: PathBuf::from("antennas.bin"),
            insertions: vec![AntennaEntry::new(3, 4, b'A'), AntennaEntry::new(15, 5, b'C')],
            deletions: vec![AntennaEntry::new(15, 5, b'C')],
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    ///
    /// Frequency labels must be printable ASCII, as on the command line.
    pub fn from_toml_str(text: &str) -> Result<Self, AntennaError> {
        let config: Self = toml::from_str(text).map_err(|e| AntennaError::Config(e.to_string()))?;

        let mut entries = config.insertions.iter().chain(&config.deletions);
        if let Some(bad) = entries.find(|e| !e.frequency.is_printable()) {
            return Err(AntennaError::Config(format!(
                "Frequency {:?} at ({}, {}) is not printable ASCII",
                bad.frequency.as_char(),
                bad.x,
                bad.y
            )));
        }

        Ok(config)
    }

    /// Load configuration from a file, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AntennaError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            AntennaError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AntennaError::Config(format!(
                "'{}' is {} bytes, maximum is {}",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            AntennaError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
