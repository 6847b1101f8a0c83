//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::AppConfig;
use antenna_core::{
    Antenna, AntennaError, AntennaList, AntennaStore, DerivationReport, Frequency, GridReader,
    NefastoDeriver, StoreSummary, digest_bytes, encode_records,
    primitives::{MAX_GRID_FILE_SIZE, MAX_RECORD_FILE_SIZE, RECORD_SIZE},
    read_records,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), AntennaError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AntennaError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(AntennaError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, AntennaError> {
    let canonical = path.canonicalize().map_err(|e| {
        AntennaError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(AntennaError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path.
///
/// The parent directory must exist; the returned path joins the canonical
/// parent with the original file name.
fn validate_output_path(path: &Path) -> Result<PathBuf, AntennaError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        AntennaError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(AntennaError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| AntennaError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// LOADING AND SAVING
// =============================================================================

/// Where antennas are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A text grid.
    Grid(PathBuf),
    /// A packed binary record file.
    Binary(PathBuf),
}

impl Source {
    /// Read the source into a fresh store.
    pub fn load(&self) -> Result<AntennaList, AntennaError> {
        match self {
            Self::Grid(path) => load_grid(path),
            Self::Binary(path) => load_records(path),
        }
    }
}

/// Read a text grid file into a fresh store.
pub fn load_grid(path: &Path) -> Result<AntennaList, AntennaError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_GRID_FILE_SIZE)?;

    let file = File::open(&validated)?;
    let store = GridReader::read_from(BufReader::new(file))?;

    tracing::debug!("Read {} antennas from grid {:?}", store.len(), validated);
    Ok(store)
}

/// Read a record file into a fresh store.
pub fn load_records(path: &Path) -> Result<AntennaList, AntennaError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_RECORD_FILE_SIZE)?;

    let file = File::open(&validated)?;
    let store = read_records(BufReader::new(file))?;

    tracing::debug!("Read {} records from {:?}", store.len(), validated);
    Ok(store)
}

/// Write a store as a record file.
///
/// The store is encoded before the file is opened, so an empty store
/// neither creates nor truncates the target.
pub fn save_records(store: &AntennaList, path: &Path) -> Result<usize, AntennaError> {
    let bytes = encode_records(store)?;
    let validated = validate_output_path(path)?;

    std::fs::write(&validated, &bytes)
        .map_err(|e| AntennaError::Io(format!("Write '{}': {}", validated.display(), e)))?;

    tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), validated);
    Ok(bytes.len())
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Print every antenna in store order.
pub fn print_store(store: &AntennaList, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&store.snapshot()).unwrap_or_default()
        );
        return;
    }

    for antenna in store.iter() {
        println!("{}", antenna);
    }
}

/// Print a human-readable notice.
///
/// In JSON mode stdout carries only JSON, so the notice goes to the log.
fn notice(json_mode: bool, message: &str) {
    if json_mode {
        tracing::info!("{}", message);
    } else {
        println!("{}", message);
    }
}

/// Derive with a notice for every new nefasto antenna.
fn derive_with_notices(
    store: &mut AntennaList,
    json_mode: bool,
) -> Result<DerivationReport, AntennaError> {
    let report = NefastoDeriver::derive(store, &mut |antenna: &Antenna| {
        notice(
            json_mode,
            &format!("Nefasto effect inserted on: {}", antenna.position()),
        );
    })?;

    tracing::info!(
        "Derivation scanned {} pairs: {} matched, {} derived, {} suppressed",
        report.pairs_scanned,
        report.pairs_matched,
        report.derived_count(),
        report.suppressed
    );
    Ok(report)
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// What happened during a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Store contents before derivation, in store order.
    pub listed: Vec<Antenna>,
    /// Derivation pass report.
    pub report: DerivationReport,
    /// Bytes written to the record file, if saving succeeded.
    pub bytes_saved: Option<usize>,
    /// Store contents read back from the record file, if reloading succeeded.
    pub reloaded: Option<Vec<Antenna>>,
}

impl RunOutcome {
    /// The single JSON document printed by `run` in JSON mode.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "antennas": self.listed,
            "pairs_scanned": self.report.pairs_scanned,
            "pairs_matched": self.report.pairs_matched,
            "suppressed": self.report.suppressed,
            "derived": self.report.derived,
            "bytes_saved": self.bytes_saved,
            "reloaded": self.reloaded
        })
    }
}

/// Run the full pipeline.
///
/// grid -> sample insertions -> sample deletions -> list -> derive ->
/// save records -> reload -> list. Failing to read the grid continues with
/// an empty store; failing to save or reload prints a notice and continues.
/// In JSON mode the listings are folded into one document printed at the
/// end and the notices are logged instead.
pub fn cmd_run(config: &AppConfig, json_mode: bool) -> Result<RunOutcome, AntennaError> {
    tracing::info!("Running pipeline on {:?}", config.grid_file);

    let mut store = match load_grid(&config.grid_file) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("Could not read grid {:?}: {}", config.grid_file, e);
            AntennaList::new()
        }
    };
    if store.is_empty() {
        notice(json_mode, "Antenna list is empty after reading from text file.");
    }

    for entry in &config.insertions {
        store.insert(Antenna::from(*entry))?;
    }
    for entry in &config.deletions {
        store.delete(Antenna::from(*entry));
    }

    if !json_mode {
        print_store(&store, false);
    }
    let listed = store.snapshot();
    let report = derive_with_notices(&mut store, json_mode)?;

    let bytes_saved = match save_records(&store, &config.binary_file) {
        Ok(bytes) => {
            notice(
                json_mode,
                &format!(
                    "Antenna list successfully saved to {}",
                    config.binary_file.display()
                ),
            );
            Some(bytes)
        }
        Err(e) => {
            tracing::warn!("Could not save {:?}: {}", config.binary_file, e);
            notice(json_mode, "Error saving antenna list to binary file.");
            None
        }
    };

    store.clear();

    let reloaded = match load_records(&config.binary_file) {
        Ok(reloaded) if !reloaded.is_empty() => {
            notice(json_mode, "Antenna list successfully loaded from binary file.");
            if !json_mode {
                print_store(&reloaded, false);
            }
            Some(reloaded.snapshot())
        }
        Ok(_) => {
            notice(json_mode, "Error reading antenna list from binary file.");
            None
        }
        Err(e) => {
            tracing::warn!("Could not reload {:?}: {}", config.binary_file, e);
            notice(json_mode, "Error reading antenna list from binary file.");
            None
        }
    };

    let outcome = RunOutcome {
        listed,
        report,
        bytes_saved,
        reloaded,
    };
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome.to_json()).unwrap_or_default()
        );
    }
    Ok(outcome)
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// List antennas from a grid or record file.
pub fn cmd_show(source: &Source, json_mode: bool) -> Result<(), AntennaError> {
    let store = source.load()?;
    print_store(&store, json_mode);
    Ok(())
}

// =============================================================================
// DERIVE COMMAND
// =============================================================================

/// Read a grid, derive, and save the records.
pub fn cmd_derive(config: &AppConfig, json_mode: bool) -> Result<(), AntennaError> {
    let mut store = load_grid(&config.grid_file)?;
    let report = derive_with_notices(&mut store, json_mode)?;
    let bytes = save_records(&store, &config.binary_file)?;

    if json_mode {
        let output = serde_json::json!({
            "grid_file": config.grid_file.to_string_lossy(),
            "binary_file": config.binary_file.to_string_lossy(),
            "pairs_scanned": report.pairs_scanned,
            "pairs_matched": report.pairs_matched,
            "suppressed": report.suppressed,
            "derived": report.derived,
            "bytes_written": bytes
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Derived {} nefasto antennas ({} pairs scanned, {} suppressed)",
        report.derived_count(),
        report.pairs_scanned,
        report.suppressed
    );
    println!(
        "Wrote {} antennas ({} bytes) to {:?}",
        store.len(),
        bytes,
        config.binary_file
    );

    Ok(())
}

// =============================================================================
// INSERT / DELETE COMMANDS
// =============================================================================

/// Insert an antenna into a record file, creating the file if needed.
pub fn cmd_insert(path: &Path, x: i32, y: i32, label: char) -> Result<(), AntennaError> {
    let antenna = Antenna::at(x, y, Frequency::from_label(label)?);

    let mut store = if path.exists() {
        load_records(path)?
    } else {
        AntennaList::new()
    };

    if !store.insert(antenna)? {
        println!(
            "Position {} is already occupied; nothing inserted",
            antenna.position()
        );
        return Ok(());
    }

    save_records(&store, path)?;
    println!("Inserted {}", antenna);
    Ok(())
}

/// Delete an antenna from a record file.
///
/// A miss is reported but is not an error. Deleting the last antenna is an
/// error because an empty store cannot be written.
pub fn cmd_delete(path: &Path, x: i32, y: i32, label: char) -> Result<(), AntennaError> {
    let antenna = Antenna::at(x, y, Frequency::from_label(label)?);
    let mut store = load_records(path)?;

    if !store.delete(antenna) {
        println!("No antenna matching {}; nothing deleted", antenna);
        return Ok(());
    }

    save_records(&store, path)?;
    println!("Deleted {}", antenna);
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store counts.
pub fn cmd_status(source: &Source, json_mode: bool) -> Result<(), AntennaError> {
    let store = source.load()?;
    let summary = StoreSummary::from_store(&store);

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Antenna Store Status");
    println!("====================");
    println!("Source:      {:?}", source);
    println!();
    println!("Antennas:    {}", summary.total);
    println!("Regular:     {}", summary.regular);
    println!("Nefasto:     {}", summary.nefasto);
    println!("Frequencies: {}", summary.frequency_count());
    for (label, count) in &summary.by_frequency {
        println!("  '{}': {}", label, count);
    }
    if let (Some(min), Some(max)) = (summary.min_corner, summary.max_corner) {
        println!("Bounds:      {:?} .. {:?}", min, max);
    }

    Ok(())
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// Compute BLAKE3 digest of a record file's bytes as stored on disk.
///
/// Returns the hex digest.
pub fn cmd_hash(path: &Path, json_mode: bool) -> Result<String, AntennaError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_RECORD_FILE_SIZE)?;

    let bytes = std::fs::read(&validated)?;
    let digest = digest_bytes(&bytes);

    if json_mode {
        let output = serde_json::json!({
            "binary_file": path.to_string_lossy(),
            "bytes": bytes.len(),
            "records": bytes.len() / RECORD_SIZE,
            "trailing_bytes": bytes.len() % RECORD_SIZE,
            "blake3": digest
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(digest);
    }

    println!("BLAKE3: {}", digest);
    Ok(digest)
}
