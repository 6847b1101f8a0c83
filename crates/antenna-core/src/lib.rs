//! # antenna-core
//!
//! The antenna grid store and nefasto deriver - THE LOGIC.
//!
//! This crate keeps a collection of frequency-labelled antennas on an
//! integer grid, enforces one antenna per position, and derives nefasto
//! antennas on the midpoints of regular pairs whose distances are even on
//! both axes.
//!
//! ## Layout
//!
//! - `types`: `Position`, `Frequency`, `Antenna`, `AntennaError`
//! - `store`: the `AntennaStore` trait and the `AntennaList` store
//! - `nefasto`: the pairwise derivation pass
//! - `grid`: text grid reader
//! - `formats`: packed binary record codec
//! - `summary`: counts for status output
//!
//! ## Architectural Constraints
//!
//! - Synchronous and single-owner: every operation runs to completion
//! - Deterministic: same input, same store order, same bytes
//! - No logging dependency: derivation side effects go through
//!   [`NefastoObserver`]

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod grid;
pub mod nefasto;
pub mod primitives;
pub mod store;
pub mod summary;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Antenna, AntennaError, Frequency, Position};

// =============================================================================
// RE-EXPORTS: Store & Deriver
// =============================================================================

pub use grid::GridReader;
pub use nefasto::{DerivationReport, NefastoDeriver, NefastoObserver};
pub use store::{AntennaList, AntennaStore};
pub use summary::StoreSummary;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{decode_records, encode_records, read_records, write_records};

#[cfg(feature = "crypto-hash")]
pub use formats::{digest_bytes, records_digest};
