//! # Innate Primitives
//!
//! Hardcoded runtime constants for the antenna grid.
//!
//! These primitives are compiled into the binary and are immutable at runtime.

/// Frequency byte carried by every derived (nefasto) antenna.
///
/// Antennas with this label never take part in a derivation scan.
pub const NEFASTO_MARKER: u8 = b'#';

/// Grid byte for an empty cell. It occupies a column but is not an antenna.
pub const EMPTY_CELL: u8 = b'.';

/// Size of one packed record: `x: i32`, `y: i32`, `frequency: u8`.
///
/// Records carry no header, count prefix, or alignment padding.
pub const RECORD_SIZE: usize = 4 + 4 + 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum size of a text grid accepted for parsing (16 MB).
pub const MAX_GRID_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum size of a record file accepted for decoding (144 MB).
///
/// Sixteen million records.
pub const MAX_RECORD_FILE_SIZE: u64 = (RECORD_SIZE as u64) * 16 * 1024 * 1024;
