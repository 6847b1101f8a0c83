//! # Core Type Definitions
//!
//! This module contains all core types for the antenna grid:
//! - Grid coordinates (`Position`)
//! - Frequency labels (`Frequency`)
//! - The stored entity (`Antenna`)
//! - Error types (`AntennaError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Are `Copy` and immutable once built

use crate::primitives::NEFASTO_MARKER;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// POSITION
// =============================================================================

/// A cell on the integer grid.
///
/// `x` is the row, `y` is the column. The pair is the uniqueness key of a
/// store: no two antennas may share a position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Row.
    pub x: i32,
    /// Column.
    pub y: i32,
}

impl Position {
    /// Create a position from row and column.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Midpoint with this position when both axis distances are even.
    ///
    /// Distances are absolute and compared by parity only; zero counts as
    /// even. The sum is taken in 64-bit so extreme coordinates cannot
    /// overflow, and the halved result always lies between the operands.
    #[must_use]
    pub fn even_midpoint(self, other: Self) -> Option<Self> {
        let dist_x = self.x.abs_diff(other.x);
        let dist_y = self.y.abs_diff(other.y);
        if dist_x % 2 != 0 || dist_y % 2 != 0 {
            return None;
        }

        let mid_x = (i64::from(self.x) + i64::from(other.x)) / 2;
        let mid_y = (i64::from(self.y) + i64::from(other.y)) / 2;
        Some(Self::new(
            i32::try_from(mid_x).ok()?,
            i32::try_from(mid_y).ok()?,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// FREQUENCY
// =============================================================================

/// A single-byte frequency label.
///
/// The label `'#'` is reserved for derived (nefasto) antennas. Labels typed
/// by a user go through [`Frequency::from_label`] and must be printable
/// ASCII; labels read from grids or record files are taken byte-for-byte.
///
/// Serde maps the byte to the `char` with the same code point (U+0000 to
/// U+00FF), so every label that serializes also deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct Frequency(u8);

impl Frequency {
    /// The marker carried by every derived antenna.
    pub const NEFASTO: Self = Self(NEFASTO_MARKER);

    /// Wrap a raw byte without validation.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Get the raw byte value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// The `char` with the same code point as the byte.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    /// Whether this is the `'#'` marker of derived antennas.
    #[must_use]
    pub const fn is_nefasto(self) -> bool {
        self.0 == NEFASTO_MARKER
    }

    /// Whether the label is printable ASCII.
    #[must_use]
    pub const fn is_printable(self) -> bool {
        self.0.is_ascii_graphic()
    }

    /// Build a label from user input; only printable ASCII is accepted.
    pub fn from_label(c: char) -> Result<Self, AntennaError> {
        match Self::try_from(c) {
            Ok(frequency) if frequency.is_printable() => Ok(frequency),
            _ => Err(AntennaError::InvalidFrequency(c)),
        }
    }
}

impl TryFrom<char> for Frequency {
    type Error = AntennaError;

    /// Inverse of [`Frequency::as_char`]; fails above U+00FF.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .map(Self)
            .map_err(|_| AntennaError::InvalidFrequency(c))
    }
}

impl From<Frequency> for char {
    fn from(frequency: Frequency) -> Self {
        frequency.as_char()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// ANTENNA
// =============================================================================

/// A positioned, frequency-tagged point on the grid.
///
/// Antennas are immutable: changing one means deleting it and inserting a
/// replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Antenna {
    position: Position,
    frequency: Frequency,
}

impl Antenna {
    /// Create an antenna at a position.
    #[must_use]
    pub const fn new(position: Position, frequency: Frequency) -> Self {
        Self {
            position,
            frequency,
        }
    }

    /// Build an antenna directly from coordinates.
    #[must_use]
    pub const fn at(x: i32, y: i32, frequency: Frequency) -> Self {
        Self::new(Position::new(x, y), frequency)
    }

    /// A derived antenna at the given position.
    #[must_use]
    pub const fn nefasto(position: Position) -> Self {
        Self::new(position, Frequency::NEFASTO)
    }

    /// Get the grid position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.position.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.position.y
    }

    /// Get the frequency label.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Whether this antenna was synthesized by the nefasto deriver.
    #[must_use]
    pub const fn is_nefasto(&self) -> bool {
        self.frequency.is_nefasto()
    }
}

/// One console line per antenna; derived antennas are labelled "Nefasto".
impl fmt::Display for Antenna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_nefasto() {
            "Nefasto"
        } else {
            "Antenna"
        };
        write!(
            f,
            "{} at {} with frequency '{}'",
            kind, self.position, self.frequency
        )
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building, deriving, or encoding a store.
///
/// A lookup or delete miss is never an error. Every variant here is
/// recoverable: callers may continue with an empty store.
#[derive(Debug, Error)]
pub enum AntennaError {
    /// The store could not grow to hold another antenna.
    #[error("Allocation failed while growing the store")]
    Allocation,

    /// An empty store cannot be written as a record stream.
    #[error("Refusing to encode an empty store")]
    EmptyStore,

    /// A frequency label that cannot be used.
    #[error("Invalid frequency label: {0:?}")]
    InvalidFrequency(char),

    /// A grid row or column index does not fit in an `i32` coordinate.
    #[error("Grid coordinate out of range")]
    CoordinateOverflow,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// A configuration file could not be used.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AntennaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_midpoint_on_both_axes() {
        let a = Position::new(0, 0);
        let b = Position::new(4, 2);
        assert_eq!(a.even_midpoint(b), Some(Position::new(2, 1)));
        assert_eq!(b.even_midpoint(a), Some(Position::new(2, 1)));
    }

    #[test]
    fn odd_distance_has_no_midpoint() {
        let a = Position::new(0, 0);
        assert_eq!(a.even_midpoint(Position::new(3, 2)), None);
        assert_eq!(a.even_midpoint(Position::new(2, 3)), None);
    }

    #[test]
    fn zero_distance_counts_as_even() {
        let a = Position::new(5, 1);
        let b = Position::new(5, 7);
        assert_eq!(a.even_midpoint(b), Some(Position::new(5, 4)));
    }

    #[test]
    fn negative_coordinates_truncate_toward_zero() {
        let a = Position::new(-4, -6);
        let b = Position::new(2, 0);
        assert_eq!(a.even_midpoint(b), Some(Position::new(-1, -3)));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let a = Position::new(i32::MAX - 1, i32::MIN);
        let b = Position::new(i32::MAX - 3, i32::MIN + 2);
        assert_eq!(
            a.even_midpoint(b),
            Some(Position::new(i32::MAX - 2, i32::MIN + 1))
        );
    }

    #[test]
    fn labels_must_be_printable_ascii() {
        assert!(Frequency::from_label('A').is_ok());
        assert!(matches!(
            Frequency::from_label(' '),
            Err(AntennaError::InvalidFrequency(' '))
        ));
        assert!(Frequency::from_label('é').is_err());
    }

    #[test]
    fn char_conversion_covers_every_byte() {
        for byte in 0..=u8::MAX {
            let frequency = Frequency::from_byte(byte);
            let back = Frequency::try_from(frequency.as_char()).expect("byte char");
            assert_eq!(back, frequency);
        }
        assert!(Frequency::try_from('\u{100}').is_err());
    }

    #[test]
    fn decoded_high_byte_survives_json() {
        let antenna = Antenna::at(0, 0, Frequency::from_byte(0xE9));
        let json = serde_json::to_string(&antenna).expect("serialize");
        let back: Antenna = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, antenna);
    }

    #[test]
    fn nefasto_marker_is_hash() {
        assert!(Frequency::NEFASTO.is_nefasto());
        assert_eq!(Frequency::NEFASTO.as_char(), '#');
        assert!(Antenna::nefasto(Position::new(1, 1)).is_nefasto());
    }

    #[test]
    fn display_distinguishes_nefasto() {
        let regular = Antenna::at(3, 4, Frequency::from_byte(b'A'));
        let derived = Antenna::nefasto(Position::new(2, 1));
        assert_eq!(regular.to_string(), "Antenna at (3, 4) with frequency 'A'");
        assert_eq!(derived.to_string(), "Nefasto at (2, 1) with frequency '#'");
    }

    #[test]
    fn antenna_serializes_frequency_as_char() {
        let antenna = Antenna::at(1, 2, Frequency::from_byte(b'0'));
        let json = serde_json::to_string(&antenna).expect("serialize");
        assert_eq!(json, r#"{"position":{"x":1,"y":2},"frequency":"0"}"#);

        let back: Antenna = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, antenna);
    }
}
