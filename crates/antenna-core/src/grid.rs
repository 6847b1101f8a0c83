//! # Grid Reader
//!
//! Text grid validation and ingestion.
//!
//! Each line is a row (`x`, 0-based). Within a row, every byte except space
//! and tab occupies one column (`y`, 0-based). `.` is an empty cell; any
//! other byte is an antenna with that raw byte as its frequency, the same
//! way the record decoder takes bytes. Line terminators (`\n` and `\r\n`)
//! are stripped before the row is read.

use crate::primitives::EMPTY_CELL;
use crate::store::{AntennaList, AntennaStore};
use crate::{Antenna, AntennaError, Frequency};
use std::io::BufRead;

/// The GridReader turns a text grid into store insertions.
///
/// Insertions are applied left to right, top to bottom, so the bottom-right
/// antenna ends up first in store order.
pub struct GridReader;

impl GridReader {
    /// Parse an in-memory grid into a fresh store.
    pub fn parse_str(text: &str) -> Result<AntennaList, AntennaError> {
        Self::read_from(text.as_bytes())
    }

    /// Read a grid from any buffered source into a fresh store.
    ///
    /// Nothing is returned on error; the partially filled store is dropped.
    pub fn read_from<R: BufRead>(reader: R) -> Result<AntennaList, AntennaError> {
        let mut store = AntennaList::new();
        Self::read_into(reader, &mut store)?;
        Ok(store)
    }

    /// Read a grid into an existing store.
    ///
    /// Returns the number of antennas actually inserted; cells landing on an
    /// occupied position are skipped.
    pub fn read_into<R, S>(mut reader: R, store: &mut S) -> Result<usize, AntennaError>
    where
        R: BufRead,
        S: AntennaStore,
    {
        let mut line = Vec::new();
        let mut row = 0usize;
        let mut inserted = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            for antenna in Self::scan_row(row, strip_terminator(&line))? {
                if store.insert(antenna)? {
                    inserted += 1;
                }
            }
            row += 1;
        }

        Ok(inserted)
    }

    /// Antennas of one row, in column order.
    fn scan_row(row: usize, bytes: &[u8]) -> Result<Vec<Antenna>, AntennaError> {
        let x = i32::try_from(row).map_err(|_| AntennaError::CoordinateOverflow)?;
        let mut antennas = Vec::new();
        let mut column = 0usize;

        for &byte in bytes {
            match byte {
                b' ' | b'\t' => continue,
                EMPTY_CELL => {}
                _ => {
                    let y = i32::try_from(column).map_err(|_| AntennaError::CoordinateOverflow)?;
                    antennas.push(Antenna::at(x, y, Frequency::from_byte(byte)));
                }
            }
            column += 1;
        }

        Ok(antennas)
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// =============================================================================
// TESTS
// =============================================================================
