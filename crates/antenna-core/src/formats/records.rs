//! # Record Format
//!
//! Binary serialization of a store as packed fixed-width records.
//!
//! Format: a plain concatenation of records in store order. No header, no
//! count prefix, no padding. Each record is `RECORD_SIZE` (9) bytes:
//! - 4 bytes: `x` as little-endian `i32`
//! - 4 bytes: `y` as little-endian `i32`
//! - 1 byte: frequency
//!
//! Decoding stops at the last complete record; a shorter trailing chunk is
//! discarded without error. A decoded store iterates in file order, so
//! encode -> decode -> encode is byte-identical.
//!
//! File I/O operations are in the app layer.

use crate::primitives::RECORD_SIZE;
use crate::store::{AntennaList, AntennaStore};
use crate::{Antenna, AntennaError, Frequency};
use std::io::{Read, Write};

// =============================================================================
// SINGLE RECORD
// =============================================================================

/// Encode one antenna as a packed record.
#[must_use]
pub fn encode_record(antenna: &Antenna) -> [u8; RECORD_SIZE] {
    let mut bytes = [0u8; RECORD_SIZE];
    bytes[0..4].copy_from_slice(&antenna.x().to_le_bytes());
    bytes[4..8].copy_from_slice(&antenna.y().to_le_bytes());
    bytes[8] = antenna.frequency().as_byte();
    bytes
}

/// Decode one packed record.
#[must_use]
pub fn decode_record(bytes: &[u8; RECORD_SIZE]) -> Antenna {
    let x = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let y = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    Antenna::at(x, y, Frequency::from_byte(bytes[8]))
}

// =============================================================================
// RECORD STREAM
// =============================================================================

/// Serialize a store to bytes in store order.
///
/// This is a pure transformation - no file I/O.
/// An empty store is refused with `AntennaError::EmptyStore`.
pub fn encode_records<S: AntennaStore>(store: &S) -> Result<Vec<u8>, AntennaError> {
    if store.is_empty() {
        return Err(AntennaError::EmptyStore);
    }

    let size = store.len().saturating_mul(RECORD_SIZE);
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(size)
        .map_err(|_| AntennaError::Allocation)?;
    for antenna in store.iter() {
        bytes.extend_from_slice(&encode_record(&antenna));
    }
    Ok(bytes)
}

/// Deserialize a store from bytes.
///
/// This is a pure transformation - no file I/O.
/// A trailing partial record is ignored. When a position repeats, the
/// first record for it wins.
pub fn decode_records(bytes: &[u8]) -> Result<AntennaList, AntennaError> {
    AntennaList::from_ordered(bytes.chunks_exact(RECORD_SIZE).filter_map(|chunk| {
        <&[u8; RECORD_SIZE]>::try_from(chunk)
            .ok()
            .map(decode_record)
    }))
}

/// Encode a store and write it in one piece.
///
/// The store is encoded before anything is written, so an empty store never
/// touches the writer. Returns the number of bytes written.
pub fn write_records<S, W>(store: &S, mut writer: W) -> Result<usize, AntennaError>
where
    S: AntennaStore,
    W: Write,
{
    let bytes = encode_records(store)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len())
}

/// Read a record stream until end of input.
///
/// On a read error nothing decoded so far is returned.
pub fn read_records<R: Read>(mut reader: R) -> Result<AntennaList, AntennaError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_records(&bytes)
}

/// BLAKE3 digest of raw bytes, as lowercase hex.
///
/// Use this for a record file as stored on disk: duplicate records and a
/// partial tail change the digest.
///
/// # Requires
///
/// This function is only available with the `crypto-hash` feature enabled.
#[cfg(feature = "crypto-hash")]
pub fn digest_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// BLAKE3 digest of the store's canonical record stream, as lowercase hex.
///
/// Two stores with the same contents in the same order hash alike,
/// whatever file they were decoded from.
///
/// # Requires
///
/// This function is only available with the `crypto-hash` feature enabled.
#[cfg(feature = "crypto-hash")]
pub fn records_digest<S: AntennaStore>(store: &S) -> Result<String, AntennaError> {
    Ok(digest_bytes(&encode_records(store)?))
}

// =============================================================================
// TESTS
// =============================================================================
