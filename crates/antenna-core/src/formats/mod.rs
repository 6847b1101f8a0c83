//! # Formats
//!
//! External representations of a store snapshot.
//!
//! - `records`: the packed fixed-width binary record stream

pub mod records;

pub use records::{
    decode_record, decode_records, encode_record, encode_records, read_records, write_records,
};

#[cfg(feature = "crypto-hash")]
pub use records::{digest_bytes, records_digest};
