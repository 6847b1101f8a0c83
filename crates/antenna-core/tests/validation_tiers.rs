//! # Validation Tier Tests (T0-T3)
//!
//! If ANY tier fails, the system is INVALID.
//!
//! ## Tiers
//! - T0: Store Integrity
//! - T1: Nefasto Derivation
//! - T2: Grid and Record Codecs
//! - T3: Full Pipeline

use antenna_core::{
    Antenna, AntennaError, AntennaList, AntennaStore, Frequency, GridReader, NefastoDeriver,
    Position,
};

fn antenna(x: i32, y: i32, label: char) -> Antenna {
    Antenna::at(x, y, Frequency::from_label(label).expect("label"))
}

// =============================================================================
// TIER T0: STORE INTEGRITY
// =============================================================================

mod t0_store_integrity {
    use super::*;

    /// T0.1: Inserting the same position twice keeps the first frequency.
    #[test]
    fn duplicate_position_keeps_first() {
        let mut store = AntennaList::new();
        store.insert(antenna(3, 4, 'A')).expect("insert");
        store.insert(antenna(3, 4, 'Z')).expect("insert");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(Position::new(3, 4)), Some(antenna(3, 4, 'A')));
    }

    /// T0.2: Deleting a nonexistent triple leaves the count unchanged.
    #[test]
    fn delete_miss_is_noop() {
        let mut store = AntennaList::new();
        store.insert(antenna(3, 4, 'A')).expect("insert");

        assert!(!store.delete(antenna(9, 9, 'A')));
        assert!(!store.delete(antenna(3, 4, 'B')));
        assert_eq!(store.len(), 1);
    }

    /// T0.3: The sample insert/delete sequence leaves only the survivor.
    #[test]
    fn sample_mutations() {
        let mut store = AntennaList::new();
        store.insert(antenna(3, 4, 'A')).expect("insert");
        store.insert(antenna(15, 5, 'C')).expect("insert");
        assert!(store.delete(antenna(15, 5, 'C')));

        assert_eq!(store.snapshot(), vec![antenna(3, 4, 'A')]);
    }

    /// T0.4: Clear empties the store and can be repeated.
    #[test]
    fn clear_twice() {
        let mut store = GridReader::parse_str("AB\nCD\n").expect("parse");
        store.clear();
        store.clear();
        assert!(store.is_empty());
    }
}

// =============================================================================
// TIER T1: NEFASTO DERIVATION
// =============================================================================

mod t1_nefasto_derivation {
    use super::*;

    /// T1.1: (0,0) and (4,2) derive (2,1).
    #[test]
    fn even_distances_derive_midpoint() {
        let mut store = AntennaList::new();
        store.insert(antenna(0, 0, 'A')).expect("insert");
        store.insert(antenna(4, 2, 'B')).expect("insert");

        NefastoDeriver::derive_silent(&mut store).expect("derive");

        assert_eq!(store.get(Position::new(2, 1)), Some(antenna(2, 1, '#')));
    }

    /// T1.2: (0,0) and (3,2) derive nothing.
    #[test]
    fn odd_distance_derives_nothing() {
        let mut store = AntennaList::new();
        store.insert(antenna(0, 0, 'A')).expect("insert");
        store.insert(antenna(3, 2, 'B')).expect("insert");

        let report = NefastoDeriver::derive_silent(&mut store).expect("derive");

        assert!(report.derived.is_empty());
        assert_eq!(store.len(), 2);
    }

    /// T1.3: Frequencies do not matter, only geometry.
    #[test]
    fn mixed_frequencies_still_pair() {
        let mut store = AntennaList::new();
        store.insert(antenna(0, 0, 'a')).expect("insert");
        store.insert(antenna(2, 2, '0')).expect("insert");

        let report = NefastoDeriver::derive_silent(&mut store).expect("derive");

        assert_eq!(report.derived, vec![antenna(1, 1, '#')]);
    }

    /// T1.4: Derived antennas come first in store order after the pass.
    #[test]
    fn derived_antennas_are_prepended() {
        let mut store = AntennaList::new();
        store.insert(antenna(0, 0, 'A')).expect("insert");
        store.insert(antenna(4, 2, 'B')).expect("insert");

        NefastoDeriver::derive_silent(&mut store).expect("derive");

        assert_eq!(store.iter().next(), Some(antenna(2, 1, '#')));
    }

    /// T1.5: The observer is told about every derived antenna, in order.
    #[test]
    fn observer_matches_report() {
        let mut store = GridReader::parse_str("A...A\n.....\nA...A\n").expect("parse");
        let mut seen = Vec::new();

        let report = NefastoDeriver::derive(&mut store, &mut |a: &Antenna| seen.push(*a))
            .expect("derive");

        assert_eq!(seen, report.derived);
        assert!(seen.iter().all(Antenna::is_nefasto));
    }
}

// =============================================================================
// TIER T2: GRID AND RECORD CODECS
// =============================================================================

mod t2_codecs {
    use super::*;
    use antenna_core::primitives::RECORD_SIZE;
    use antenna_core::{decode_records, encode_records};

    /// T2.1: Grid cells map to (row, column).
    #[test]
    fn grid_coordinates() {
        let store = GridReader::parse_str("....\n..0.\n.A..\n").expect("parse");

        assert_eq!(store.get(Position::new(1, 2)), Some(antenna(1, 2, '0')));
        assert_eq!(store.get(Position::new(2, 1)), Some(antenna(2, 1, 'A')));
    }

    /// T2.2: Spaces and tabs occupy no column.
    #[test]
    fn grid_whitespace_rule() {
        let store = GridReader::parse_str("A B\n").expect("parse");

        assert_eq!(store.get(Position::new(0, 1)), Some(antenna(0, 1, 'B')));
        assert_eq!(store.get(Position::new(0, 2)), None);
    }

    /// T2.3: Each record is exactly nine bytes.
    #[test]
    fn record_width() {
        let store = GridReader::parse_str("AB\n").expect("parse");
        let bytes = encode_records(&store).expect("encode");

        assert_eq!(bytes.len(), 2 * RECORD_SIZE);
    }

    /// T2.4: Empty stores cannot be encoded.
    #[test]
    fn empty_store_encode_fails() {
        let result = encode_records(&AntennaList::new());
        assert!(matches!(result, Err(AntennaError::EmptyStore)));
    }

    /// T2.5: Round trip keeps contents and order.
    #[test]
    fn record_roundtrip() {
        let mut store = GridReader::parse_str("A...A\n.....\n..B..\n").expect("parse");
        NefastoDeriver::derive_silent(&mut store).expect("derive");

        let bytes = encode_records(&store).expect("encode");
        let restored = decode_records(&bytes).expect("decode");

        assert_eq!(restored.snapshot(), store.snapshot());
    }
}

// =============================================================================
// TIER T3: FULL PIPELINE
// =============================================================================

mod t3_pipeline {
    use super::*;
    use antenna_core::{read_records, write_records};
    use std::fs::File;
    use std::io::BufReader;

    /// T3.1: grid file -> mutate -> derive -> record file -> reload.
    #[test]
    fn grid_to_records_and_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let grid_path = dir.path().join("antennas.txt");
        let bin_path = dir.path().join("antennas.bin");
        std::fs::write(&grid_path, "A...\n....\n..A.\n").expect("write grid");

        let file = File::open(&grid_path).expect("open grid");
        let mut store = GridReader::read_from(BufReader::new(file)).expect("read grid");
        store.insert(antenna(3, 4, 'A')).expect("insert");
        store.insert(antenna(15, 5, 'C')).expect("insert");
        store.delete(antenna(15, 5, 'C'));

        let report = NefastoDeriver::derive_silent(&mut store).expect("derive");
        // (0,0)-(2,2) -> (1,1); (0,0)-(3,4) odd; (2,2)-(3,4) odd.
        assert_eq!(report.derived, vec![antenna(1, 1, '#')]);

        let out = File::create(&bin_path).expect("create bin");
        write_records(&store, out).expect("write records");

        let reloaded = read_records(File::open(&bin_path).expect("open bin")).expect("read");
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }
}
