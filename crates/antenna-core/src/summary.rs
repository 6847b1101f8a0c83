//! # Store Summary
//!
//! Counts extracted from a store for status output.

use crate::store::AntennaStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts extracted from a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    /// Total number of antennas in the store.
    pub total: usize,
    /// Antennas not produced by derivation.
    pub regular: usize,
    /// Antennas labelled with the nefasto marker.
    pub nefasto: usize,
    /// Regular antennas per frequency label, in label order.
    pub by_frequency: BTreeMap<char, usize>,
    /// Smallest `(x, y)` corner covering every antenna.
    pub min_corner: Option<(i32, i32)>,
    /// Largest `(x, y)` corner covering every antenna.
    pub max_corner: Option<(i32, i32)>,
}

impl StoreSummary {
    /// Compute the summary of a store.
    #[must_use]
    pub fn from_store<S: AntennaStore>(store: &S) -> Self {
        let mut summary = Self::default();

        for antenna in store.iter() {
            summary.total += 1;
            if antenna.is_nefasto() {
                summary.nefasto += 1;
            } else {
                summary.regular += 1;
                *summary
                    .by_frequency
                    .entry(antenna.frequency().as_char())
                    .or_insert(0) += 1;
            }

            let (x, y) = (antenna.x(), antenna.y());
            summary.min_corner = Some(match summary.min_corner {
                Some((mx, my)) => (mx.min(x), my.min(y)),
                None => (x, y),
            });
            summary.max_corner = Some(match summary.max_corner {
                Some((mx, my)) => (mx.max(x), my.max(y)),
                None => (x, y),
            });
        }

        summary
    }

    /// Number of distinct regular frequency labels.
    #[must_use]
    pub fn frequency_count(&self) -> usize {
        self.by_frequency.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
