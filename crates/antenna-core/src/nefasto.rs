//! # Nefasto Deriver
//!
//! Pairwise derivation of nefasto antennas.
//!
//! For every unordered pair of regular antennas whose row and column
//! distances are both even, a derived antenna labelled `'#'` is placed on
//! their midpoint. Rules:
//! - The scan runs over a snapshot taken before the pass starts
//! - Derived antennas are merged immediately but never scanned as sources
//! - Each pair is visited exactly once
//! - An occupied midpoint suppresses the insertion (first occupant wins)

use crate::store::AntennaStore;
use crate::{Antenna, AntennaError};

// =============================================================================
// OBSERVER
// =============================================================================

/// Receives each derived antenna right after it is merged into the store.
///
/// Suppressed midpoints are not reported.
pub trait NefastoObserver {
    fn on_derived(&mut self, antenna: &Antenna);
}

impl<F> NefastoObserver for F
where
    F: FnMut(&Antenna),
{
    fn on_derived(&mut self, antenna: &Antenna) {
        self(antenna);
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Outcome of one derivation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationReport {
    /// Pairs of regular antennas visited.
    pub pairs_scanned: usize,
    /// Pairs with even distances on both axes.
    pub pairs_matched: usize,
    /// Matched pairs whose midpoint was already occupied.
    pub suppressed: usize,
    /// Antennas actually inserted, in insertion order.
    pub derived: Vec<Antenna>,
}

impl DerivationReport {
    /// Number of antennas added to the store.
    #[must_use]
    pub fn derived_count(&self) -> usize {
        self.derived.len()
    }
}

// =============================================================================
// DERIVER
// =============================================================================

/// The NefastoDeriver runs derivation passes against any store.
pub struct NefastoDeriver;

impl NefastoDeriver {
    /// Run one derivation pass, notifying `observer` for every new antenna.
    ///
    /// Only regular antennas present when the pass starts are paired. Pairs
    /// are visited in store order: the first antenna of the snapshot with
    /// every later one, then the second with every later one, and so on.
    pub fn derive<S, O>(store: &mut S, observer: &mut O) -> Result<DerivationReport, AntennaError>
    where
        S: AntennaStore,
        O: NefastoObserver + ?Sized,
    {
        let sources: Vec<Antenna> = store.iter().filter(|a| !a.is_nefasto()).collect();
        let mut report = DerivationReport::default();

        for (i, first) in sources.iter().enumerate() {
            for second in &sources[i + 1..] {
                report.pairs_scanned += 1;

                let Some(midpoint) = first.position().even_midpoint(second.position()) else {
                    continue;
                };
                report.pairs_matched += 1;

                if store.contains(midpoint) {
                    report.suppressed += 1;
                    continue;
                }

                // Announce only what actually landed in the store.
                let derived = Antenna::nefasto(midpoint);
                if store.insert(derived)? {
                    observer.on_derived(&derived);
                    report.derived.push(derived);
                }
            }
        }

        Ok(report)
    }

    /// Run one derivation pass without an observer.
    pub fn derive_silent<S: AntennaStore>(store: &mut S) -> Result<DerivationReport, AntennaError> {
        Self::derive(store, &mut |_: &Antenna| {})
    }
}

// =============================================================================
// TESTS
// =============================================================================
