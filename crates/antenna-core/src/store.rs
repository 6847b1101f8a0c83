//! # Antenna Store
//!
//! The uniqueness-enforcing collection of antennas.
//!
//! This module implements the `AntennaStore` trait.
//! Occupancy is indexed with a `BTreeSet` for deterministic behavior.

use crate::{Antenna, AntennaError, Position};
use std::collections::BTreeSet;

// =============================================================================
// ANTENNASTORE TRAIT
// =============================================================================

/// The AntennaStore trait defines the collection operations.
///
/// A store holds at most one antenna per position. Iteration is
/// most-recently-inserted first and is reproducible.
pub trait AntennaStore {
    /// Insert an antenna.
    ///
    /// Returns `Ok(false)` without touching the store if the position is
    /// already occupied. An allocation failure leaves the store unchanged.
    fn insert(&mut self, antenna: Antenna) -> Result<bool, AntennaError>;

    /// Remove the antenna matching position AND frequency exactly.
    ///
    /// A miss (including a position match with a different frequency)
    /// is not an error; it returns `false`.
    fn delete(&mut self, antenna: Antenna) -> bool;

    /// Release every antenna. Safe on an empty store.
    fn clear(&mut self);

    /// Get the antenna occupying a position.
    fn get(&self, position: Position) -> Option<Antenna>;

    /// Check if a position is occupied.
    fn contains(&self, position: Position) -> bool {
        self.get(position).is_some()
    }

    /// Iterate antennas in store order without mutating the store.
    fn iter(&self) -> impl Iterator<Item = Antenna> + '_;

    /// Get the total number of antennas.
    fn len(&self) -> usize;

    /// Check if the store holds no antennas.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned copy of the store contents in iteration order.
    fn snapshot(&self) -> Vec<Antenna> {
        self.iter().collect()
    }
}

// =============================================================================
// ANTENNA LIST IMPLEMENTATION
// =============================================================================

/// The main store structure.
///
/// Antennas are kept in insertion order (newest last) and iterated in
/// reverse, so the most recent insertion comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AntennaList {
    /// Insertion order, oldest first.
    entries: Vec<Antenna>,

    /// Occupied positions.
    occupied: BTreeSet<Position>,
}

impl AntennaList {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store whose iteration order equals the given order.
    ///
    /// When a position repeats, its first occurrence wins.
    pub fn from_ordered<I>(antennas: I) -> Result<Self, AntennaError>
    where
        I: IntoIterator<Item = Antenna>,
    {
        let mut store = Self::new();
        for antenna in antennas {
            if store.occupied.insert(antenna.position()) {
                store
                    .entries
                    .try_reserve(1)
                    .map_err(|_| AntennaError::Allocation)?;
                store.entries.push(antenna);
            }
        }
        store.entries.reverse();
        Ok(store)
    }
}

impl AntennaStore for AntennaList {
    fn insert(&mut self, antenna: Antenna) -> Result<bool, AntennaError> {
        if self.occupied.contains(&antenna.position()) {
            return Ok(false);
        }

        self.entries
            .try_reserve(1)
            .map_err(|_| AntennaError::Allocation)?;
        self.entries.push(antenna);
        self.occupied.insert(antenna.position());
        Ok(true)
    }

    fn delete(&mut self, antenna: Antenna) -> bool {
        let Some(index) = self.entries.iter().rposition(|a| *a == antenna) else {
            return false;
        };
        self.entries.remove(index);
        self.occupied.remove(&antenna.position());
        true
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.occupied.clear();
    }

    fn get(&self, position: Position) -> Option<Antenna> {
        if !self.occupied.contains(&position) {
            return None;
        }
        self.entries
            .iter()
            .rev()
            .find(|a| a.position() == position)
            .copied()
    }

    fn contains(&self, position: Position) -> bool {
        self.occupied.contains(&position)
    }

    fn iter(&self) -> impl Iterator<Item = Antenna> + '_ {
        self.entries.iter().rev().copied()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
