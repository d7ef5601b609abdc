//! A player's fleet: the ships placed on their grid.

use crate::config::NUM_SHIPS;
use crate::ship::{Ship, ShipId, ShipKind};

/// The set of ships owned by one player. Each kind appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self {
            ships: Vec::with_capacity(NUM_SHIPS),
        }
    }

    /// Add a ship. Callers guarantee kind uniqueness.
    pub(crate) fn push(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id() == id)
    }

    pub fn by_kind(&self, kind: ShipKind) -> Option<&Ship> {
        self.ships.iter().find(|s| s.kind() == kind)
    }

    /// Returns `true` when every ship is sunk.
    ///
    /// An empty fleet is never reported sunk, so a game cannot end before any
    /// ship is placed.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Lengths of ships still afloat, in fleet order. Sunk ships report zero.
    pub fn lengths_remaining(&self) -> [usize; NUM_SHIPS] {
        let mut lens = [0usize; NUM_SHIPS];
        for (slot, ship) in lens.iter_mut().zip(self.ships.iter()) {
            if !ship.is_sunk() {
                *slot = ship.size();
            }
        }
        lens
    }

    /// Total hits taken across all ships.
    pub fn total_hits(&self) -> usize {
        self.ships.iter().map(Ship::hit_count).sum()
    }
}
