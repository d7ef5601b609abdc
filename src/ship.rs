//! Ship kinds, orientations and the per-game ship record.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Extends along +x from its origin.
    Horizontal,
    /// Extends along +y from its origin.
    Vertical,
}

/// The five vessel types of a standard fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Number of cells the ship covers.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Single-character marker used when rendering a revealed grid.
    pub const fn symbol(self) -> char {
        match self {
            ShipKind::Carrier => 'A',
            ShipKind::Battleship => 'B',
            ShipKind::Cruiser => 'C',
            ShipKind::Submarine => 'S',
            ShipKind::Destroyer => 'D',
        }
    }

    /// Inverse of [`ShipKind::symbol`].
    pub fn from_symbol(symbol: char) -> Option<Self> {
        crate::config::FLEET
            .iter()
            .copied()
            .find(|kind| kind.symbol() == symbol.to_ascii_uppercase())
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a ship, unique within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A ship in a fleet with its cumulative damage.
///
/// `hit_count` only moves through [`Ship::register_hit`] and
/// [`Ship::revert_hit`] and always stays within `0..=size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    kind: ShipKind,
    name: String,
    size: usize,
    hit_count: usize,
}

impl Ship {
    /// A fresh, undamaged ship of `kind`.
    pub fn new(id: ShipId, kind: ShipKind) -> Self {
        Self {
            id,
            kind,
            name: kind.name().to_string(),
            size: kind.size(),
            hit_count: 0,
        }
    }

    /// Rebuild a ship from stored parts. `None` if `hit_count` exceeds `size`
    /// or `size` disagrees with the kind.
    pub fn restore(
        id: ShipId,
        kind: ShipKind,
        name: String,
        size: usize,
        hit_count: usize,
    ) -> Option<Self> {
        if size != kind.size() || hit_count > size {
            return None;
        }
        Some(Self {
            id,
            kind,
            name,
            size,
            hit_count,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hit_count >= self.size
    }

    /// Record one more hit. Saturates at `size`.
    pub(crate) fn register_hit(&mut self) {
        if self.hit_count < self.size {
            self.hit_count += 1;
        }
    }

    /// Take back one hit. Saturates at zero.
    pub(crate) fn revert_hit(&mut self) {
        self.hit_count = self.hit_count.saturating_sub(1);
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.hit_count, self.size)?;
        if self.is_sunk() {
            write!(f, " sunk")?;
        }
        Ok(())
    }
}
