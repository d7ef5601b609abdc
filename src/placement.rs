//! Ship placement: random fleets for new games and fixed layouts for
//! scripted ones.

use crate::common::GameError;
use crate::config::{FLEET, MAX_PLACEMENT_ATTEMPTS};
use crate::fleet::Fleet;
use crate::grid::{Cell, Grid, BB};
use crate::ship::{Orientation, Ship, ShipId, ShipKind};
use log::trace;
use rand::Rng;

const SIZE: usize = Grid::SIZE;

/// Where one ship sits: kind, origin and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: ShipKind,
    pub x: usize,
    pub y: usize,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(kind: ShipKind, x: usize, y: usize, orientation: Orientation) -> Self {
        Self {
            kind,
            x,
            y,
            orientation,
        }
    }

    /// Cells covered by the ship, origin first. May run off the board.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x, y, orientation) = (self.x, self.y, self.orientation);
        (0..self.kind.size()).map(move |i| match orientation {
            Orientation::Horizontal => (x.saturating_add(i), y),
            Orientation::Vertical => (x, y.saturating_add(i)),
        })
    }

    /// True if the whole extent lies on the board.
    pub fn in_bounds(&self) -> bool {
        let len = self.kind.size();
        if self.x >= SIZE || self.y >= SIZE {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => len <= SIZE - self.x,
            Orientation::Vertical => len <= SIZE - self.y,
        }
    }

    /// Occupancy mask of the ship.
    fn mask(&self) -> Result<BB, GameError> {
        BB::from_cells(self.cells()).map_err(|_| GameError::ShipOutOfBounds)
    }
}

/// Maps each ship-covered coordinate to the ship occupying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipIndex {
    slots: [[Option<ShipId>; SIZE]; SIZE],
}

impl ShipIndex {
    pub fn new() -> Self {
        Self {
            slots: [[None; SIZE]; SIZE],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<ShipId> {
        if Grid::in_bounds(x, y) {
            self.slots[y][x]
        } else {
            None
        }
    }

    pub(crate) fn insert(&mut self, x: usize, y: usize, id: ShipId) {
        self.slots[y][x] = Some(id);
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ShipIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Mark the ship's cells on the grid and index them. The placement must
/// already be known to fit.
fn commit(
    grid: &mut Grid,
    fleet: &mut Fleet,
    index: &mut ShipIndex,
    placement: &Placement,
    id: ShipId,
) {
    for (x, y) in placement.cells() {
        grid.set(x, y, Cell::Ship(placement.kind));
        index.insert(x, y, id);
    }
    fleet.push(Ship::new(id, placement.kind));
}

/// Returns `true` when every cell of `placement` is on the board and Empty.
pub fn can_place(grid: &Grid, placement: &Placement) -> bool {
    placement.in_bounds()
        && placement
            .cells()
            .all(|(x, y)| grid.get(x, y) == Some(Cell::Empty))
}

/// Randomly place the standard fleet onto `grid`.
///
/// Ship ids are allocated consecutively from `first_id`.
pub fn place_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut Grid,
    first_id: u32,
) -> Result<(Fleet, ShipIndex), GameError> {
    place_fleet_with(rng, grid, &FLEET, first_id, MAX_PLACEMENT_ATTEMPTS)
}

/// Randomly place `kinds` onto `grid`, sampling each ship up to
/// `max_attempts` times.
///
/// On error the grid may hold the ships placed before the failing one; the
/// caller discards it.
pub fn place_fleet_with<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut Grid,
    kinds: &[ShipKind],
    first_id: u32,
    max_attempts: usize,
) -> Result<(Fleet, ShipIndex), GameError> {
    let ids = ship_ids(first_id, kinds.len())?;
    let mut fleet = Fleet::new();
    let mut index = ShipIndex::new();
    for (&kind, id) in kinds.iter().zip(ids) {
        if fleet.by_kind(kind).is_some() {
            return Err(GameError::DuplicateShipKind);
        }
        let placement = random_placement(rng, grid, kind, max_attempts)?;
        commit(grid, &mut fleet, &mut index, &placement, id);
    }
    Ok((fleet, index))
}

/// Sample origins and orientations until `kind` fits on Empty cells.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    kind: ShipKind,
    max_attempts: usize,
) -> Result<Placement, GameError> {
    for attempt in 1..=max_attempts {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let x = rng.random_range(0..SIZE);
        let y = rng.random_range(0..SIZE);
        let placement = Placement::new(kind, x, y, orientation);
        if can_place(grid, &placement) {
            trace!("placed {} at ({}, {}) after {} attempts", kind, x, y, attempt);
            return Ok(placement);
        }
    }
    Err(GameError::PlacementExhausted {
        kind,
        attempts: max_attempts,
    })
}

/// Place an explicit layout onto `grid`.
///
/// Validates the whole layout before touching the grid, so on error the grid
/// is unchanged.
pub fn place_layout(
    grid: &mut Grid,
    layout: &[Placement],
    first_id: u32,
) -> Result<(Fleet, ShipIndex), GameError> {
    let ids = ship_ids(first_id, layout.len())?;
    let mut taken = grid.occupied();
    for (i, placement) in layout.iter().enumerate() {
        if layout[..i].iter().any(|p| p.kind == placement.kind) {
            return Err(GameError::DuplicateShipKind);
        }
        if !placement.in_bounds() {
            return Err(GameError::ShipOutOfBounds);
        }
        let mask = placement.mask()?;
        if !(taken & mask).is_empty() {
            return Err(GameError::ShipOverlaps);
        }
        taken |= mask;
    }

    let mut fleet = Fleet::new();
    let mut index = ShipIndex::new();
    for (placement, id) in layout.iter().zip(ids) {
        commit(grid, &mut fleet, &mut index, placement, id);
    }
    Ok((fleet, index))
}

/// `count` consecutive ids starting at `first_id`, all representable.
fn ship_ids(first_id: u32, count: usize) -> Result<impl Iterator<Item = ShipId>, GameError> {
    let count = u32::try_from(count).map_err(|_| GameError::ShipIdOverflow)?;
    let end = first_id
        .checked_add(count)
        .ok_or(GameError::ShipIdOverflow)?;
    Ok((first_id..end).map(ShipId))
}
