//! The 10×10 cell matrix owned by each player.

use crate::bitboard::BitBoard;
use crate::config::BOARD_SIZE;
use crate::ship::ShipKind;
use core::fmt;
use serde::{Deserialize, Serialize};

const SIZE: usize = BOARD_SIZE as usize;

/// Occupancy mask sized to the board.
pub type BB = BitBoard<u128, SIZE>;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Undamaged segment of a ship of this kind.
    Ship(ShipKind),
    Hit,
    Miss,
}

impl Cell {
    /// Character used in text renderings: `.` empty, ship symbol, `X` hit, `O` miss.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ship(kind) => kind.symbol(),
            Cell::Hit => 'X',
            Cell::Miss => 'O',
        }
    }

    /// Hit or Miss: the cell has already been fired upon.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// One player's board.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    pub const SIZE: usize = SIZE;

    /// An all-empty grid.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// True if `(x, y)` lies on the board.
    pub fn in_bounds(x: usize, y: usize) -> bool {
        x < SIZE && y < SIZE
    }

    /// Cell at `(x, y)`, or `None` off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.cells[y][x])
        } else {
            None
        }
    }

    /// Overwrite the cell at `(x, y)`. Callers check bounds first.
    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y][x] = cell;
    }

    /// Iterate `(x, y, cell)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &c)| (x, y, c)))
    }

    /// Mask of cells for which `pred` holds.
    pub fn mask_where(&self, pred: impl Fn(Cell) -> bool) -> BB {
        let mut mask = BB::new();
        for (x, y, cell) in self.iter() {
            if pred(cell) {
                // in bounds by construction
                let _ = mask.set(x, y);
            }
        }
        mask
    }

    /// Cells not Empty: undamaged ship segments plus any resolved shot.
    pub fn occupied(&self) -> BB {
        self.mask_where(|c| c != Cell::Empty)
    }

    /// The grid as the opponent may see it: undamaged ship cells show Empty.
    pub fn masked(&self) -> Grid {
        let mut out = self.clone();
        for row in out.cells.iter_mut() {
            for cell in row.iter_mut() {
                if let Cell::Ship(_) = cell {
                    *cell = Cell::Empty;
                }
            }
        }
        out
    }

    /// Row-major (y then x) flat list of cells.
    pub fn to_flat(&self) -> Vec<Cell> {
        self.iter().map(|(_, _, c)| c).collect()
    }

    /// Inverse of [`Grid::to_flat`]; `None` unless exactly `SIZE*SIZE` cells.
    pub fn from_flat(cells: &[Cell]) -> Option<Self> {
        if cells.len() != SIZE * SIZE {
            return None;
        }
        let mut grid = Grid::new();
        for (i, &cell) in cells.iter().enumerate() {
            grid.cells[i / SIZE][i % SIZE] = cell;
        }
        Some(grid)
    }

    /// Number of cells in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.iter().filter(|&(_, _, c)| c == cell).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Header row of column letters followed by numbered rows of cell symbols.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..SIZE {
            write!(f, " {}", (b'A' + x as u8) as char)?;
        }
        writeln!(f)?;
        for (y, row) in self.cells.iter().enumerate() {
            write!(f, "{:2} ", y + 1)?;
            for cell in row {
                write!(f, " {}", cell.symbol())?;
            }
            if y + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        writeln!(f, "{}", self)?;
        write!(f, "}}")
    }
}
