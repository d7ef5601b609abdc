//! Common types for the engine: errors and move results.

use crate::ship::ShipKind;

/// Outcome of an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The shot landed on an undamaged ship segment.
    pub hit: bool,
    /// Kind of the ship that was hit, if any.
    pub ship: Option<ShipKind>,
    /// The hit sank that ship.
    pub sunk: bool,
    /// The move ended the game.
    pub game_over: bool,
}

/// Errors returned by game operations.
///
/// Every rejected call leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Move attempted by a player who is not the current actor.
    InvalidTurn,
    /// Coordinates fall outside the board.
    InvalidCoordinate { x: usize, y: usize },
    /// Move attempted after the game ended.
    GameAlreadyOver,
    /// Random placement found no legal position within the attempt cap.
    PlacementExhausted { kind: ShipKind, attempts: usize },
    /// Ship extent leaves the board.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// A layout names the same kind twice.
    DuplicateShipKind,
    /// Ship ids would run past `u32::MAX`.
    ShipIdOverflow,
    /// Both seats were given the same player id.
    DuplicatePlayer,
    /// A stored game record is inconsistent.
    CorruptRecord(&'static str),
    /// Replaying the history produced a different outcome for this move.
    ReplayMismatch { sequence: u32 },
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidTurn => write!(f, "It is not this player's turn"),
            GameError::InvalidCoordinate { x, y } => {
                write!(f, "Coordinate ({}, {}) is outside the board", x, y)
            }
            GameError::GameAlreadyOver => write!(f, "The game is already over"),
            GameError::PlacementExhausted { kind, attempts } => write!(
                f,
                "Unable to place {} after {} attempts",
                kind, attempts
            ),
            GameError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            GameError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            GameError::DuplicateShipKind => write!(f, "Layout places the same ship kind twice"),
            GameError::ShipIdOverflow => write!(f, "Ship ids exceed the id range"),
            GameError::DuplicatePlayer => write!(f, "Both players have the same id"),
            GameError::CorruptRecord(why) => write!(f, "Corrupt game record: {}", why),
            GameError::ReplayMismatch { sequence } => {
                write!(f, "Replay diverged from history at move {}", sequence)
            }
        }
    }
}

impl std::error::Error for GameError {}
