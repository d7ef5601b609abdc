//! Ordered log of applied moves.

use crate::player::PlayerId;
use crate::ship::ShipKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One shot taken, with its outcome. Never modified once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Position in the log, starting at zero.
    pub sequence: u32,
    pub actor: PlayerId,
    pub x: u8,
    pub y: u8,
    pub was_hit: bool,
    /// Kind of the ship hit; kept because the cell itself no longer shows it.
    pub hit_ship: Option<ShipKind>,
    pub timestamp: DateTime<Utc>,
}

/// Append-only sequence of moves. Only the tail is ever removed, by undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Rebuild a log from stored moves, checking sequence numbers match
    /// positions.
    pub fn from_moves(moves: Vec<Move>) -> Option<Self> {
        if moves
            .iter()
            .enumerate()
            .any(|(i, m)| m.sequence as usize != i)
        {
            return None;
        }
        Some(Self { moves })
    }

    /// Sequence number the next appended move receives.
    pub fn next_sequence(&self) -> u32 {
        self.moves.len() as u32
    }

    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert_eq!(mv.sequence, self.next_sequence());
        self.moves.push(mv);
    }

    pub(crate) fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// True if `actor` has a logged shot at `(x, y)`.
    pub fn targeted_before(&self, actor: &PlayerId, x: u8, y: u8) -> bool {
        self.moves
            .iter()
            .any(|m| m.x == x && m.y == y && &m.actor == actor)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Move;
    type IntoIter = core::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
