//! Win/loss tallies built from finished games.

use crate::{game::GameState, player::PlayerId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// A player's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub total_games: u32,
}

impl LeaderboardEntry {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            wins: 0,
            losses: 0,
            total_games: 0,
        }
    }

    /// Fraction of games won; zero before the first game.
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: BTreeMap<PlayerId, LeaderboardEntry>,
    recorded: HashSet<Uuid>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the outcome of a finished game. Returns `false` if the game is
    /// still running or was already counted.
    pub fn record_game(&mut self, game: &GameState) -> bool {
        let Some(winner) = game.winner_side() else {
            return false;
        };
        if !self.recorded.insert(game.id()) {
            return false;
        }
        self.record_outcome(game.player(winner), game.player(winner.opponent()));
        debug!("leaderboard: recorded game {}", game.id());
        true
    }

    /// Count a single win for `winner` over `loser`.
    pub fn record_outcome(&mut self, winner: &PlayerId, loser: &PlayerId) {
        let w = self.entry_mut(winner);
        w.wins += 1;
        w.total_games += 1;
        let l = self.entry_mut(loser);
        l.losses += 1;
        l.total_games += 1;
    }

    fn entry_mut(&mut self, player: &PlayerId) -> &mut LeaderboardEntry {
        self.entries
            .entry(player.clone())
            .or_insert_with(|| LeaderboardEntry::new(player.clone()))
    }

    pub fn entry(&self, player: &PlayerId) -> Option<&LeaderboardEntry> {
        self.entries.get(player)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by win rate, then wins, then player id.
    pub fn standings(&self) -> Vec<&LeaderboardEntry> {
        let mut out: Vec<&LeaderboardEntry> = self.entries.values().collect();
        out.sort_by(|a, b| {
            b.win_rate()
                .total_cmp(&a.win_rate())
                .then(b.wins.cmp(&a.wins))
                .then(a.player.cmp(&b.player))
        });
        out
    }
}

