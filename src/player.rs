use crate::{ai, config::NUM_SHIPS, grid::BB};
use core::fmt;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Identity of a player, as supplied by whoever hosts the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two seats a player occupies. `First` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Strength of a computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Difficulty {
    /// Fires uniformly at cells it has not targeted yet.
    Easy,
    /// Fires by the placement probability density.
    Hard,
}

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Two people.
    #[default]
    Versus,
    /// A person against a computer opponent.
    Computer(Difficulty),
}

/// What an attacker knows about the opponent's waters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetView {
    pub hits: BB,
    pub misses: BB,
    /// Lengths of enemy ships still afloat; zero for sunk ones.
    pub remaining: [usize; NUM_SHIPS],
}

impl TargetView {
    /// Cells not yet fired upon.
    pub fn untargeted(&self) -> BB {
        !(self.hits | self.misses)
    }
}

/// Interface implemented by different player types.
pub trait Player {
    /// Choose the next `(x, y)` to fire at.
    fn select_target(&mut self, rng: &mut dyn rand::RngCore, view: &TargetView) -> (usize, usize);

    /// Inform the player of the result of its last shot.
    fn handle_result(&mut self, _coord: (usize, usize), _result: &crate::MoveResult) {}
}

/// Computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlayer {
    level: Difficulty,
}

impl AiPlayer {
    pub fn new(level: Difficulty) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Difficulty {
        self.level
    }
}

impl Player for AiPlayer {
    fn select_target(&mut self, rng: &mut dyn rand::RngCore, view: &TargetView) -> (usize, usize) {
        match self.level {
            Difficulty::Easy => {
                let open: Vec<(usize, usize)> = view.untargeted().iter_set().collect();
                match open.choose(rng) {
                    Some(&cell) => cell,
                    None => ai::random_cell(rng),
                }
            }
            Difficulty::Hard => ai::calc_pdf_and_guess(&view.hits, &view.misses, &view.remaining, rng),
        }
    }
}

/// Let `player` take the current turn of `game`: pick a target from the
/// current side's view and fire at it.
pub fn take_turn(
    game: &mut crate::GameState,
    player: &mut dyn Player,
    rng: &mut dyn rand::RngCore,
) -> Result<((usize, usize), crate::MoveResult), crate::GameError> {
    let side = game.turn();
    let view = game.target_view(side);
    let (x, y) = player.select_target(rng, &view);
    let actor = game.player(side).clone();
    let result = game.apply_move(&actor, x, y)?;
    player.handle_result((x, y), &result);
    Ok(((x, y), result))
}
