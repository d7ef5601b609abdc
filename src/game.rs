//! The game-state aggregate: both players' waters, the move log, turn and
//! termination. All mutation goes through [`GameState::apply_move`] and
//! [`GameState::undo_last_move`].

use crate::{
    common::{GameError, MoveResult},
    fleet::Fleet,
    grid::{Cell, Grid},
    history::{History, Move},
    placement::{self, Placement, ShipIndex},
    player::{GameMode, PlayerId, Side, TargetView},
    ship::ShipId,
};
use chrono::Utc;
use log::{debug, info, warn};
use rand::Rng;
use uuid::Uuid;

/// Current status of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// One player's grid, fleet and the index tying cells to ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBoard {
    grid: Grid,
    fleet: Fleet,
    index: ShipIndex,
}

impl PlayerBoard {
    /// Randomly placed standard fleet.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, first_id: u32) -> Result<Self, GameError> {
        let mut grid = Grid::new();
        let (fleet, index) = placement::place_fleet(rng, &mut grid, first_id)?;
        Ok(Self { grid, fleet, index })
    }

    /// Board built from an explicit layout.
    pub fn from_layout(layout: &[Placement], first_id: u32) -> Result<Self, GameError> {
        let mut grid = Grid::new();
        let (fleet, index) = placement::place_layout(&mut grid, layout, first_id)?;
        Ok(Self { grid, fleet, index })
    }

    pub(crate) fn from_parts(grid: Grid, fleet: Fleet, index: ShipIndex) -> Self {
        Self { grid, fleet, index }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Ship occupying `(x, y)`, whether or not that cell has been hit.
    pub fn ship_at(&self, x: usize, y: usize) -> Option<ShipId> {
        self.index.get(x, y)
    }

    /// Resolve the ship under a `Ship(kind)` cell, falling back to the kind
    /// when the index has no entry.
    fn resolve_ship(&self, x: usize, y: usize, kind: crate::ShipKind) -> Option<ShipId> {
        self.index
            .get(x, y)
            .filter(|id| self.fleet.get(*id).is_some())
            .or_else(|| self.fleet.by_kind(kind).map(|s| s.id()))
    }
}

/// Aggregate root of a single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    id: Uuid,
    players: [PlayerId; 2],
    boards: [PlayerBoard; 2],
    history: History,
    turn: Side,
    over: bool,
    winner: Option<Side>,
    mode: GameMode,
}

impl GameState {
    /// Start a two-player game with randomly placed fleets. `player` moves
    /// first.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        player: impl Into<PlayerId>,
        opponent: impl Into<PlayerId>,
    ) -> Result<Self, GameError> {
        Self::new_with_mode(rng, player, opponent, GameMode::Versus)
    }

    /// Like [`GameState::new`], recording how the second seat is played.
    pub fn new_with_mode<R: Rng + ?Sized>(
        rng: &mut R,
        player: impl Into<PlayerId>,
        opponent: impl Into<PlayerId>,
        mode: GameMode,
    ) -> Result<Self, GameError> {
        let players = Self::seat(player.into(), opponent.into())?;
        let first = PlayerBoard::random(rng, 0)?;
        let second = PlayerBoard::random(rng, first.fleet.len() as u32)?;
        let id = Self::new_id(rng);
        Ok(Self::start(id, players, [first, second], mode))
    }

    /// Start a game with fixed layouts for both players.
    ///
    /// A layout may name any subset of the ship kinds, each at most once.
    pub fn from_layouts<R: Rng + ?Sized>(
        rng: &mut R,
        player: impl Into<PlayerId>,
        opponent: impl Into<PlayerId>,
        player_layout: &[Placement],
        opponent_layout: &[Placement],
    ) -> Result<Self, GameError> {
        let players = Self::seat(player.into(), opponent.into())?;
        let first = PlayerBoard::from_layout(player_layout, 0)?;
        let second = PlayerBoard::from_layout(opponent_layout, first.fleet.len() as u32)?;
        let id = Self::new_id(rng);
        Ok(Self::start(id, players, [first, second], GameMode::Versus))
    }

    fn seat(player: PlayerId, opponent: PlayerId) -> Result<[PlayerId; 2], GameError> {
        if player == opponent {
            return Err(GameError::DuplicatePlayer);
        }
        Ok([player, opponent])
    }

    fn new_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
        let bytes = rng.random::<u128>().to_le_bytes();
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn start(id: Uuid, players: [PlayerId; 2], boards: [PlayerBoard; 2], mode: GameMode) -> Self {
        info!("game {} created: {} vs {}", id, players[0], players[1]);
        Self {
            id,
            players,
            boards,
            history: History::new(),
            turn: Side::First,
            over: false,
            winner: None,
            mode,
        }
    }

    /// Reassemble a game from stored parts. Consistency checks are the
    /// caller's job.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: Uuid,
        players: [PlayerId; 2],
        boards: [PlayerBoard; 2],
        history: History,
        turn: Side,
        over: bool,
        winner: Option<Side>,
        mode: GameMode,
    ) -> Self {
        Self {
            id,
            players,
            boards,
            history,
            turn,
            over,
            winner,
            mode,
        }
    }

    /// Fire at `(x, y)` on the opponent's grid of `actor`.
    ///
    /// Rejections, checked in this order and before any mutation:
    /// [`GameError::GameAlreadyOver`], [`GameError::InvalidTurn`],
    /// [`GameError::InvalidCoordinate`].
    pub fn apply_move(
        &mut self,
        actor: &PlayerId,
        x: usize,
        y: usize,
    ) -> Result<MoveResult, GameError> {
        if self.over {
            warn!("game {}: {} moved after the game ended", self.id, actor);
            return Err(GameError::GameAlreadyOver);
        }
        let side = match self.side_of(actor) {
            Some(side) if side == self.turn => side,
            _ => {
                warn!("game {}: {} moved out of turn", self.id, actor);
                return Err(GameError::InvalidTurn);
            }
        };
        if !Grid::in_bounds(x, y) {
            warn!("game {}: shot at ({}, {}) is off the board", self.id, x, y);
            return Err(GameError::InvalidCoordinate { x, y });
        }

        let target = side.opponent();
        let board = &mut self.boards[target.index()];
        let cell = board.grid.get(x, y).unwrap_or_default();

        let (hit, ship, sunk) = match cell {
            Cell::Ship(kind) => {
                let id = board
                    .resolve_ship(x, y, kind)
                    .ok_or(GameError::CorruptRecord("ship cell without a ship"))?;
                board.grid.set(x, y, Cell::Hit);
                let mut sunk = false;
                if let Some(s) = board.fleet.get_mut(id) {
                    s.register_hit();
                    sunk = s.is_sunk();
                }
                (true, Some(kind), sunk)
            }
            Cell::Empty => {
                board.grid.set(x, y, Cell::Miss);
                (false, None, false)
            }
            // Re-firing at a resolved cell leaves it as it is.
            Cell::Hit | Cell::Miss => (false, None, false),
        };

        let sequence = self.history.next_sequence();
        self.history.push(Move {
            sequence,
            actor: actor.clone(),
            x: x as u8,
            y: y as u8,
            was_hit: hit,
            hit_ship: ship,
            timestamp: Utc::now(),
        });
        debug!(
            "game {}: move {} by {} at ({}, {}): {}",
            self.id,
            sequence,
            actor,
            x,
            y,
            match (ship, sunk) {
                (Some(kind), true) => format!("sank {}", kind),
                (Some(kind), false) => format!("hit {}", kind),
                (None, _) => "miss".to_string(),
            }
        );

        self.check_game_over(side);
        if !self.over {
            self.turn = target;
        }

        Ok(MoveResult {
            hit,
            ship,
            sunk,
            game_over: self.over,
        })
    }

    fn check_game_over(&mut self, actor: Side) {
        let winner = if self.boards[actor.index()].fleet.all_sunk() {
            Some(actor.opponent())
        } else if self.boards[actor.opponent().index()].fleet.all_sunk() {
            Some(actor)
        } else {
            None
        };
        if let Some(side) = winner {
            self.over = true;
            self.winner = Some(side);
            info!(
                "game {} over after {} moves: {} wins",
                self.id,
                self.history.len(),
                self.player(side)
            );
        }
    }

    /// Revert the most recent move. Returns `false` when there is nothing to
    /// undo.
    pub fn undo_last_move(&mut self) -> bool {
        let Some(mv) = self.history.pop() else {
            return false;
        };
        let Some(side) = self.side_of(&mv.actor) else {
            // Only reachable through a hand-built history; keep it intact.
            self.history.push(mv);
            return false;
        };
        let (x, y) = (mv.x as usize, mv.y as usize);
        let board = &mut self.boards[side.opponent().index()];

        match (mv.was_hit, mv.hit_ship) {
            (true, Some(kind)) => {
                board.grid.set(x, y, Cell::Ship(kind));
                if let Some(id) = board.resolve_ship(x, y, kind) {
                    if let Some(s) = board.fleet.get_mut(id) {
                        s.revert_hit();
                    }
                }
            }
            _ => {
                if !self.history.targeted_before(&mv.actor, mv.x, mv.y) {
                    board.grid.set(x, y, Cell::Empty);
                }
            }
        }

        self.over = false;
        self.winner = None;
        self.turn = side;
        debug!("game {}: undid move {} by {}", self.id, mv.sequence, mv.actor);
        true
    }

    /// The game as it stood before the first move.
    pub fn initial_position(&self) -> GameState {
        let mut start = self.clone();
        while start.undo_last_move() {}
        start
    }

    /// Replay the logged moves from the initial position and check that every
    /// outcome, and the final boards, match what was recorded.
    pub fn audit(&self) -> Result<(), GameError> {
        let mut replay = self.initial_position();
        for mv in self.history.iter() {
            let mismatch = GameError::ReplayMismatch {
                sequence: mv.sequence,
            };
            let res = replay
                .apply_move(&mv.actor, mv.x as usize, mv.y as usize)
                .map_err(|_| mismatch.clone())?;
            if res.hit != mv.was_hit || res.ship != mv.hit_ship {
                return Err(mismatch);
            }
        }
        if replay.boards != self.boards
            || replay.over != self.over
            || replay.winner != self.winner
        {
            return Err(GameError::ReplayMismatch {
                sequence: self.history.next_sequence(),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn players(&self) -> &[PlayerId; 2] {
        &self.players
    }

    pub fn player(&self, side: Side) -> &PlayerId {
        &self.players[side.index()]
    }

    /// Seat of `id`, if it plays in this game.
    pub fn side_of(&self, id: &PlayerId) -> Option<Side> {
        if &self.players[0] == id {
            Some(Side::First)
        } else if &self.players[1] == id {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Seat whose turn it is.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn current_player(&self) -> &PlayerId {
        self.player(self.turn)
    }

    pub fn board(&self, side: Side) -> &PlayerBoard {
        &self.boards[side.index()]
    }

    /// The owner's view of their own grid.
    pub fn grid(&self, side: Side) -> &Grid {
        &self.boards[side.index()].grid
    }

    /// The grid of `side` as shown to its opponent.
    pub fn masked_grid(&self, side: Side) -> Grid {
        self.boards[side.index()].grid.masked()
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        &self.boards[side.index()].fleet
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.map(|side| self.player(side))
    }

    pub fn winner_side(&self) -> Option<Side> {
        self.winner
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Evaluate the game from the point of view of `side`.
    pub fn status_for(&self, side: Side) -> GameStatus {
        match self.winner {
            None => GameStatus::InProgress,
            Some(w) if w == side => GameStatus::Won,
            Some(_) => GameStatus::Lost,
        }
    }

    /// What `attacker` knows about the opponent's waters.
    pub fn target_view(&self, attacker: Side) -> TargetView {
        let defender = &self.boards[attacker.opponent().index()];
        TargetView {
            hits: defender.grid.mask_where(|c| c == Cell::Hit),
            misses: defender.grid.mask_where(|c| c == Cell::Miss),
            remaining: defender.fleet.lengths_remaining(),
        }
    }
}
