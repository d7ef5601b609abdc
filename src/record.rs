//! Flat, serializable snapshot of a game for whatever store hosts it.

use crate::{
    common::GameError,
    fleet::Fleet,
    game::{GameState, PlayerBoard},
    grid::{Cell, Grid},
    history::{History, Move},
    placement::ShipIndex,
    player::{GameMode, PlayerId, Side},
    ship::{Ship, ShipId, ShipKind},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored form of one ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipRecord {
    pub id: ShipId,
    pub kind: ShipKind,
    pub name: String,
    pub size: usize,
    pub hit_count: usize,
}

/// Stored form of a whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: Uuid,
    pub player_id: PlayerId,
    pub opponent_id: PlayerId,
    pub mode: GameMode,
    /// Row-major cells of the first player's grid.
    pub player_grid: Vec<Cell>,
    pub opponent_grid: Vec<Cell>,
    pub player_ships: Vec<ShipRecord>,
    pub opponent_ships: Vec<ShipRecord>,
    pub moves: Vec<Move>,
    pub game_over: bool,
    pub winner_id: Option<PlayerId>,
    /// Player whose turn it is.
    pub current_player_id: PlayerId,
}

impl From<&Ship> for ShipRecord {
    fn from(ship: &Ship) -> Self {
        ShipRecord {
            id: ship.id(),
            kind: ship.kind(),
            name: ship.name().to_string(),
            size: ship.size(),
            hit_count: ship.hit_count(),
        }
    }
}

impl From<&GameState> for GameRecord {
    fn from(game: &GameState) -> Self {
        let ships = |side| game.fleet(side).ships().iter().map(ShipRecord::from).collect();
        GameRecord {
            game_id: game.id(),
            player_id: game.player(Side::First).clone(),
            opponent_id: game.player(Side::Second).clone(),
            mode: game.mode(),
            player_grid: game.grid(Side::First).to_flat(),
            opponent_grid: game.grid(Side::Second).to_flat(),
            player_ships: ships(Side::First),
            opponent_ships: ships(Side::Second),
            moves: game.history().as_slice().to_vec(),
            game_over: game.is_over(),
            winner_id: game.winner().cloned(),
            current_player_id: game.current_player().clone(),
        }
    }
}

impl GameState {
    /// Snapshot for persistence.
    pub fn to_record(&self) -> GameRecord {
        GameRecord::from(self)
    }

    /// Restore a game from a record, validating it.
    pub fn from_record(record: GameRecord) -> Result<GameState, GameError> {
        let GameRecord {
            game_id,
            player_id,
            opponent_id,
            mode,
            player_grid,
            opponent_grid,
            player_ships,
            opponent_ships,
            moves,
            game_over,
            winner_id,
            current_player_id,
        } = record;

        if player_id == opponent_id {
            return Err(GameError::DuplicatePlayer);
        }
        let players = [player_id, opponent_id];
        let side_of = |id: &PlayerId| {
            players
                .iter()
                .position(|p| p == id)
                .map(|i| if i == 0 { Side::First } else { Side::Second })
        };

        let turn = side_of(&current_player_id)
            .ok_or(GameError::CorruptRecord("current player is not seated"))?;
        let winner = match winner_id {
            Some(id) => Some(side_of(&id).ok_or(GameError::CorruptRecord("winner is not seated"))?),
            None => None,
        };
        if game_over != winner.is_some() {
            return Err(GameError::CorruptRecord("termination flag disagrees with winner"));
        }

        let history =
            History::from_moves(moves).ok_or(GameError::CorruptRecord("move sequence out of order"))?;
        for mv in history.iter() {
            if side_of(&mv.actor).is_none() {
                return Err(GameError::CorruptRecord("move by unseated player"));
            }
            if !Grid::in_bounds(mv.x as usize, mv.y as usize) {
                return Err(GameError::CorruptRecord("move off the board"));
            }
            if mv.was_hit != mv.hit_ship.is_some() {
                return Err(GameError::CorruptRecord("hit flag disagrees with ship kind"));
            }
        }

        let expected_turn = match history.last() {
            None => Side::First,
            Some(mv) => {
                let actor = side_of(&mv.actor).unwrap_or(Side::First);
                if game_over {
                    actor
                } else {
                    actor.opponent()
                }
            }
        };
        if turn != expected_turn {
            return Err(GameError::CorruptRecord("turn disagrees with history"));
        }

        let first = restore_board(&player_grid, player_ships, &history, &players[1])?;
        let second = restore_board(&opponent_grid, opponent_ships, &history, &players[0])?;

        let ids_unique = first
            .fleet()
            .ships()
            .iter()
            .all(|a| second.fleet().get(a.id()).is_none());
        if !ids_unique {
            return Err(GameError::CorruptRecord("ship id used in both fleets"));
        }

        let game = GameState::from_parts(
            game_id,
            players,
            [first, second],
            history,
            turn,
            game_over,
            winner,
            mode,
        );
        game.audit()
            .map_err(|_| GameError::CorruptRecord("history does not replay onto the boards"))?;
        Ok(game)
    }
}

/// Rebuild one player's board. `attacker` is the player whose moves landed
/// on this grid; their logged hits identify the ships under `Hit` cells.
fn restore_board(
    cells: &[Cell],
    ships: Vec<ShipRecord>,
    history: &History,
    attacker: &PlayerId,
) -> Result<PlayerBoard, GameError> {
    let grid = Grid::from_flat(cells).ok_or(GameError::CorruptRecord("grid has wrong size"))?;

    let mut fleet = Fleet::new();
    for rec in ships {
        if fleet.by_kind(rec.kind).is_some() || fleet.get(rec.id).is_some() {
            return Err(GameError::CorruptRecord("duplicate ship in fleet"));
        }
        let ship = Ship::restore(rec.id, rec.kind, rec.name, rec.size, rec.hit_count)
            .ok_or(GameError::CorruptRecord("ship hit count exceeds size"))?;
        fleet.push(ship);
    }

    let mut index = ShipIndex::new();
    let mut segments: Vec<(ShipKind, usize)> = Vec::new();
    let mut tally = |kind: ShipKind| match segments.iter_mut().find(|(k, _)| *k == kind) {
        Some((_, n)) => *n += 1,
        None => segments.push((kind, 1)),
    };

    for (x, y, cell) in grid.iter() {
        if let Cell::Ship(kind) = cell {
            let ship = fleet
                .by_kind(kind)
                .ok_or(GameError::CorruptRecord("ship cell of a kind not in the fleet"))?;
            index.insert(x, y, ship.id());
            tally(kind);
        }
    }
    for mv in history.iter().filter(|m| &m.actor == attacker) {
        if let Some(kind) = mv.hit_ship {
            let (x, y) = (mv.x as usize, mv.y as usize);
            if grid.get(x, y) != Some(Cell::Hit) {
                return Err(GameError::CorruptRecord("logged hit on a cell not marked hit"));
            }
            let ship = fleet
                .by_kind(kind)
                .ok_or(GameError::CorruptRecord("logged hit on a ship not in the fleet"))?;
            index.insert(x, y, ship.id());
            tally(kind);
        }
    }

    for (x, y, cell) in grid.iter() {
        let shots = || history.iter().filter(|m| {
            &m.actor == attacker && m.x as usize == x && m.y as usize == y
        });
        let backed = match cell {
            Cell::Hit => shots().any(|m| m.was_hit),
            Cell::Miss => shots().any(|m| !m.was_hit),
            _ => true,
        };
        if !backed {
            return Err(GameError::CorruptRecord("resolved cell without a logged shot"));
        }
    }

    for ship in fleet.ships() {
        let hits = history
            .iter()
            .filter(|m| &m.actor == attacker && m.hit_ship == Some(ship.kind()))
            .count();
        let covered = segments
            .iter()
            .find(|(k, _)| *k == ship.kind())
            .map_or(0, |(_, n)| *n);
        if hits != ship.hit_count() || covered != ship.size() {
            return Err(GameError::CorruptRecord("fleet disagrees with grid and history"));
        }
    }

    Ok(PlayerBoard::from_parts(grid, fleet, index))
}

/// Encode a record as JSON.
pub fn to_json(record: &GameRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string(record)?)
}

pub fn from_json(json: &str) -> anyhow::Result<GameRecord> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a record with bincode.
pub fn to_bytes(record: &GameRecord) -> anyhow::Result<Vec<u8>> {
    Ok(bincode::serialize(record)?)
}

pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<GameRecord> {
    Ok(bincode::deserialize(bytes)?)
}
