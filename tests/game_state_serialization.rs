use broadside::record::{self, GameRecord};
use broadside::{Cell, GameError, GameState, PlayerId};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A game with `moves` random shots played, or fewer if it ends first.
fn played(seed: u64, moves: usize) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = GameState::new(&mut rng, "alice", "bob").unwrap();
    for _ in 0..moves {
        if game.is_over() {
            break;
        }
        let actor = game.current_player().clone();
        let (x, y) = (rng.random_range(0..10), rng.random_range(0..10));
        game.apply_move(&actor, x, y).unwrap();
    }
    game
}

/// Both players sweep the board row by row until one fleet is gone.
fn finished(seed: u64) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = GameState::new(&mut rng, "alice", "bob").unwrap();
    for i in 0..200 {
        if game.is_over() {
            break;
        }
        let actor = game.current_player().clone();
        let cell = i / 2;
        game.apply_move(&actor, cell % 10, cell / 10).unwrap();
    }
    game
}

fn corrupt(record: GameRecord) -> GameError {
    GameState::from_record(record).unwrap_err()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn game_state_roundtrip(seed in any::<u64>(), moves in 0usize..250) {
        let game = played(seed, moves);
        let rec = game.to_record();

        let bytes = record::to_bytes(&rec).unwrap();
        let decoded = record::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &rec);
        let restored = GameState::from_record(decoded).unwrap();
        prop_assert_eq!(&restored, &game);

        let json = record::to_json(&rec).unwrap();
        let restored = GameState::from_record(record::from_json(&json).unwrap()).unwrap();
        prop_assert_eq!(restored, game);
    }
}

#[test]
fn test_restored_game_keeps_playing() {
    let game = played(4, 30);
    let mut restored = GameState::from_record(game.to_record()).unwrap();
    let actor = restored.current_player().clone();
    assert!(restored.apply_move(&actor, 0, 0).is_ok());
    assert!(restored.undo_last_move());
    assert_eq!(restored, game);
}

#[test]
fn test_finished_game_roundtrip() {
    let game = finished(8);
    assert!(game.is_over());
    let rec = game.to_record();
    assert!(rec.game_over);
    assert_eq!(rec.winner_id.as_ref(), game.winner());
    let restored = GameState::from_record(rec).unwrap();
    assert_eq!(restored.winner(), game.winner());
}

#[test]
fn test_record_layout() {
    let game = played(2, 6);
    let rec = game.to_record();
    assert_eq!(rec.player_id, PlayerId::from("alice"));
    assert_eq!(rec.opponent_id, PlayerId::from("bob"));
    assert_eq!(rec.player_grid.len(), 100);
    assert_eq!(rec.player_ships.len(), 5);
    assert_eq!(rec.moves.len(), 6);
    assert_eq!(rec.current_player_id, PlayerId::from("alice"));
}

#[test]
fn test_rejects_seating_errors() {
    let rec = played(3, 10).to_record();

    let mut bad = rec.clone();
    bad.opponent_id = bad.player_id.clone();
    assert_eq!(corrupt(bad), GameError::DuplicatePlayer);

    let mut bad = rec.clone();
    bad.current_player_id = PlayerId::from("mallory");
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));

    let mut bad = rec;
    bad.winner_id = Some(PlayerId::from("alice"));
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));
}

#[test]
fn test_rejects_tampered_boards() {
    let rec = played(5, 40).to_record();

    let mut bad = rec.clone();
    bad.player_grid.pop();
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));

    // a ship segment vanishes
    let mut bad = rec.clone();
    let pos = bad
        .opponent_grid
        .iter()
        .position(|c| matches!(c, Cell::Ship(_)))
        .unwrap();
    bad.opponent_grid[pos] = Cell::Empty;
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));

    // a miss appears that nobody fired
    let mut bad = rec.clone();
    let pos = bad.player_grid.iter().position(|c| *c == Cell::Empty).unwrap();
    bad.player_grid[pos] = Cell::Miss;
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));

    let mut bad = rec;
    bad.player_ships[0].hit_count += 1;
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));
}

#[test]
fn test_rejects_tampered_history() {
    let rec = played(6, 20).to_record();

    let mut bad = rec.clone();
    bad.moves.swap(0, 1);
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));

    let mut bad = rec.clone();
    bad.moves[3].x = 12;
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));

    // the last shot is dropped from the log but not from the grid
    let mut bad = rec;
    bad.moves.pop();
    assert!(matches!(corrupt(bad), GameError::CorruptRecord(_)));
}

#[test]
fn test_garbage_input_is_an_error() {
    assert!(record::from_bytes(&[0xff, 0x01, 0x02]).is_err());
    assert!(record::from_json("{\"game_id\": 7}").is_err());
}
