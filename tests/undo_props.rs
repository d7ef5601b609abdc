use broadside::{Cell, GameState, Side};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn new_game(seed: u64) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    GameState::new(&mut rng, "alice", "bob").unwrap()
}

/// Play `shots` for whoever holds the turn, stopping once the game ends.
fn play(game: &mut GameState, shots: &[(usize, usize)]) {
    for &(x, y) in shots {
        if game.is_over() {
            break;
        }
        let actor = game.current_player().clone();
        game.apply_move(&actor, x, y).unwrap();
    }
}

fn shots() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..10, 0usize..10), 0..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// One move followed by one undo leaves the game exactly as it was.
    #[test]
    fn apply_then_undo_is_identity(
        seed in any::<u64>(),
        prefix in shots(),
        x in 0usize..10,
        y in 0usize..10,
    ) {
        let mut game = new_game(seed);
        play(&mut game, &prefix);
        prop_assume!(!game.is_over());

        let before = game.clone();
        let actor = game.current_player().clone();
        game.apply_move(&actor, x, y).unwrap();
        prop_assert!(game.undo_last_move());
        prop_assert_eq!(game, before);
    }

    /// Undoing every move returns to the starting position.
    #[test]
    fn full_unwind_restores_start(seed in any::<u64>(), moves in shots()) {
        let start = new_game(seed);
        let mut game = start.clone();
        play(&mut game, &moves);

        let mut undone = 0;
        while game.undo_last_move() {
            undone += 1;
        }
        prop_assert!(undone <= moves.len());
        prop_assert_eq!(game, start);
    }

    /// A shot only ever moves a cell Empty -> Miss or Ship -> Hit, and only on
    /// the opponent's grid.
    #[test]
    fn cells_only_resolve(seed in any::<u64>(), moves in shots()) {
        let mut game = new_game(seed);
        for (x, y) in moves {
            if game.is_over() {
                break;
            }
            let side = game.turn();
            let own = game.grid(side).clone();
            let target = game.grid(side.opponent()).clone();
            let actor = game.current_player().clone();
            let res = game.apply_move(&actor, x, y).unwrap();

            prop_assert_eq!(game.grid(side), &own);
            for (cx, cy, after) in game.grid(side.opponent()).iter() {
                let prior = target.get(cx, cy).unwrap();
                if (cx, cy) != (x, y) {
                    prop_assert_eq!(prior, after);
                    continue;
                }
                match prior {
                    Cell::Empty => {
                        prop_assert_eq!(after, Cell::Miss);
                    }
                    Cell::Ship(kind) => {
                        prop_assert_eq!(after, Cell::Hit);
                        prop_assert_eq!(res.ship, Some(kind));
                    }
                    resolved => {
                        prop_assert_eq!(after, resolved);
                    }
                }
            }
        }
    }

    /// Hit counts track Hit cells, and the log replays to the same boards.
    #[test]
    fn hits_match_grid_and_replay(seed in any::<u64>(), moves in shots()) {
        let mut game = new_game(seed);
        play(&mut game, &moves);

        for side in [Side::First, Side::Second] {
            prop_assert_eq!(game.fleet(side).total_hits(), game.grid(side).count(Cell::Hit));
        }
        let sequences: Vec<u32> = game.history().iter().map(|m| m.sequence).collect();
        let expected: Vec<u32> = (0..game.history().len() as u32).collect();
        prop_assert_eq!(sequences, expected);
        prop_assert_eq!(game.audit(), Ok(()));
    }
}

#[test]
fn test_undo_after_game_over_reopens_game() {
    let mut game = new_game(21);
    // sweep the board until someone wins
    let sweep: Vec<(usize, usize)> = (0..100).flat_map(|i| [(i % 10, i / 10); 2]).collect();
    play(&mut game, &sweep);
    assert!(game.is_over());
    let last_actor = game.history().last().unwrap().actor.clone();

    assert!(game.undo_last_move());
    assert!(!game.is_over());
    assert!(game.winner().is_none());
    assert_eq!(game.current_player(), &last_actor);
}
