use broadside::{GameState, Leaderboard, PlayerId};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Play a game to the end with both sides sweeping the board in order.
fn finished(seed: u64, first: &str, second: &str) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = GameState::new(&mut rng, first, second).unwrap();
    let mut i = 0;
    while !game.is_over() {
        let actor = game.current_player().clone();
        let cell = i / 2;
        game.apply_move(&actor, cell % 10, cell / 10).unwrap();
        i += 1;
    }
    game
}

#[test]
fn test_records_finished_game_once() {
    let game = finished(1, "alice", "bob");
    let winner = game.winner().unwrap().clone();
    let loser = game
        .players()
        .iter()
        .find(|p| **p != winner)
        .unwrap()
        .clone();

    let mut board = Leaderboard::new();
    assert!(board.record_game(&game));
    assert!(!board.record_game(&game));

    let w = board.entry(&winner).unwrap();
    assert_eq!((w.wins, w.losses, w.total_games), (1, 0, 1));
    let l = board.entry(&loser).unwrap();
    assert_eq!((l.wins, l.losses, l.total_games), (0, 1, 1));
    assert_eq!(board.len(), 2);
}

#[test]
fn test_ignores_unfinished_game() {
    let mut rng = SmallRng::seed_from_u64(2);
    let game = GameState::new(&mut rng, "alice", "bob").unwrap();
    let mut board = Leaderboard::new();
    assert!(!board.record_game(&game));
    assert!(board.is_empty());
}

#[test]
fn test_standings_order() {
    let (a, b, c) = (
        PlayerId::from("alice"),
        PlayerId::from("bob"),
        PlayerId::from("carol"),
    );
    let mut board = Leaderboard::new();
    board.record_outcome(&a, &b);
    board.record_outcome(&a, &c);
    board.record_outcome(&c, &b);
    board.record_outcome(&b, &a);

    let order: Vec<&str> = board
        .standings()
        .iter()
        .map(|e| e.player.as_str())
        .collect();
    // alice 2/3, carol 1/2, bob 1/3
    assert_eq!(order, vec!["alice", "carol", "bob"]);
    assert!((board.entry(&a).unwrap().win_rate() - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_ties_break_on_wins_then_name() {
    let (a, b, c, d) = (
        PlayerId::from("dave"),
        PlayerId::from("erin"),
        PlayerId::from("frank"),
        PlayerId::from("gina"),
    );
    let mut board = Leaderboard::new();
    board.record_outcome(&a, &b);
    board.record_outcome(&a, &b);
    board.record_outcome(&c, &d);

    let order: Vec<&str> = board
        .standings()
        .iter()
        .map(|e| e.player.as_str())
        .collect();
    assert_eq!(order, vec!["dave", "frank", "erin", "gina"]);
}
