use broadside::{take_turn, AiPlayer, Difficulty, GameMode, GameState, Leaderboard, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u32 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 1,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Leaderboard::new();
    let mut results = Vec::new();

    for round in 0..games {
        // Alternate who fires first.
        let (first, second) = if round % 2 == 0 {
            (Difficulty::Hard, Difficulty::Easy)
        } else {
            (Difficulty::Easy, Difficulty::Hard)
        };
        let name = |level: Difficulty| format!("computer-{:?}", level).to_lowercase();
        let mut game =
            GameState::new_with_mode(&mut rng, name(first), name(second), GameMode::Computer(second))?;
        let mut players = [AiPlayer::new(first), AiPlayer::new(second)];
        while !game.is_over() {
            let idx = if game.turn() == Side::First { 0 } else { 1 };
            take_turn(&mut game, &mut players[idx], &mut rng)?;
        }
        game.audit()?;
        board.record_game(&game);
        results.push(json!({
            "game_id": game.id().to_string(),
            "winner": game.winner().map(|w| w.to_string()),
            "moves": game.history().len(),
        }));
    }

    let standings: Vec<_> = board
        .standings()
        .into_iter()
        .map(|e| {
            json!({
                "player": e.player.to_string(),
                "wins": e.wins,
                "losses": e.losses,
                "win_rate": e.win_rate(),
            })
        })
        .collect();

    let winner = results.last().and_then(|r| r["winner"].as_str().map(str::to_string));
    let summary = json!({
        "seed": seed,
        "games": results,
        "standings": standings,
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
