#[cfg(not(feature = "cli"))]
fn main() {}

#[cfg(feature = "cli")]
use broadside::{
    coord_to_string, init_logging, print_help, print_player_view, read_command, record,
    take_turn, AiPlayer, Command, Difficulty, GameMode, GameState, GameStatus, MoveResult, Side,
};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use rand::rngs::SmallRng;
#[cfg(feature = "cli")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "cli")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "cli")]
enum Commands {
    /// Play against the computer.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        level: Difficulty,
        #[arg(long, default_value = "player")]
        name: String,
        #[arg(long, help = "Print the final game record as JSON")]
        dump: bool,
    },
    /// Watch two computer players fight it out.
    Watch {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        level: Difficulty,
        #[arg(long, help = "Print the final game record as JSON")]
        dump: bool,
    },
}

#[cfg(feature = "cli")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "cli")]
fn describe(result: &MoveResult) -> String {
    match (result.ship, result.sunk) {
        (Some(kind), true) => format!("hit and sank the {}!", kind),
        (Some(_), false) => "hit!".to_string(),
        (None, _) => "miss.".to_string(),
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            level,
            name,
            dump,
        } => {
            let mut rng = make_rng(seed);
            let game = play(&mut rng, level, name)?;
            if dump {
                println!("{}", record::to_json(&game.to_record())?);
            }
        }
        Commands::Watch { seed, level, dump } => {
            let mut rng = make_rng(seed);
            let game = watch(&mut rng, level)?;
            if dump {
                println!("{}", record::to_json(&game.to_record())?);
            }
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn play(rng: &mut SmallRng, level: Difficulty, name: String) -> anyhow::Result<GameState> {
    let mut game = GameState::new_with_mode(rng, name, "computer", GameMode::Computer(level))?;
    let me = Side::First;
    let my_id = game.player(me).clone();
    let mut computer = AiPlayer::new(level);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    println!("Game {} started. You fire first.", game.id());
    while !game.is_over() {
        if game.turn() == me {
            println!();
            print_player_view(&game, me);
            match read_command(&mut input)? {
                Command::Fire(x, y) => match game.apply_move(&my_id, x, y) {
                    Ok(result) => println!("{}: {}", coord_to_string(x, y), describe(&result)),
                    Err(e) => println!("{}", e),
                },
                Command::Undo => {
                    let mut undone = 0;
                    while game.undo_last_move() {
                        undone += 1;
                        if game.turn() == me {
                            break;
                        }
                    }
                    if undone == 0 {
                        println!("Nothing to undo.");
                    } else {
                        println!("Took back {} move(s).", undone);
                    }
                }
                Command::Help => print_help(),
                Command::Quit => {
                    println!("Leaving the game.");
                    return Ok(game);
                }
            }
        } else {
            let ((x, y), result) = take_turn(&mut game, &mut computer, rng)?;
            println!("Computer fires at {}: {}", coord_to_string(x, y), describe(&result));
        }
    }

    println!();
    print_player_view(&game, me);
    match game.status_for(me) {
        GameStatus::Won => println!("\nVICTORY! You have sunk all enemy ships!"),
        GameStatus::Lost => println!("\nDEFEAT. All your ships have been destroyed."),
        GameStatus::InProgress => {}
    }
    Ok(game)
}

#[cfg(feature = "cli")]
fn watch(rng: &mut SmallRng, level: Difficulty) -> anyhow::Result<GameState> {
    let mut game = GameState::new_with_mode(rng, "computer-1", "computer-2", GameMode::Computer(level))?;
    let mut players = [AiPlayer::new(level), AiPlayer::new(level)];
    while !game.is_over() {
        let side = game.turn();
        let idx = if side == Side::First { 0 } else { 1 };
        let ((x, y), result) = take_turn(&mut game, &mut players[idx], rng)?;
        println!(
            "{} fires at {}: {}",
            game.player(side),
            coord_to_string(x, y),
            describe(&result)
        );
    }
    println!();
    print_player_view(&game, Side::First);
    if let Some(winner) = game.winner() {
        println!("\n{} wins after {} moves.", winner, game.history().len());
    }
    Ok(game)
}
