#![cfg(feature = "cli")]

use std::io::{self, BufRead, Write};

use crate::{
    game::GameState,
    grid::{Cell, Grid},
    player::Side,
};

/// A line of input from the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire(usize, usize),
    Undo,
    Help,
    Quit,
}

/// Format `(x, y)` as the on-screen coordinate, e.g. `(1, 6)` is `B7`.
pub fn coord_to_string(x: usize, y: usize) -> String {
    let col = (b'A' + x as u8) as char;
    format!("{}{}", col, y + 1)
}

/// Parse `B7`-style coordinates into `(x, y)`. Rejects anything off the board.
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    let mut chars = input.trim().chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let x = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().trim().parse().ok()?;
    if row == 0 {
        return None;
    }
    let y = row - 1;
    Grid::in_bounds(x, y).then_some((x, y))
}

/// Parse one input line.
pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "undo" | "u" => Some(Command::Undo),
        "help" | "h" | "?" => Some(Command::Help),
        "quit" | "q" | "exit" => Some(Command::Quit),
        other => parse_coord(other).map(|(x, y)| Command::Fire(x, y)),
    }
}

/// Prompt until the player enters a valid command. End of input reads as
/// `Quit`.
pub fn read_command<R: BufRead>(input: &mut R) -> io::Result<Command> {
    loop {
        print!("Enter target (e.g. B7), 'undo', 'help' or 'quit': ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Command::Quit);
        }
        match parse_command(&line) {
            Some(cmd) => return Ok(cmd),
            None => println!("Invalid input '{}'. Try again.", line.trim()),
        }
    }
}

pub fn print_help() {
    println!("Commands:");
    println!("  A1..J10  fire at that cell (column letter, row number)");
    println!("  undo     take back your last shot and the reply to it");
    println!("  quit     leave the game");
}

/// Print both grids side by side: own waters revealed, enemy waters masked.
pub fn print_player_view(game: &GameState, side: Side) {
    let own = game.grid(side).to_string();
    let enemy = game.masked_grid(side.opponent()).to_string();
    println!("{:<26}    {}", "Your fleet", "Enemy waters");
    for (left, right) in own.lines().zip(enemy.lines()) {
        println!("{:<26}    {}", left, right);
    }
    let fleet = game.fleet(side);
    let status: Vec<String> = fleet.ships().iter().map(|s| s.to_string()).collect();
    println!("Your ships: {}", status.join(", "));
    let enemy_fleet = game.fleet(side.opponent());
    let sunk: Vec<&str> = enemy_fleet
        .ships()
        .iter()
        .filter(|s| s.is_sunk())
        .map(|s| s.name())
        .collect();
    if !sunk.is_empty() {
        println!("Enemy ships sunk: {}", sunk.join(", "));
    }
    println!(
        "Shots fired: {} hits, {} misses",
        game.grid(side.opponent()).count(Cell::Hit),
        game.grid(side.opponent()).count(Cell::Miss)
    );
}
