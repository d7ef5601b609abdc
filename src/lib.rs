mod ai;
mod bitboard;
mod common;
mod config;
mod fleet;
mod game;
mod grid;
mod history;
pub mod leaderboard;
mod logging;
pub mod placement;
mod player;
#[cfg(feature = "cli")]
mod player_cli;
pub mod record;
mod ship;

pub use ai::{calc_pdf, calc_pdf_and_guess, sample_pdf, Pdf};
pub use bitboard::{BitBoard, BitBoardError};
pub use common::*;
pub use config::*;
pub use fleet::Fleet;
pub use game::*;
pub use grid::{Cell, Grid, BB};
pub use history::{History, Move};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use logging::{init_logging, parse_level};
pub use placement::{Placement, ShipIndex};
pub use player::*;
#[cfg(feature = "cli")]
pub use player_cli::*;
pub use record::{GameRecord, ShipRecord};
pub use ship::*;
