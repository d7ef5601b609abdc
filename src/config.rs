use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Ship kinds every fleet is built from, in placement order.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments in one fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random placement gives up on a ship after this many rejected samples.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Environment variable read by [`crate::init_logging`].
pub const LOG_ENV_VAR: &str = "BROADSIDE_LOG";
