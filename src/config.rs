use crate::ship::ShipDef;

/// Smallest battlefield a human player may request.
pub const MIN_BOARD_SIZE: usize = 7;
/// Largest battlefield a human player may request.
pub const MAX_BOARD_SIZE: usize = 12;
/// Size used when the player does not pick one.
pub const DEFAULT_BOARD_SIZE: usize = 7;

/// Number of opponents requested from the server.
pub const OPPONENTS: u8 = 1;

pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("Carrier", 5),
    ShipDef::new("Battleship", 4),
    ShipDef::new("Cruiser", 3),
    ShipDef::new("Submarine", 3),
    ShipDef::new("Destroyer", 2),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

pub const DEFAULT_PLAYER_NAME: &str = "Player controlled by Human";

pub const TEXT_WIN: &str = "you won";
pub const TEXT_LOSS: &str = "you lost";

pub const DEFAULT_INIT_LINK: &str = "/api/game-init";
pub const DEFAULT_TURN_LINK: &str = "/api/game-turn/";

/// Username length bounds accepted by [`crate::is_valid_username`].
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 25;
