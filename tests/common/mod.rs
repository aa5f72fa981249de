#![allow(dead_code)]

use battleship_client::domain::{BattlefieldRecord, CellRecord, InitRequest, InitResponse, PlayerRecord};
use battleship_client::{CellFlags, CellId, Coordinate, PlayerId};

pub const HUMAN_ID: PlayerId = PlayerId(10);
pub const OPPONENT_ID: PlayerId = PlayerId(11);
pub const OPPONENT: &str = "Bob";

/// Id the fake service gives the human cell at (row, col).
pub fn human_cell_id(size: usize, row: usize, col: usize) -> CellId {
    CellId((row * size + col) as u64 + 1)
}

/// Id the fake service gives the opponent cell at (row, col).
pub fn opponent_cell_id(size: usize, row: usize, col: usize) -> CellId {
    CellId(1000 + (row * size + col) as u64 + 1)
}

/// What a well-behaved service answers to `request`: the human board with the
/// requested ships confirmed and one blank opponent board of the same size.
pub fn init_response_for(request: &InitRequest) -> InitResponse {
    let size = request.size;
    let mut human = Vec::new();
    let mut opponent = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let coordinate = Coordinate::from_position(row, col);
            let flags = if request.coordinates.contains(&coordinate) {
                CellFlags::SHIP.bits()
            } else {
                0
            };
            human.push(CellRecord {
                id: human_cell_id(size, row, col),
                coordinate: coordinate.clone(),
                flags,
            });
            opponent.push(CellRecord {
                id: opponent_cell_id(size, row, col),
                coordinate,
                flags: 0,
            });
        }
    }
    // opponent cells arrive in reverse order; matching must not care
    opponent.reverse();
    vec![
        BattlefieldRecord {
            id: Some(1),
            player: PlayerRecord {
                id: HUMAN_ID,
                name: request.player_name.clone(),
            },
            cells: human,
        },
        BattlefieldRecord {
            id: Some(2),
            player: PlayerRecord {
                id: OPPONENT_ID,
                name: OPPONENT.to_string(),
            },
            cells: opponent,
        },
    ]
}

pub fn ships() -> Vec<Coordinate> {
    ["A1", "B1", "C1", "A3", "A4"]
        .iter()
        .map(|c| Coordinate::from(*c))
        .collect()
}
