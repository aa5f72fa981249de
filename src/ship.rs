//! Fleet definitions and random ship layout for the human battlefield.

use alloc::vec::Vec;
use rand::Rng;

use crate::cell::Coordinate;
use crate::common::GameError;
use crate::config::SHIPS;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipDef {
    name: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship anchored at (`row`, `col`) on a `size`×`size` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub def: ShipDef,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Placement {
    /// Zero-based (row, col) of each segment, or `None` if the ship leaves the board.
    pub fn segments(&self, size: usize) -> Option<Vec<(usize, usize)>> {
        let len = self.def.length();
        let fits = match self.orientation {
            Orientation::Horizontal => self.col + len <= size && self.row < size,
            Orientation::Vertical => self.row + len <= size && self.col < size,
        };
        if !fits {
            return None;
        }
        Some(
            (0..len)
                .map(|i| match self.orientation {
                    Orientation::Horizontal => (self.row, self.col + i),
                    Orientation::Vertical => (self.row + i, self.col),
                })
                .collect(),
        )
    }
}

/// Returns a random non-overlapping placement for `def` given the occupied mask.
fn random_placement<R: Rng>(
    rng: &mut R,
    def: ShipDef,
    size: usize,
    occupied: &[bool],
) -> Result<Placement, GameError> {
    if def.length() > size {
        return Err(GameError::UnableToPlaceShip(def.name()));
    }
    let mut attempts = 0;
    while attempts < 100 {
        attempts += 1;
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let max_r = if orientation == Orientation::Vertical {
            size - def.length()
        } else {
            size - 1
        };
        let max_c = if orientation == Orientation::Horizontal {
            size - def.length()
        } else {
            size - 1
        };
        let placement = Placement {
            def,
            row: rng.random_range(0..=max_r),
            col: rng.random_range(0..=max_c),
            orientation,
        };
        let Some(segments) = placement.segments(size) else {
            continue;
        };
        if segments.iter().all(|&(r, c)| !occupied[r * size + c]) {
            return Ok(placement);
        }
    }
    Err(GameError::UnableToPlaceShip(def.name()))
}

/// Place the standard fleet on a `size`×`size` board and return every
/// ship-occupied coordinate in row-major order.
pub fn random_layout<R: Rng>(rng: &mut R, size: usize) -> Result<Vec<Coordinate>, GameError> {
    let mut occupied = alloc::vec![false; size * size];
    for def in SHIPS.iter() {
        let placement = random_placement(rng, *def, size, &occupied)?;
        for (r, c) in placement.segments(size).ok_or(GameError::UnableToPlaceShip(def.name()))? {
            occupied[r * size + c] = true;
        }
    }
    Ok(occupied
        .iter()
        .enumerate()
        .filter(|(_, taken)| **taken)
        .map(|(i, _)| Coordinate::from_position(i / size, i % size))
        .collect())
}
