//! A player's N×N grid of cells and lookup by criteria.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::cell::{Cell, CellId, Coordinate};
use crate::common::GameError;
use crate::flags::CellFlags;
use crate::player::PlayerId;

/// Search criteria for a cell. Unset fields are ignored; a cell must match
/// every field that is set. Criteria with no field set never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellCriteria {
    /// Restrict a cross-player search to one player. Ignored by [`Battlefield`].
    pub player_id: Option<PlayerId>,
    pub id: Option<CellId>,
    pub coordinate: Option<Coordinate>,
}

impl CellCriteria {
    pub fn id(id: CellId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn coordinate(coordinate: impl Into<Coordinate>) -> Self {
        Self {
            coordinate: Some(coordinate.into()),
            ..Self::default()
        }
    }

    pub fn with_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    fn is_empty(&self) -> bool {
        self.id.is_none() && self.coordinate.is_none()
    }

    fn matches(&self, cell: &Cell) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(id) = self.id {
            if cell.id() != Some(id) {
                return false;
            }
        }
        if let Some(coordinate) = &self.coordinate {
            if cell.coordinate() != coordinate {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for CellCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(player_id) = self.player_id {
            parts.push(format!("player_id: {}", player_id));
        }
        if let Some(id) = self.id {
            parts.push(format!("id: {}", id));
        }
        if let Some(coordinate) = &self.coordinate {
            parts.push(format!("coordinate: {:?}", coordinate.as_str()));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Ordered N×N cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battlefield {
    size: usize,
    cells: Vec<Cell>,
}

impl Battlefield {
    /// Board with no locally known flags, as seen for an opponent.
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Coordinate::from_position(row, col)));
            }
        }
        Self { size, cells }
    }

    /// Board with [`CellFlags::SHIP`] set on every coordinate in `ships`.
    pub fn with_ships<'a, I>(size: usize, ships: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut battlefield = Self::new(size);
        for coordinate in ships {
            let cell = battlefield
                .cell_mut_by_coordinate(coordinate)
                .ok_or_else(|| GameError::InvalidCoordinate(String::from(coordinate.as_str())))?;
            cell.set_flags(CellFlags::SHIP);
        }
        Ok(battlefield)
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// First cell matching `criteria`.
    pub fn find_cell_by_criteria(&self, criteria: &CellCriteria) -> Result<&Cell, GameError> {
        self.position(criteria).map(|i| &self.cells[i])
    }

    pub fn find_cell_by_criteria_mut(
        &mut self,
        criteria: &CellCriteria,
    ) -> Result<&mut Cell, GameError> {
        let i = self.position(criteria)?;
        Ok(&mut self.cells[i])
    }

    /// Index of the first cell matching `criteria`.
    pub fn position(&self, criteria: &CellCriteria) -> Result<usize, GameError> {
        self.cells
            .iter()
            .position(|cell| criteria.matches(cell))
            .ok_or_else(|| GameError::CellNotFound(format!("{}", criteria)))
    }

    pub fn cell_at(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_at_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Coordinates of cells carrying all bits of `mask`.
    pub fn coordinates_with(&self, mask: CellFlags) -> Vec<Coordinate> {
        self.cells
            .iter()
            .filter(|cell| !mask.is_empty() && cell.has_flag(mask))
            .map(|cell| cell.coordinate().clone())
            .collect()
    }

    fn cell_mut_by_coordinate(&mut self, coordinate: &Coordinate) -> Option<&mut Cell> {
        let (row, col) = coordinate.position()?;
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells
            .get_mut(row * self.size + col)
            .filter(|cell| cell.coordinate() == coordinate)
    }
}
