//! Players: identity, control type and the battlefield each one owns.

use alloc::string::String;
use core::fmt;

use crate::battlefield::Battlefield;
use crate::cell::Coordinate;
use crate::common::GameError;

/// Server-assigned player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant of the game. The control type never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: Option<PlayerId>,
    name: String,
    ai_controlled: bool,
    battlefield: Battlefield,
}

impl Player {
    /// The local human player with a known ship layout.
    pub fn human<'a, I>(name: impl Into<String>, size: usize, ships: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        Ok(Self {
            id: None,
            name: name.into(),
            ai_controlled: false,
            battlefield: Battlefield::with_ships(size, ships)?,
        })
    }

    /// An AI opponent discovered in a server payload carrying `cell_count` cells.
    pub fn remote(name: impl Into<String>, cell_count: usize) -> Result<Self, GameError> {
        let size = board_size_from_cell_count(cell_count)?;
        Ok(Self {
            id: None,
            name: name.into(),
            ai_controlled: true,
            battlefield: Battlefield::new(size),
        })
    }

    pub fn id(&self) -> Option<PlayerId> {
        self.id
    }

    pub fn set_id(&mut self, id: PlayerId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ai_controlled(&self) -> bool {
        self.ai_controlled
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }
}

/// Side length of a square board with `cell_count` cells.
///
/// Fails with [`GameError::NonSquareBoard`] when `cell_count` is not a perfect square.
pub fn board_size_from_cell_count(cell_count: usize) -> Result<usize, GameError> {
    let root = libm::round(libm::sqrt(cell_count as f64)) as usize;
    if root == 0 || root * root != cell_count {
        return Err(GameError::NonSquareBoard(cell_count));
    }
    Ok(root)
}
