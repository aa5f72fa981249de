//! Common types for the battleship client: model errors and game outcomes.

use alloc::string::String;

use crate::cell::CellId;

/// Errors returned by model lookups and reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// No cell matched the lookup criteria.
    #[error("cell not found by criteria: {0}")]
    CellNotFound(String),
    /// No player matched the lookup criteria.
    #[error("player not found: {0}")]
    PlayerNotFound(String),
    /// A server battlefield whose cell count is not a perfect square.
    #[error("battlefield with {0} cells is not square")]
    NonSquareBoard(usize),
    /// A server cell record whose coordinate has no local counterpart.
    #[error("coordinate {coordinate:?} does not exist on the battlefield of {player:?}")]
    UnmatchedCoordinate { player: String, coordinate: String },
    /// A server battlefield whose cell count differs from the local one.
    #[error("battlefield of {player:?} has {got} cells, expected {expected}")]
    CellCountMismatch { player: String, expected: usize, got: usize },
    /// A server battlefield listing the same coordinate twice.
    #[error("coordinate {coordinate:?} is listed twice for {player:?}")]
    DuplicateCoordinate { player: String, coordinate: String },
    /// A coordinate that cannot exist on a board of the given size.
    #[error("coordinate {0:?} is outside the battlefield")]
    InvalidCoordinate(String),
    /// Two players would share a name or an id.
    #[error("player {0:?} is already registered")]
    DuplicatePlayer(String),
    /// The game has not been initialized yet.
    #[error("game is not initialized")]
    NotInitialized,
    /// A response arrived in a phase that does not expect it.
    #[error("unexpected {0} response")]
    UnexpectedResponse(&'static str),
    /// A response for a request that is no longer in flight.
    #[error("stale response: ticket {got:?} does not match {expected:?}")]
    StaleResponse { expected: Option<crate::game::Ticket>, got: crate::game::Ticket },
    /// A turn request is already awaiting its response.
    #[error("a turn is already in flight")]
    TurnInFlight,
    /// The cell has no server-confirmed id yet.
    #[error("cell {0:?} is not confirmed by the server")]
    CellUnconfirmed(String),
    /// The cell cannot be targeted (own board or already revealed).
    #[error("cell {0} cannot be targeted")]
    NotTargetable(CellId),
    /// Random placement of the named ship failed.
    #[error("unable to place {0}")]
    UnableToPlaceShip(&'static str),
    /// The game already reached a terminal result.
    #[error("game is over")]
    GameOver,
}

impl GameError {
    /// Returns `true` for "entity not found" misses that a caller searching
    /// several collections may recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GameError::CellNotFound(_) | GameError::PlayerNotFound(_))
    }
}

/// Terminal result of a game, from the human player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Won,
    Lost,
}

/// Severity attached to an announcement shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Danger,
}

impl Outcome {
    /// Announcement text for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => crate::config::TEXT_WIN,
            Outcome::Lost => crate::config::TEXT_LOSS,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Won => Severity::Success,
            Outcome::Lost => Severity::Danger,
        }
    }
}
