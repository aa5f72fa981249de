//! Commonly used types and utilities for ease of import.

pub use crate::{
    Battlefield, Cell, CellCriteria, CellFlags, CellId, Coordinate, Game, GameError, Outcome,
    Phase, Player, PlayerId, Ticket,
};

#[cfg(feature = "std")]
pub use crate::{ConsoleUi, Endpoints, GameApi, GameClient, RemoteApi, Ui};

#[cfg(feature = "std")]
pub use crate::transport::{
    in_memory::InMemoryTransport, scripted::ScriptedTransport, Transport,
};
