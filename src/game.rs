//! Game session state and reconciliation of server responses.
//!
//! The game never talks to the network. [`Game::init`] and [`Game::update`]
//! produce outgoing requests tagged with a [`Ticket`]; the matching responses
//! are merged back with [`Game::apply_init_response`] and
//! [`Game::apply_turn_response`]. Only one request is in flight at a time and
//! a response whose ticket does not match it is rejected untouched.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use log::{debug, info, warn};

use crate::battlefield::CellCriteria;
use crate::cell::{Cell, CellId, Coordinate};
use crate::common::{GameError, Outcome};
use crate::config::OPPONENTS;
use crate::domain::{BattlefieldRecord, InitRequest, InitResponse, TurnRequest, TurnResponse};
use crate::flags::CellFlags;
use crate::player::{Player, PlayerId};

/// Identifies one outgoing request. `epoch` changes with every `init`,
/// `seq` with every turn inside an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub epoch: u64,
    pub seq: u64,
}

/// A request produced by the game, to be handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing<T> {
    pub ticket: Ticket,
    pub request: T,
}

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    AwaitingInit,
    Active,
    Terminal(Outcome),
}

/// All players of the current session, human first.
#[derive(Debug, Clone, Default)]
pub struct Game {
    players: Vec<Player>,
    phase: Phase,
    epoch: u64,
    seq: u64,
    in_flight: Option<Ticket>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session, discarding every player of the previous one.
    ///
    /// The human battlefield is built immediately with `ships` marked; name and
    /// size are not validated here.
    pub fn init(
        &mut self,
        player_name: &str,
        size: usize,
        ships: &[Coordinate],
    ) -> Result<Outgoing<InitRequest>, GameError> {
        let human = Player::human(player_name, size, ships)?;
        let coordinates = human.battlefield().coordinates_with(CellFlags::SHIP);
        let ticket = Ticket {
            epoch: self.epoch + 1,
            seq: 0,
        };

        *self = Game {
            players: vec![human],
            phase: Phase::AwaitingInit,
            epoch: ticket.epoch,
            seq: 0,
            in_flight: Some(ticket),
        };
        info!(
            "game {} initialized for {:?} on a {}x{} battlefield",
            ticket.epoch, player_name, size, size
        );

        Ok(Outgoing {
            ticket,
            request: InitRequest {
                player_name: String::from(player_name),
                opponents: OPPONENTS,
                size,
                coordinates,
            },
        })
    }

    /// Merge the init response: confirm the human player, create opponents.
    ///
    /// Players are matched by name and cells by coordinate, never by position.
    /// On error nothing is modified.
    pub fn apply_init_response(
        &mut self,
        ticket: Ticket,
        response: InitResponse,
    ) -> Result<(), GameError> {
        if self.phase != Phase::AwaitingInit {
            return Err(GameError::UnexpectedResponse("init"));
        }
        self.check_ticket(ticket)?;

        let mut players = self.players.clone();
        let mut seen = BTreeSet::new();
        for record in &response {
            if !seen.insert(record.player.name.as_str()) {
                return Err(GameError::DuplicatePlayer(format!(
                    "name {:?}",
                    record.player.name
                )));
            }
            reconcile_battlefield(&mut players, record)?;
        }
        if players[0].id().is_none() {
            warn!(
                "init response did not mention human player {:?}",
                players[0].name()
            );
        }

        info!(
            "game {} active with {} players",
            self.epoch,
            players.len()
        );
        self.players = players;
        self.phase = Phase::Active;
        self.in_flight = None;
        Ok(())
    }

    /// Request a shot at the cell with server id `cell_id`.
    pub fn update(&mut self, cell_id: CellId) -> Result<Outgoing<TurnRequest>, GameError> {
        match self.phase {
            Phase::Uninitialized | Phase::AwaitingInit => return Err(GameError::NotInitialized),
            Phase::Terminal(_) => return Err(GameError::GameOver),
            Phase::Active => {}
        }
        if self.in_flight.is_some() {
            return Err(GameError::TurnInFlight);
        }
        let cell = self.find_player_cell_by_criteria(&CellCriteria::id(cell_id))?;
        let cell_id = cell
            .id()
            .ok_or_else(|| GameError::CellUnconfirmed(String::from(cell.coordinate().as_str())))?;

        self.seq += 1;
        let ticket = Ticket {
            epoch: self.epoch,
            seq: self.seq,
        };
        self.in_flight = Some(ticket);
        debug!("turn {} targets cell {}", self.seq, cell_id);
        Ok(Outgoing {
            ticket,
            request: TurnRequest { cell_id },
        })
    }

    /// Merge the turn response and classify a terminal result.
    ///
    /// Every delta must resolve to a known cell before any flags change, so a
    /// response naming an unknown cell leaves the model untouched.
    pub fn apply_turn_response(
        &mut self,
        ticket: Ticket,
        response: TurnResponse,
    ) -> Result<Option<Outcome>, GameError> {
        if self.phase != Phase::Active {
            return Err(GameError::UnexpectedResponse("turn"));
        }
        self.check_ticket(ticket)?;
        self.in_flight = None;

        let mut targets = Vec::with_capacity(response.cells.len());
        for delta in &response.cells {
            let (player, cell) = self.locate_cell(&CellCriteria::id(delta.id))?;
            targets.push((player, cell, CellFlags::from_raw(delta.flags)));
        }
        let outcome = match &response.result {
            Some(result) => {
                let defeated = self.find_player_by_id(result.player.id)?;
                Some(if defeated.is_ai_controlled() {
                    Outcome::Won
                } else {
                    Outcome::Lost
                })
            }
            None => None,
        };

        for (player, cell, flags) in targets {
            if let Some(cell) = self.players[player].battlefield_mut().cell_at_mut(cell) {
                cell.set_flags(flags);
            }
        }
        debug!("turn {} updated {} cells", ticket.seq, response.cells.len());

        if let Some(outcome) = outcome {
            info!("game {} finished: {:?}", self.epoch, outcome);
            self.phase = Phase::Terminal(outcome);
        }
        Ok(outcome)
    }

    /// Forget the in-flight request identified by `ticket`, e.g. after a
    /// transport failure. Returns `false` if it was not the one in flight.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        warn!("abandoning request {:?}", ticket);
        self.in_flight = None;
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Ticket of the request awaiting its response, if any.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The local human player, once `init` has been called.
    pub fn human(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn opponents(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().skip(1)
    }

    pub fn find_player_by_id(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|player| player.id() == Some(id))
            .ok_or_else(|| GameError::PlayerNotFound(format!("id {}", id)))
    }

    pub fn find_player_by_name(&self, name: &str) -> Result<&Player, GameError> {
        find_player_index_by_name(&self.players, name).map(|i| &self.players[i])
    }

    /// First cell across all players matching `criteria`.
    pub fn find_player_cell_by_criteria(&self, criteria: &CellCriteria) -> Result<&Cell, GameError> {
        let (player, cell) = self.locate_cell(criteria)?;
        self.players[player]
            .battlefield()
            .cell_at(cell)
            .ok_or_else(|| GameError::CellNotFound(format!("{}", criteria)))
    }

    /// `true` for an unrevealed cell on an opponent's battlefield.
    pub fn is_targetable(&self, cell_id: CellId) -> bool {
        match self.locate_cell(&CellCriteria::id(cell_id)) {
            Ok((player, cell)) => {
                let player = &self.players[player];
                player.is_ai_controlled()
                    && player
                        .battlefield()
                        .cell_at(cell)
                        .is_some_and(|cell| cell.flags().is_unrevealed())
            }
            Err(_) => false,
        }
    }

    fn locate_cell(&self, criteria: &CellCriteria) -> Result<(usize, usize), GameError> {
        locate_cell(&self.players, criteria)
    }

    fn check_ticket(&self, ticket: Ticket) -> Result<(), GameError> {
        if self.in_flight != Some(ticket) {
            warn!(
                "dropping response for {:?}, expecting {:?}",
                ticket, self.in_flight
            );
            return Err(GameError::StaleResponse {
                expected: self.in_flight,
                got: ticket,
            });
        }
        Ok(())
    }
}

fn find_player_index_by_name(players: &[Player], name: &str) -> Result<usize, GameError> {
    players
        .iter()
        .position(|player| player.name() == name)
        .ok_or_else(|| GameError::PlayerNotFound(format!("name {:?}", name)))
}

/// (player index, cell index) of the first cell matching `criteria`.
///
/// A miss on one battlefield moves on to the next; only exhausting every
/// player reports [`GameError::CellNotFound`].
fn locate_cell(players: &[Player], criteria: &CellCriteria) -> Result<(usize, usize), GameError> {
    for (i, player) in players.iter().enumerate() {
        if criteria.player_id.is_some() && criteria.player_id != player.id() {
            continue;
        }
        match player.battlefield().position(criteria) {
            Ok(cell) => return Ok((i, cell)),
            Err(err) if err.is_not_found() => continue,
            Err(err) => return Err(err),
        }
    }
    Err(GameError::CellNotFound(format!("{}", criteria)))
}

fn reconcile_battlefield(players: &mut Vec<Player>, record: &BattlefieldRecord) -> Result<(), GameError> {
    let name = record.player.name.as_str();
    let index = match find_player_index_by_name(players, name) {
        Ok(index) => index,
        Err(err) if err.is_not_found() => {
            let opponent = Player::remote(name, record.cells.len())?;
            debug!(
                "discovered opponent {:?} with a {}x{} battlefield",
                name,
                opponent.battlefield().size(),
                opponent.battlefield().size()
            );
            players.push(opponent);
            players.len() - 1
        }
        Err(err) => return Err(err),
    };

    let expected = players[index].battlefield().cells().len();
    if record.cells.len() != expected {
        return Err(GameError::CellCountMismatch {
            player: String::from(name),
            expected,
            got: record.cells.len(),
        });
    }

    let id = record.player.id;
    if players
        .iter()
        .enumerate()
        .any(|(i, player)| i != index && player.id() == Some(id))
    {
        return Err(GameError::DuplicatePlayer(format!("id {}", id)));
    }
    players[index].set_id(id);

    let criteria_player = CellCriteria::default().with_player(id);
    let mut confirmed = vec![false; expected];
    for cell_record in &record.cells {
        let criteria = CellCriteria {
            coordinate: Some(cell_record.coordinate.clone()),
            ..criteria_player.clone()
        };
        let (player, cell) = locate_cell(players, &criteria).map_err(|err| {
            if err.is_not_found() {
                GameError::UnmatchedCoordinate {
                    player: String::from(name),
                    coordinate: String::from(cell_record.coordinate.as_str()),
                }
            } else {
                err
            }
        })?;
        if core::mem::replace(&mut confirmed[cell], true) {
            return Err(GameError::DuplicateCoordinate {
                player: String::from(name),
                coordinate: String::from(cell_record.coordinate.as_str()),
            });
        }
        if let Some(cell) = players[player].battlefield_mut().cell_at_mut(cell) {
            cell.set_id(cell_record.id)
                .set_flags(CellFlags::from_raw(cell_record.flags));
        }
    }
    debug!(
        "reconciled {} cells for player {:?} ({})",
        record.cells.len(),
        name,
        id
    );
    Ok(())
}
