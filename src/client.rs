#![cfg(feature = "std")]

use rand::rngs::SmallRng;

use crate::{
    cell::{CellId, Coordinate},
    common::{GameError, Outcome, Severity},
    game::{Game, Phase},
    protocol::GameApi,
    ship::random_layout,
    ui::Ui,
};

/// Owns the game session and drives it against the remote service.
///
/// Every call takes `&mut self`, so at most one request is in flight; the
/// [`Game`] additionally rejects a second turn while one is pending.
pub struct GameClient {
    game: Game,
    api: Box<dyn GameApi>,
    ui: Box<dyn Ui>,
    rng: SmallRng,
}

impl GameClient {
    pub fn new(api: Box<dyn GameApi>, ui: Box<dyn Ui>, rng: SmallRng) -> Self {
        Self {
            game: Game::new(),
            api,
            ui,
            rng,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Start a new game with a random ship layout.
    pub async fn new_game(&mut self, player_name: &str, size: usize) -> anyhow::Result<()> {
        let ships = random_layout(&mut self.rng, size).map_err(|e| anyhow::anyhow!(e))?;
        self.new_game_with_layout(player_name, size, &ships).await
    }

    /// Start a new game with the given ship-occupied coordinates.
    pub async fn new_game_with_layout(
        &mut self,
        player_name: &str,
        size: usize,
        ships: &[Coordinate],
    ) -> anyhow::Result<()> {
        self.ui.hide();
        let outgoing = self
            .game
            .init(player_name, size, ships)
            .map_err(|e| anyhow::anyhow!(e))?;
        self.ui.refresh(&self.game);

        let response = match self.api.init(&outgoing.request).await {
            Ok(response) => response,
            Err(e) => {
                self.game.abandon(outgoing.ticket);
                return Err(self.report(e));
            }
        };
        if let Err(e) = self.game.apply_init_response(outgoing.ticket, response) {
            return Err(self.report(anyhow::anyhow!(e)));
        }
        self.ui.refresh(&self.game);
        Ok(())
    }

    /// Shoot at an opponent cell. Returns the outcome once the game is decided.
    pub async fn fire(&mut self, cell_id: CellId) -> anyhow::Result<Option<Outcome>> {
        if self.game.phase() == Phase::Active
            && self.game.in_flight().is_none()
            && !self.game.is_targetable(cell_id)
        {
            return Err(anyhow::anyhow!(GameError::NotTargetable(cell_id)));
        }
        let outgoing = self.game.update(cell_id).map_err(|e| anyhow::anyhow!(e))?;

        let response = match self.api.turn(&outgoing.request).await {
            Ok(response) => response,
            Err(e) => {
                self.game.abandon(outgoing.ticket);
                return Err(self.report(e));
            }
        };
        let outcome = match self.game.apply_turn_response(outgoing.ticket, response) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.report(anyhow::anyhow!(e))),
        };

        self.ui.refresh(&self.game);
        if let Some(outcome) = outcome {
            self.ui.announce(outcome.message(), outcome.severity());
        }
        Ok(outcome)
    }

    fn report(&mut self, error: anyhow::Error) -> anyhow::Error {
        log::error!("{:#}", error);
        self.ui.announce(&format!("{:#}", error), Severity::Danger);
        error
    }
}
