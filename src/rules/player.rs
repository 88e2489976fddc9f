//! A seated player.

use crate::cards::{Card, CardId};
use crate::core::{GameRng, PlayerId};
use crate::interaction::Interaction;
use crate::zones::PlayerMat;

use super::log::GameLog;

pub struct Player {
    id: PlayerId,
    name: String,
    pub mat: PlayerMat,
    interaction: Box<dyn Interaction>,
    /// Stream for this player's shuffles.
    rng: GameRng,
    turns_played: u32,
    /// Tokens that can be spent for 1 $ each in a Buy phase.
    coffers: u32,
    /// Log messages already delivered.
    log_cursor: usize,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, interaction: Box<dyn Interaction>, rng: GameRng) -> Self {
        Self {
            id,
            name: name.into(),
            mat: PlayerMat::new(),
            interaction,
            rng,
            turns_played: 0,
            coffers: 0,
            log_cursor: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub(crate) fn finish_turn(&mut self) {
        self.turns_played += 1;
    }

    #[must_use]
    pub fn coffers(&self) -> u32 {
        self.coffers
    }

    pub fn add_coffers(&mut self, amount: u32) {
        self.coffers += amount;
    }

    /// Remove up to `amount` Coffers, returning how many were removed.
    pub fn take_coffers(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.coffers);
        self.coffers -= taken;
        taken
    }

    pub fn interaction(&mut self) -> &mut dyn Interaction {
        self.interaction.as_mut()
    }

    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Split borrow of the mat and the shuffle stream.
    pub fn mat_and_rng(&mut self) -> (&mut PlayerMat, &mut GameRng) {
        (&mut self.mat, &mut self.rng)
    }

    /// Every card the player owns, in any zone.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.mat.all_cards()
    }

    #[must_use]
    pub fn count_kind(&self, kind: CardId) -> usize {
        self.mat.count_kind(kind)
    }

    /// Number of log messages already delivered.
    #[must_use]
    pub fn log_cursor(&self) -> usize {
        self.log_cursor
    }

    /// Send every log message this player has not seen yet.
    pub fn deliver(&mut self, log: &GameLog) {
        let pending = log.since(self.log_cursor);
        self.log_cursor += pending.len();
        for message in &pending {
            self.interaction.send(message);
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mat", &self.mat)
            .field("turns_played", &self.turns_played)
            .field("coffers", &self.coffers)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
