//! One player's turn: counters, phase state machine and turn-scoped hooks.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EngineError, PlayerId, Result};
use crate::hooks::HookTable;

/// Turn phases, in the only order they can occur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Action,
    Buy,
    Cleanup,
    Finished,
}

impl Phase {
    /// The phase that follows this one.
    #[must_use]
    pub fn next(self) -> Option<Phase> {
        match self {
            Self::Action => Some(Self::Buy),
            Self::Buy => Some(Self::Cleanup),
            Self::Cleanup => Some(Self::Finished),
            Self::Finished => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Action => "Action",
            Self::Buy => "Buy",
            Self::Cleanup => "Cleanup",
            Self::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// State of the turn in progress.
#[derive(Debug)]
pub struct Turn {
    player: PlayerId,
    pub actions: u32,
    pub buys: u32,
    pub coins: u32,
    phase: Phase,
    /// Kinds that may not be bought this turn.
    forbidden: Vec<CardId>,
    actions_played: u32,
    played_kinds: FxHashMap<CardId, u32>,
    bought: Vec<CardId>,
    buying_open: bool,
    /// Hooks that disappear with this turn.
    pub hooks: HookTable,
}

impl Turn {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            actions: 1,
            buys: 1,
            coins: 0,
            phase: Phase::Action,
            forbidden: Vec::new(),
            actions_played: 0,
            played_kinds: FxHashMap::default(),
            bought: Vec::new(),
            buying_open: false,
            hooks: HookTable::new(),
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to `to`, which must be the next phase.
    pub fn advance(&mut self, to: Phase) -> Result<()> {
        if self.phase.next() != Some(to) {
            return Err(EngineError::PhaseOrder { from: self.phase, to });
        }
        tracing::debug!(player = %self.player, from = %self.phase, to = %to, "phase transition");
        self.phase = to;
        Ok(())
    }

    /// Fail unless the turn is in `phase`.
    pub fn require(&self, phase: Phase) -> Result<()> {
        if self.phase != phase {
            return Err(EngineError::WrongPhase {
                expected: phase,
                actual: self.phase,
            });
        }
        Ok(())
    }

    pub fn spend_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_sub(amount);
    }

    pub fn forbid(&mut self, kind: CardId) {
        if !self.forbidden.contains(&kind) {
            self.forbidden.push(kind);
        }
    }

    #[must_use]
    pub fn is_forbidden(&self, kind: CardId) -> bool {
        self.forbidden.contains(&kind)
    }

    pub fn forbidden(&self) -> &[CardId] {
        &self.forbidden
    }

    /// Count a card that entered play. Replays through another card count
    /// too.
    pub fn record_play(&mut self, kind: CardId, is_action: bool) {
        *self.played_kinds.entry(kind).or_default() += 1;
        if is_action {
            self.actions_played += 1;
        }
    }

    /// Action cards played this turn, replays included.
    #[must_use]
    pub fn actions_played(&self) -> u32 {
        self.actions_played
    }

    #[must_use]
    pub fn times_played(&self, kind: CardId) -> u32 {
        self.played_kinds.get(&kind).copied().unwrap_or(0)
    }

    pub fn record_buy(&mut self, kind: CardId) {
        self.bought.push(kind);
    }

    pub fn bought(&self) -> &[CardId] {
        &self.bought
    }

    /// Mark that pre-buy hooks have run. Returns `false` if they already had.
    pub(crate) fn open_buying(&mut self) -> bool {
        !std::mem::replace(&mut self.buying_open, true)
    }
}
