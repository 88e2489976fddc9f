//! Game configuration.
//!
//! `GameConfig` carries the knobs that are fixed for a whole match. Card
//! content is chosen separately, by the expansions handed to the builder.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Number of cards in a freshly drawn hand.
pub const DEFAULT_HAND_SIZE: usize = 5;

/// Match-wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for every random stream in the game.
    pub seed: u64,

    /// Game-level half of the concurrent attack switch. An attack resolves
    /// concurrently only if this is set *and* the attack card allows it.
    pub allow_simultaneous_reactions: bool,

    /// Cards drawn at the end of every Cleanup.
    pub hand_size: usize,

    /// Stop after this many player-turns even if no other end condition
    /// has fired. `None` means no limit.
    pub max_turns: Option<u32>,

    /// Constraints for the default random kingdom policy.
    pub kingdom: KingdomConfig,

    /// Most already-delivered log messages to keep. `None` keeps the whole
    /// game's log.
    pub log_retention: Option<usize>,
}

impl GameConfig {
    /// Create a config with default settings and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Enable or disable concurrent attack resolution (builder pattern).
    #[must_use]
    pub fn with_simultaneous_reactions(mut self, allow: bool) -> Self {
        self.allow_simultaneous_reactions = allow;
        self
    }

    /// Set the hand size (builder pattern).
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set a turn limit (builder pattern).
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// Set the kingdom constraints (builder pattern).
    #[must_use]
    pub fn with_kingdom(mut self, kingdom: KingdomConfig) -> Self {
        self.kingdom = kingdom;
        self
    }

    /// Bound the game log (builder pattern).
    #[must_use]
    pub fn with_log_retention(mut self, retention: usize) -> Self {
        self.log_retention = Some(retention);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            allow_simultaneous_reactions: false,
            hand_size: DEFAULT_HAND_SIZE,
            max_turns: None,
            kingdom: KingdomConfig::default(),
            log_retention: None,
        }
    }
}

/// Constraints on which ten kingdom piles a random kingdom may contain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingdomConfig {
    /// Kinds that must be in the kingdom.
    pub required: Vec<CardId>,
    /// At least two kinds at each cost from 2 to 5.
    pub distribute_cost: bool,
    /// Exclude every Attack card.
    pub disable_attacks: bool,
    /// At least one card giving +2 Actions or more.
    pub require_plus_two_action: bool,
    /// At least one card giving +1 Card or more.
    pub require_drawer: bool,
    /// At least one card giving +1 Buy or more.
    pub require_buy: bool,
    /// At least one card that trashes.
    pub require_trashing: bool,
}

impl KingdomConfig {
    /// Require a specific kind (builder pattern).
    #[must_use]
    pub fn with_required(mut self, kind: CardId) -> Self {
        if !self.required.contains(&kind) {
            self.required.push(kind);
        }
        self
    }

    /// Toggle cost distribution (builder pattern).
    #[must_use]
    pub fn with_distribute_cost(mut self, enabled: bool) -> Self {
        self.distribute_cost = enabled;
        self
    }

    /// Toggle Attack exclusion (builder pattern).
    #[must_use]
    pub fn with_attacks_disabled(mut self, disabled: bool) -> Self {
        self.disable_attacks = disabled;
        self
    }

    /// Toggle the +2 Actions requirement (builder pattern).
    #[must_use]
    pub fn with_plus_two_action(mut self, required: bool) -> Self {
        self.require_plus_two_action = required;
        self
    }

    /// Toggle the drawer requirement (builder pattern).
    #[must_use]
    pub fn with_drawer(mut self, required: bool) -> Self {
        self.require_drawer = required;
        self
    }

    /// Toggle the +Buy requirement (builder pattern).
    #[must_use]
    pub fn with_buy(mut self, required: bool) -> Self {
        self.require_buy = required;
        self
    }

    /// Toggle the trashing requirement (builder pattern).
    #[must_use]
    pub fn with_trashing(mut self, required: bool) -> Self {
        self.require_trashing = required;
        self
    }
}

impl Default for KingdomConfig {
    fn default() -> Self {
        Self {
            required: Vec::new(),
            distribute_cost: false,
            disable_attacks: false,
            require_plus_two_action: false,
            require_drawer: false,
            require_buy: false,
            require_trashing: true,
        }
    }
}
