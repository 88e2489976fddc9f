//! Capability traits a card kind may implement.
//!
//! A kind registers only the capabilities it has: Smithy needs nothing
//! beyond its static `+3 Cards`, Moat is `Playable`-free but `Reacting`,
//! Witch is `Attacking`, Gardens is `Scored`. The engine dispatches through
//! these trait objects and never matches on a specific kind.

use serde::{Deserialize, Serialize};

use super::instance::Card;
use crate::core::Result;
use crate::rules::{Attack, Game, Player, PlayerScope};

/// The effect an Action card performs after its static bonus is applied.
///
/// `card` is already in its owner's play area; the owner is the active
/// player, available as `game.active_player()`.
pub trait Playable: Send + Sync {
    fn action(&self, game: &mut Game, card: Card) -> Result<()>;
}

/// Per-victim behaviour of an Attack card.
pub trait Attacking: Send + Sync {
    /// Resolve the attack against one victim who did not become immune.
    fn attack_effect(&self, attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()>;

    /// Public message broadcast once before any victim reacts.
    fn prompt(&self, attack: &Attack) -> Option<String> {
        let _ = attack;
        None
    }

    /// Whether victims may resolve concurrently. Only safe when no victim's
    /// outcome depends on another's.
    fn allows_simultaneous(&self) -> bool {
        false
    }

    /// Runs after every victim has been resolved.
    fn post_attack(&self, game: &mut Game, card: Card) -> Result<()> {
        let _ = (game, card);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// The victim ignores this attack.
    Immunity,
    /// The reaction had a side effect but the attack still applies.
    Revealed,
    /// The player chose not to use the card after revealing it.
    Declined,
}

/// Outcome of revealing one Reaction card.
///
/// A declined kind is never offered again for the same attack. A resolved
/// kind is offered again only when `suppress_repeat` is unset, so each copy
/// of a card like Horse Traders may be used in turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub kind: ReactionKind,
    /// Do not offer this kind again for the same attack.
    pub suppress_repeat: bool,
}

impl Reaction {
    #[must_use]
    pub const fn immunity() -> Self {
        Self {
            kind: ReactionKind::Immunity,
            suppress_repeat: true,
        }
    }

    /// A side effect that each copy may provide.
    #[must_use]
    pub const fn revealed() -> Self {
        Self {
            kind: ReactionKind::Revealed,
            suppress_repeat: false,
        }
    }

    #[must_use]
    pub const fn declined() -> Self {
        Self {
            kind: ReactionKind::Declined,
            suppress_repeat: true,
        }
    }
}

/// Reaction to another player's Attack.
pub trait Reacting: Send + Sync {
    fn react(&self, victim: &mut PlayerScope<'_>, attack: &Attack, card: Card) -> Result<Reaction>;
}

/// Treasure whose value depends on the game state.
pub trait Valued: Send + Sync {
    fn value(&self, scope: &PlayerScope<'_>, card: Card) -> u32;
}

/// Card that may be bought for more than its cost.
pub trait Overpaid: Send + Sync {
    /// What overpaying does, completing "overpay for it in order to".
    /// `whose` is "your" when addressing the buyer, "their" otherwise.
    fn describe(&self, whose: &str) -> String;

    /// Resolve an overpayment of `amount` coins, `amount > 0`.
    fn overpay(&self, buyer: &mut PlayerScope<'_>, card: Card, amount: u32) -> Result<()>;
}

/// Victory card whose points depend on the owner's cards.
pub trait Scored: Send + Sync {
    fn points(&self, player: &Player) -> i32;
}
