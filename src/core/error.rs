//! Engine error type.
//!
//! Exhaustion (an empty Supply pile, an empty deck) is an ordinary game
//! state: only `StackEmpty` represents it here, and the gain operations
//! absorb it. Every other variant is a broken invariant and is returned to
//! the caller unrecovered.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::rules::Phase;
use crate::zones::Zone;

/// Result alias used across the engine.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the {name} pile is empty")]
    StackEmpty { kind: CardId, name: String },

    #[error("no Supply pile for card kind {0}")]
    UnknownStack(CardId),

    #[error("card kind {0} is not registered")]
    UnknownCard(CardId),

    #[error("card kind {0} registered twice")]
    DuplicateCard(CardId),

    #[error("card {card} is not in {zone}")]
    CardNotInZone { card: EntityId, zone: Zone },

    #[error("malformed Supply: {0}")]
    MalformedSupply(String),

    #[error("kingdom selection failed: {0}")]
    KingdomSelection(String),

    #[error("unsupported player count {0} (2 to 6 players)")]
    PlayerCount(usize),

    #[error("no turn is in progress")]
    NoActiveTurn,

    #[error("expected {expected} phase, turn is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("cannot move from {from} phase to {to}")]
    PhaseOrder { from: Phase, to: Phase },

    #[error("{player} cannot play that card: {reason}")]
    CannotPlay { player: PlayerId, reason: String },

    #[error("{player} cannot buy that card: {reason}")]
    CannotBuy { player: PlayerId, reason: String },

    #[error("invalid choice from {player}: {reason}")]
    InvalidChoice { player: String, reason: String },

    #[error("no game in room {0}")]
    UnknownRoom(String),

    #[error("room {0} already has a game")]
    DuplicateRoom(String),
}

impl EngineError {
    /// True for the exhaustion condition callers are expected to absorb.
    #[must_use]
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, Self::StackEmpty { .. })
    }
}
