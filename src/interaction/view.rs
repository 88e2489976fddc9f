//! Read-only snapshots handed to adapters and external displays.
//!
//! Views are plain data: holding one never borrows the game, and they
//! serialize for whatever transport sits in front of the engine.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardRegistry, CardType, CardTypes};
use crate::core::{EntityId, Result};

/// One physical card, as shown to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: EntityId,
    pub kind: CardId,
    pub name: String,
    pub types: CardTypes,
    pub cost: u32,
}

impl CardView {
    pub fn of(card: &Card, registry: &CardRegistry) -> Result<Self> {
        let def = registry.definition(card.kind)?;
        Ok(Self {
            id: card.id,
            kind: card.kind,
            name: def.name.clone(),
            types: def.types.clone(),
            cost: def.cost,
        })
    }

    pub fn list<'a>(cards: impl IntoIterator<Item = &'a Card>, registry: &CardRegistry) -> Result<Vec<Self>> {
        cards.into_iter().map(|card| Self::of(card, registry)).collect()
    }

    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.types.contains(card_type)
    }
}

/// One pile of a kind: a Supply stack or a trash heap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackView {
    pub kind: CardId,
    pub name: String,
    pub types: CardTypes,
    /// Current cost, after modifiers.
    pub cost: u32,
    pub base_cost: u32,
    /// Cards left; `None` for unlimited piles.
    pub remaining: Option<u32>,
}

impl StackView {
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.types.contains(card_type)
    }
}

/// What a player may see of their own mat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub deck_size: usize,
    pub hand: Vec<CardView>,
    pub discard: Vec<CardView>,
    pub played: Vec<CardView>,
    pub set_aside: Vec<CardView>,
    pub coffers: u32,
    pub turns_played: u32,
}

/// Running totals of the turn in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub player: String,
    pub phase: String,
    pub actions: u32,
    pub buys: u32,
    pub coins: u32,
    /// The active player's Coffers tokens.
    pub coffers: u32,
}
