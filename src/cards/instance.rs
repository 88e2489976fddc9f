//! Physical cards.
//!
//! A `Card` pairs an instance id with its kind. Cards in the Supply or the
//! trash have no owner; a card gets an owner the moment a player gains it
//! and loses it again when it is trashed or returned.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::{EntityId, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Instance identity; zones look cards up by this.
    pub id: EntityId,

    /// What kind of card this is.
    pub kind: CardId,

    /// Player whose effects this card resolves against. `None` while the
    /// card sits in the Supply or the trash.
    pub owner: Option<PlayerId>,
}

impl Card {
    /// Create an unowned card.
    #[must_use]
    pub const fn new(id: EntityId, kind: CardId) -> Self {
        Self {
            id,
            kind,
            owner: None,
        }
    }

    /// Set the owner (builder pattern).
    #[must_use]
    pub const fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Is this card in flight or in a shared pile?
    #[must_use]
    pub const fn is_orphaned(&self) -> bool {
        self.owner.is_none()
    }
}
