//! A player's card zones.
//!
//! The deck's top is the *end* of its `Vec`, so drawing is a `pop`. Hand,
//! discard pile and play area keep insertion order; their top is also the
//! end.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{EngineError, EntityId, GameRng, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    Played,
    /// Cards held off the mat proper until an effect returns them.
    SetAside,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Deck, Zone::Hand, Zone::Discard, Zone::Played, Zone::SetAside];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Deck => "deck",
            Self::Hand => "hand",
            Self::Discard => "discard pile",
            Self::Played => "play area",
            Self::SetAside => "set-aside cards",
        };
        f.write_str(name)
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// On top (drawn next, for the deck).
    #[default]
    Top,
    /// Underneath everything.
    Bottom,
    /// At an index counted from the bottom, clamped to the zone length.
    Index(usize),
}

/// Result of drawing from the deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draw {
    /// Cards moved to the hand, in draw order.
    pub cards: Vec<Card>,
    /// Whether the discard pile was shuffled to refill the deck.
    pub shuffled: bool,
}

/// Deck, hand, discard pile and play area of one player.
///
/// ```
/// use dominion_engine::cards::{Card, CardId};
/// use dominion_engine::core::{EntityId, GameRng};
/// use dominion_engine::zones::{PlayerMat, Zone};
///
/// let mut mat = PlayerMat::new();
/// for i in 0..3 {
///     mat.push(Zone::Discard, Card::new(EntityId::new(i), CardId::new(1)));
/// }
///
/// let mut rng = GameRng::new(1);
/// let draw = mat.draw(5, &mut rng);
///
/// assert!(draw.shuffled);
/// assert_eq!(draw.cards.len(), 3);
/// assert_eq!(mat.count(Zone::Hand), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMat {
    deck: Vec<Card>,
    hand: Vec<Card>,
    discard: Vec<Card>,
    played: Vec<Card>,
    set_aside: Vec<Card>,
}

impl PlayerMat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in a zone, bottom first.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &[Card] {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard,
            Zone::Played => &self.played,
            Zone::SetAside => &self.set_aside,
        }
    }

    /// Direct access to a zone, for effects that reorder cards.
    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vec<Card> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Discard => &mut self.discard,
            Zone::Played => &mut self.played,
            Zone::SetAside => &mut self.set_aside,
        }
    }

    #[must_use]
    pub fn count(&self, zone: Zone) -> usize {
        self.zone(zone).len()
    }

    /// Put a card on top of a zone.
    pub fn push(&mut self, zone: Zone, card: Card) {
        self.put(zone, card, ZonePosition::Top);
    }

    /// Put a card into a zone at a position.
    pub fn put(&mut self, zone: Zone, card: Card, position: ZonePosition) {
        let cards = self.zone_mut(zone);
        match position {
            ZonePosition::Top => cards.push(card),
            ZonePosition::Bottom => cards.insert(0, card),
            ZonePosition::Index(i) => {
                let idx = i.min(cards.len());
                cards.insert(idx, card);
            }
        }
    }

    /// Remove a specific card from a zone.
    ///
    /// A missing card means an effect lost track of where a card is; it is
    /// reported as `CardNotInZone`, never ignored.
    pub fn remove(&mut self, zone: Zone, id: EntityId) -> Result<Card> {
        let cards = self.zone_mut(zone);
        let index = cards
            .iter()
            .position(|card| card.id == id)
            .ok_or(EngineError::CardNotInZone { card: id, zone })?;
        Ok(cards.remove(index))
    }

    /// Move a specific card between zones.
    pub fn move_card(&mut self, id: EntityId, from: Zone, to: Zone, position: ZonePosition) -> Result<Card> {
        let card = self.remove(from, id)?;
        self.put(to, card, position);
        Ok(card)
    }

    #[must_use]
    pub fn contains(&self, zone: Zone, id: EntityId) -> bool {
        self.zone(zone).iter().any(|card| card.id == id)
    }

    /// Find a card anywhere on the mat.
    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<(Zone, Card)> {
        Zone::ALL.into_iter().find_map(|zone| {
            self.zone(zone)
                .iter()
                .find(|card| card.id == id)
                .map(|card| (zone, *card))
        })
    }

    /// Empty a zone, returning its cards bottom first.
    pub fn drain(&mut self, zone: Zone) -> Vec<Card> {
        std::mem::take(self.zone_mut(zone))
    }

    /// Shuffle the discard pile and place it under the deck.
    pub fn shuffle_discard_into_deck(&mut self, rng: &mut GameRng) {
        let mut refill = std::mem::take(&mut self.discard);
        rng.shuffle(&mut refill);
        refill.append(&mut self.deck);
        self.deck = refill;
    }

    pub fn shuffle_deck(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.deck);
    }

    /// Take the top card of the deck, reshuffling the discard pile first if
    /// the deck is empty. `None` when both are empty.
    pub fn take_from_deck(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.deck.is_empty() && !self.discard.is_empty() {
            self.shuffle_discard_into_deck(rng);
        }
        self.deck.pop()
    }

    /// Draw up to `n` cards into the hand.
    ///
    /// The discard pile is shuffled in at most once: after a refill it is
    /// empty, so a second exhaustion simply ends the draw short.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> Draw {
        let mut draw = Draw::default();
        for _ in 0..n {
            if self.deck.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.shuffle_discard_into_deck(rng);
                draw.shuffled = true;
            }
            match self.deck.pop() {
                Some(card) => {
                    self.hand.push(card);
                    draw.cards.push(card);
                }
                None => break,
            }
        }
        draw
    }

    /// Every card on the mat.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        Zone::ALL.into_iter().flat_map(move |zone| self.zone(zone).iter())
    }

    /// Total cards on the mat.
    #[must_use]
    pub fn len(&self) -> usize {
        Zone::ALL.into_iter().map(|zone| self.count(zone)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies of a kind across all zones.
    #[must_use]
    pub fn count_kind(&self, kind: CardId) -> usize {
        self.all_cards().filter(|card| card.kind == kind).count()
    }
}
