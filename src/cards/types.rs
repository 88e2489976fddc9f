//! Card type tags.
//!
//! The set of types is closed: every card is some combination of the six
//! tags below. A card's behaviour comes from the capability traits it
//! registers, not from the tags; the tags drive eligibility checks such as
//! "choose an Action card from your hand".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
    Treasure,
    Victory,
    Curse,
    Action,
    Reaction,
    Attack,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Treasure => "Treasure",
            Self::Victory => "Victory",
            Self::Curse => "Curse",
            Self::Action => "Action",
            Self::Reaction => "Reaction",
            Self::Attack => "Attack",
        };
        f.write_str(name)
    }
}

/// Small ordered set of type tags. No card carries more than three.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTypes(SmallVec<[CardType; 3]>);

impl CardTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, ignoring duplicates.
    pub fn insert(&mut self, card_type: CardType) {
        if !self.0.contains(&card_type) {
            self.0.push(card_type);
        }
    }

    #[must_use]
    pub fn contains(&self, card_type: CardType) -> bool {
        self.0.contains(&card_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = CardType> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[CardType; N]> for CardTypes {
    fn from(types: [CardType; N]) -> Self {
        types.into_iter().collect()
    }
}

impl FromIterator<CardType> for CardTypes {
    fn from_iter<I: IntoIterator<Item = CardType>>(iter: I) -> Self {
        let mut types = Self::new();
        for card_type in iter {
            types.insert(card_type);
        }
        types
    }
}

impl std::fmt::Display for CardTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&names.join(" - "))
    }
}
