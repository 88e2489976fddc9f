//! Card definitions - static card data.
//!
//! `CardDefinition` holds what every copy of a kind shares: name, printed
//! cost, type tags, treasure value, victory points and the static bonuses an
//! Action grants before its effect runs. Anything that depends on game state
//! (Gardens' points, Bank's value) is supplied by a capability trait instead.

use serde::{Deserialize, Serialize};

use super::types::{CardType, CardTypes};

/// Identifier of a card *kind* ("Village"), not of a physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// "+N Cards, +N Actions, +N Buys, +N coins" printed above an Action's text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionBonus {
    pub cards: u32,
    pub actions: u32,
    pub buys: u32,
    pub coins: u32,
}

impl ActionBonus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: 0,
            actions: 0,
            buys: 0,
            coins: 0,
        }
    }

    #[must_use]
    pub const fn cards(mut self, cards: u32) -> Self {
        self.cards = cards;
        self
    }

    #[must_use]
    pub const fn actions(mut self, actions: u32) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub const fn buys(mut self, buys: u32) -> Self {
        self.buys = buys;
        self
    }

    #[must_use]
    pub const fn coins(mut self, coins: u32) -> Self {
        self.coins = coins;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Static card definition.
///
/// ```
/// use dominion_engine::cards::{ActionBonus, CardDefinition, CardId, CardType};
///
/// let village = CardDefinition::new(CardId::new(1), "Village", 3)
///     .with_type(CardType::Action)
///     .with_bonus(ActionBonus::new().cards(1).actions(2));
///
/// assert!(village.is(CardType::Action));
/// assert_eq!(village.bonus.actions, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    /// Printed cost in coins.
    pub cost: u32,
    pub types: CardTypes,
    /// Coins produced when played as a Treasure.
    pub value: Option<u32>,
    /// Victory points (negative for Curses).
    pub points: Option<i32>,
    pub bonus: ActionBonus,
    pub description: String,
}

impl CardDefinition {
    /// Create a new card definition with no types.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            types: CardTypes::new(),
            value: None,
            points: None,
            bonus: ActionBonus::default(),
            description: String::new(),
        }
    }

    /// Shorthand for a Treasure worth `value` coins.
    #[must_use]
    pub fn treasure(id: CardId, name: impl Into<String>, cost: u32, value: u32) -> Self {
        Self::new(id, name, cost)
            .with_type(CardType::Treasure)
            .with_value(value)
    }

    /// Shorthand for a Victory card worth `points`.
    #[must_use]
    pub fn victory(id: CardId, name: impl Into<String>, cost: u32, points: i32) -> Self {
        Self::new(id, name, cost)
            .with_type(CardType::Victory)
            .with_points(points)
    }

    /// Shorthand for an Action card.
    #[must_use]
    pub fn action(id: CardId, name: impl Into<String>, cost: u32, bonus: ActionBonus) -> Self {
        Self::new(id, name, cost)
            .with_type(CardType::Action)
            .with_bonus(bonus)
    }

    /// Add a type tag (builder pattern).
    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.types.insert(card_type);
        self
    }

    /// Set the treasure value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    /// Set victory points (builder pattern).
    #[must_use]
    pub fn with_points(mut self, points: i32) -> Self {
        self.points = Some(points);
        self
    }

    /// Set the static Action bonus (builder pattern).
    #[must_use]
    pub fn with_bonus(mut self, bonus: ActionBonus) -> Self {
        self.bonus = bonus;
        self
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Does this kind carry the given type tag?
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.types.contains(card_type)
    }

    /// Does the rules text let the player trash cards?
    #[must_use]
    pub fn trashes(&self) -> bool {
        self.description.to_lowercase().contains("trash")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthands_set_types() {
        let gold = CardDefinition::treasure(CardId::new(3), "Gold", 6, 3);
        assert!(gold.is(CardType::Treasure));
        assert_eq!(gold.value, Some(3));

        let province = CardDefinition::victory(CardId::new(6), "Province", 8, 6);
        assert!(province.is(CardType::Victory));
        assert_eq!(province.points, Some(6));
    }

    #[test]
    fn test_trashes_reads_description() {
        let chapel = CardDefinition::action(CardId::new(10), "Chapel", 2, ActionBonus::new())
            .with_description("Trash up to 4 cards from your hand.");
        let village = CardDefinition::action(CardId::new(11), "Village", 3, ActionBonus::new());

        assert!(chapel.trashes());
        assert!(!village.trashes());
    }

    #[test]
    fn test_bonus_builder() {
        let bonus = ActionBonus::new().cards(1).actions(1).buys(1).coins(1);
        assert!(!bonus.is_empty());
        assert!(ActionBonus::new().is_empty());
        assert_eq!(bonus.coins, 1);
    }
}
