//! Card registry: definitions plus behaviour, looked up by kind.
//!
//! Expansions fill a `CardRegistry` while the game is being built; after
//! that it is frozen behind an `Arc` and shared by every player scope and
//! attack task.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use super::traits::{Attacking, Overpaid, Playable, Reacting, Scored, Valued};
use super::types::CardType;
use crate::core::{EngineError, Result};

/// One registered kind: its static data and whichever capabilities it has.
#[derive(Clone)]
pub struct CardEntry {
    pub definition: CardDefinition,
    playable: Option<Arc<dyn Playable>>,
    attacking: Option<Arc<dyn Attacking>>,
    reacting: Option<Arc<dyn Reacting>>,
    valued: Option<Arc<dyn Valued>>,
    scored: Option<Arc<dyn Scored>>,
    overpaid: Option<Arc<dyn Overpaid>>,
}

impl CardEntry {
    #[must_use]
    pub fn new(definition: CardDefinition) -> Self {
        Self {
            definition,
            playable: None,
            attacking: None,
            reacting: None,
            valued: None,
            scored: None,
            overpaid: None,
        }
    }

    #[must_use]
    pub fn with_play(mut self, playable: impl Playable + 'static) -> Self {
        self.playable = Some(Arc::new(playable));
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attacking: impl Attacking + 'static) -> Self {
        self.attacking = Some(Arc::new(attacking));
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reacting: impl Reacting + 'static) -> Self {
        self.reacting = Some(Arc::new(reacting));
        self
    }

    #[must_use]
    pub fn with_value(mut self, valued: impl Valued + 'static) -> Self {
        self.valued = Some(Arc::new(valued));
        self
    }

    #[must_use]
    pub fn with_score(mut self, scored: impl Scored + 'static) -> Self {
        self.scored = Some(Arc::new(scored));
        self
    }

    #[must_use]
    pub fn with_overpay(mut self, overpaid: impl Overpaid + 'static) -> Self {
        self.overpaid = Some(Arc::new(overpaid));
        self
    }

    pub fn playable(&self) -> Option<Arc<dyn Playable>> {
        self.playable.clone()
    }

    pub fn attacking(&self) -> Option<Arc<dyn Attacking>> {
        self.attacking.clone()
    }

    pub fn reacting(&self) -> Option<Arc<dyn Reacting>> {
        self.reacting.clone()
    }

    pub fn valued(&self) -> Option<&dyn Valued> {
        self.valued.as_deref()
    }

    pub fn scored(&self) -> Option<&dyn Scored> {
        self.scored.as_deref()
    }

    pub fn overpaid(&self) -> Option<Arc<dyn Overpaid>> {
        self.overpaid.clone()
    }
}

impl fmt::Debug for CardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardEntry")
            .field("definition", &self.definition)
            .field("playable", &self.playable.is_some())
            .field("attacking", &self.attacking.is_some())
            .field("reacting", &self.reacting.is_some())
            .field("valued", &self.valued.is_some())
            .field("scored", &self.scored.is_some())
            .field("overpaid", &self.overpaid.is_some())
            .finish()
    }
}

/// Registry of card kinds.
///
/// ```
/// use dominion_engine::cards::{CardDefinition, CardEntry, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardEntry::new(CardDefinition::treasure(CardId::new(1), "Copper", 0, 1)))
///     .unwrap();
///
/// assert_eq!(registry.by_name("Copper"), Some(CardId::new(1)));
/// assert_eq!(registry.name(CardId::new(1)), "Copper");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardEntry>,
    by_name: FxHashMap<String, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind. Ids and names must both be unique.
    pub fn register(&mut self, entry: CardEntry) -> Result<()> {
        let id = entry.definition.id;
        if self.cards.contains_key(&id) || self.by_name.contains_key(&entry.definition.name) {
            return Err(EngineError::DuplicateCard(id));
        }
        self.by_name.insert(entry.definition.name.clone(), id);
        self.cards.insert(id, entry);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardEntry> {
        self.cards.get(&id)
    }

    /// Definition of a kind that must exist.
    pub fn definition(&self, id: CardId) -> Result<&CardDefinition> {
        self.cards
            .get(&id)
            .map(|entry| &entry.definition)
            .ok_or(EngineError::UnknownCard(id))
    }

    /// Display name, for messages. Unregistered kinds render as their id.
    #[must_use]
    pub fn name(&self, id: CardId) -> String {
        self.cards
            .get(&id)
            .map_or_else(|| id.to_string(), |entry| entry.definition.name.clone())
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Does a registered kind carry this type tag? Unknown kinds do not.
    #[must_use]
    pub fn is(&self, id: CardId, card_type: CardType) -> bool {
        self.cards
            .get(&id)
            .is_some_and(|entry| entry.definition.is(card_type))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardEntry> {
        self.cards.values()
    }

    /// Kinds carrying a type tag, in no particular order.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.find(move |def| def.is(card_type))
    }

    /// Kinds matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards
            .values()
            .map(|entry| &entry.definition)
            .filter(move |def| predicate(def))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ActionBonus;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry
            .register(CardEntry::new(CardDefinition::treasure(CardId::new(1), "Copper", 0, 1)))
            .unwrap();
        registry
            .register(CardEntry::new(CardDefinition::action(
                CardId::new(2),
                "Smithy",
                4,
                ActionBonus::new().cards(3),
            )))
            .unwrap();
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.definition(CardId::new(2)).unwrap().cost, 4);
        assert!(matches!(
            registry.definition(CardId::new(99)),
            Err(EngineError::UnknownCard(_))
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = registry();
        let again = CardEntry::new(CardDefinition::treasure(CardId::new(1), "Copper", 0, 1));
        assert!(matches!(registry.register(again), Err(EngineError::DuplicateCard(_))));

        let same_name = CardEntry::new(CardDefinition::treasure(CardId::new(5), "Copper", 0, 1));
        assert!(registry.register(same_name).is_err());
    }

    #[test]
    fn test_find_by_type() {
        let registry = registry();
        let actions: Vec<_> = registry.find_by_type(CardType::Action).map(|d| d.name.as_str()).collect();
        assert_eq!(actions, vec!["Smithy"]);
        assert!(registry.is(CardId::new(1), CardType::Treasure));
        assert!(!registry.is(CardId::new(9), CardType::Treasure));
    }

    #[test]
    fn test_entry_without_capabilities() {
        let registry = registry();
        let smithy = registry.get(CardId::new(2)).unwrap();
        assert!(smithy.playable().is_none());
        assert!(smithy.attacking().is_none());
        assert_eq!(registry.name(CardId::new(77)), "Card(77)");
    }
}
