//! The Supply: one stack per card kind, the trash, and cost modifiers.
//!
//! ## Key Types
//!
//! - `Supply`: stacks, trash and the card-id allocator for the game
//! - `SupplyStack` / `StackSize`: one pile and its cost state
//! - `KingdomPolicy`: how the ten kingdom piles are chosen
//!
//! Every physical card is minted here, either when drawn from a stack or
//! by `mint` for cards that exist outside the stacks (starting decks).
//! Together with the trash this makes the Supply the bookkeeper for the
//! fixed per-kind population of the game.

pub mod stack;
pub mod kingdom;

pub use stack::{StackSize, SupplyStack};
pub use kingdom::{FixedKingdom, KingdomPolicy, RandomKingdom, KINGDOM_SIZE};

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardId, CardRegistry};
use crate::core::{EngineError, EntityAllocator, Result};
use crate::interaction::StackView;

#[derive(Debug)]
pub struct Supply {
    registry: Arc<CardRegistry>,
    stacks: FxHashMap<CardId, SupplyStack>,
    /// Display order: by cost, then name.
    order: Vec<CardId>,
    kingdom: Vec<CardId>,
    /// Named roles some piles play, like a Bane.
    roles: FxHashMap<CardId, &'static str>,
    trash: FxHashMap<CardId, Vec<Card>>,
    minted: FxHashMap<CardId, u32>,
    ids: EntityAllocator,
}

impl Supply {
    #[must_use]
    pub fn new(registry: Arc<CardRegistry>) -> Self {
        Self {
            registry,
            stacks: FxHashMap::default(),
            order: Vec::new(),
            kingdom: Vec::new(),
            roles: FxHashMap::default(),
            trash: FxHashMap::default(),
            minted: FxHashMap::default(),
            ids: EntityAllocator::default(),
        }
    }

    /// Add a basic pile.
    pub fn add_stack(&mut self, kind: CardId, size: StackSize) -> Result<()> {
        let def = self.registry.definition(kind)?;
        if self.stacks.contains_key(&kind) {
            return Err(EngineError::MalformedSupply(format!(
                "two piles of {}",
                def.name
            )));
        }
        let stack = SupplyStack::new(kind, size, def.cost);
        let key = (def.cost, def.name.clone());
        let index = self
            .order
            .iter()
            .position(|other| {
                self.registry
                    .get(*other)
                    .is_some_and(|o| (o.definition.cost, o.definition.name.clone()) > key)
            })
            .unwrap_or(self.order.len());
        self.order.insert(index, kind);
        self.stacks.insert(kind, stack);
        Ok(())
    }

    /// Add a kingdom pile.
    pub fn add_kingdom_stack(&mut self, kind: CardId, size: StackSize) -> Result<()> {
        self.add_stack(kind, size)?;
        self.kingdom.push(kind);
        Ok(())
    }

    /// Mark an existing pile as playing a named role.
    pub fn assign_role(&mut self, kind: CardId, role: &'static str) -> Result<()> {
        if !self.stacks.contains_key(&kind) {
            return Err(EngineError::UnknownStack(kind));
        }
        self.roles.insert(kind, role);
        Ok(())
    }

    #[must_use]
    pub fn role(&self, kind: CardId) -> Option<&'static str> {
        self.roles.get(&kind).copied()
    }

    #[must_use]
    pub fn kind_with_role(&self, role: &str) -> Option<CardId> {
        self.order
            .iter()
            .copied()
            .find(|kind| self.roles.get(kind).is_some_and(|assigned| *assigned == role))
    }

    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    /// Take one card of `kind` from its pile.
    ///
    /// An exhausted finite pile yields `StackEmpty`; gain operations turn
    /// that into a "could not gain" message.
    pub fn draw(&mut self, kind: CardId) -> Result<Card> {
        let stack = self
            .stacks
            .get_mut(&kind)
            .ok_or(EngineError::UnknownStack(kind))?;
        if !stack.take() {
            return Err(EngineError::StackEmpty {
                kind,
                name: self.registry.name(kind),
            });
        }
        Ok(Card::new(self.ids.next_id(), kind))
    }

    /// Create a card outside the piles. It still counts toward the kind's
    /// population.
    pub fn mint(&mut self, kind: CardId) -> Result<Card> {
        if !self.registry.contains(kind) {
            return Err(EngineError::UnknownCard(kind));
        }
        *self.minted.entry(kind).or_default() += 1;
        Ok(Card::new(self.ids.next_id(), kind))
    }

    /// Put a card back into its pile, dropping the instance.
    pub fn return_card(&mut self, card: Card) -> Result<()> {
        let stack = self
            .stacks
            .get_mut(&card.kind)
            .ok_or(EngineError::UnknownStack(card.kind))?;
        stack.put_back();
        Ok(())
    }

    pub fn trash(&mut self, mut card: Card) {
        card.owner = None;
        self.trash.entry(card.kind).or_default().push(card);
    }

    /// Take the most recently trashed card of a kind.
    pub fn take_from_trash(&mut self, kind: CardId) -> Option<Card> {
        self.trash.get_mut(&kind).and_then(Vec::pop)
    }

    #[must_use]
    pub fn trash_count(&self, kind: CardId) -> usize {
        self.trash.get(&kind).map_or(0, Vec::len)
    }

    /// Every trashed card.
    pub fn trashed(&self) -> impl Iterator<Item = &Card> {
        self.trash.values().flatten()
    }

    /// Adjust a pile's cost, clamped at zero. Returns the new cost.
    pub fn modify_cost(&mut self, kind: CardId, delta: i32) -> Result<u32> {
        let stack = self
            .stacks
            .get_mut(&kind)
            .ok_or(EngineError::UnknownStack(kind))?;
        Ok(stack.modify_cost(delta))
    }

    /// Adjust every pile's cost.
    pub fn modify_all_costs(&mut self, delta: i32) {
        for stack in self.stacks.values_mut() {
            stack.modify_cost(delta);
        }
    }

    /// Restore every pile to its base cost.
    pub fn reset_costs(&mut self) {
        for stack in self.stacks.values_mut() {
            stack.reset_cost();
        }
    }

    pub fn cost(&self, kind: CardId) -> Result<u32> {
        self.stacks
            .get(&kind)
            .map(SupplyStack::cost)
            .ok_or(EngineError::UnknownStack(kind))
    }

    #[must_use]
    pub fn stack(&self, kind: CardId) -> Option<&SupplyStack> {
        self.stacks.get(&kind)
    }

    #[must_use]
    pub fn contains(&self, kind: CardId) -> bool {
        self.stacks.contains_key(&kind)
    }

    /// True only for an existing, exhausted pile.
    #[must_use]
    pub fn is_empty(&self, kind: CardId) -> bool {
        self.stacks.get(&kind).is_some_and(SupplyStack::is_empty)
    }

    #[must_use]
    pub fn remaining(&self, kind: CardId) -> Option<StackSize> {
        self.stacks.get(&kind).map(SupplyStack::remaining)
    }

    #[must_use]
    pub fn num_empty_stacks(&self) -> usize {
        self.stacks.values().filter(|stack| stack.is_empty()).count()
    }

    /// Kinds in display order.
    #[must_use]
    pub fn kinds(&self) -> &[CardId] {
        &self.order
    }

    /// Kingdom kinds, in the order they were added.
    #[must_use]
    pub fn kingdom(&self) -> &[CardId] {
        &self.kingdom
    }

    /// Non-empty piles costing at most `max_cost` right now.
    #[must_use]
    pub fn affordable(&self, max_cost: u32) -> Vec<CardId> {
        self.order
            .iter()
            .filter(|kind| {
                self.stacks
                    .get(kind)
                    .is_some_and(|stack| !stack.is_empty() && stack.cost() <= max_cost)
            })
            .copied()
            .collect()
    }

    /// Fixed number of cards of a finite kind in the game: its pile's
    /// starting size plus every copy minted outside it. `None` for kinds
    /// with unlimited piles.
    #[must_use]
    pub fn population(&self, kind: CardId) -> Option<u32> {
        let minted = self.minted.get(&kind).copied().unwrap_or(0);
        match self.stacks.get(&kind).map(SupplyStack::initial) {
            Some(StackSize::Unlimited) => None,
            Some(StackSize::Finite(n)) => Some(n + minted),
            None => Some(minted),
        }
    }

    /// Every pile, in display order.
    pub fn snapshot(&self) -> Vec<StackView> {
        self.order
            .iter()
            .filter_map(|kind| {
                let stack = self.stacks.get(kind)?;
                let def = &self.registry.get(*kind)?.definition;
                Some(StackView {
                    kind: *kind,
                    name: def.name.clone(),
                    types: def.types.clone(),
                    cost: stack.cost(),
                    base_cost: stack.base_cost(),
                    remaining: stack.remaining().count(),
                })
            })
            .collect()
    }

    /// Trash contents grouped by kind, sorted by name.
    pub fn trash_snapshot(&self) -> Vec<StackView> {
        let mut views: Vec<StackView> = self
            .trash
            .iter()
            .filter(|(_, cards)| !cards.is_empty())
            .filter_map(|(kind, cards)| {
                let def = &self.registry.get(*kind)?.definition;
                Some(StackView {
                    kind: *kind,
                    name: def.name.clone(),
                    types: def.types.clone(),
                    cost: def.cost,
                    base_cost: def.cost,
                    remaining: u32::try_from(cards.len()).ok(),
                })
            })
            .collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));
        views
    }
}
