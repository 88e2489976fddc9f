//! The decision boundary between the engine and whoever plays.
//!
//! ## Key Types
//!
//! - `Interaction`: one player's adapter (terminal, network, bot)
//! - `AutoInteraction`: deterministic heuristic bot
//! - `CardView` / `StackView` / `PlayerView` / `TurnView`: read-only views
//!
//! The engine does the filtering. An adapter only ever sees candidates that
//! are legal for the current question, and whatever it returns is checked
//! against the candidates it was given before the engine acts on it.

pub mod auto;
pub mod view;

pub use auto::AutoInteraction;
pub use view::{CardView, PlayerView, StackView, TurnView};

use crate::cards::{CardId, CardType};
use crate::core::EntityId;

/// One player's source of decisions.
///
/// Every method may block. A `force = false` question may be answered with
/// `None` (skip); a forced one must pick something unless `options` is
/// empty.
pub trait Interaction: Send {
    /// Deliver a message to this player only.
    fn send(&mut self, message: &str);

    fn choose_card_from_hand(&mut self, prompt: &str, options: &[CardView], force: bool) -> Option<EntityId>;

    /// Pick several cards at once. `max_count` caps the selection.
    fn choose_cards_from_hand(
        &mut self,
        prompt: &str,
        options: &[CardView],
        force: bool,
        max_count: Option<usize>,
    ) -> Vec<EntityId>;

    /// Pick which Treasures to play and in what order.
    fn choose_treasures(&mut self, prompt: &str, options: &[CardView]) -> Vec<EntityId> {
        let _ = prompt;
        options.iter().map(|view| view.id).collect()
    }

    fn choose_kind_from_supply(&mut self, prompt: &str, options: &[StackView], force: bool) -> Option<CardId>;

    fn choose_type_from_hand(
        &mut self,
        prompt: &str,
        options: &[CardView],
        card_type: CardType,
        force: bool,
    ) -> Option<EntityId> {
        let matching: Vec<CardView> = options.iter().filter(|view| view.is(card_type)).cloned().collect();
        self.choose_card_from_hand(prompt, &matching, force)
    }

    fn choose_type_from_supply(
        &mut self,
        prompt: &str,
        options: &[StackView],
        card_type: CardType,
        force: bool,
    ) -> Option<CardId> {
        let matching: Vec<StackView> = options.iter().filter(|view| view.is(card_type)).cloned().collect();
        self.choose_kind_from_supply(prompt, &matching, force)
    }

    /// Trash piles are shown as stacks, one per kind.
    fn choose_type_from_trash(
        &mut self,
        prompt: &str,
        options: &[StackView],
        card_type: CardType,
        force: bool,
    ) -> Option<CardId> {
        self.choose_type_from_supply(prompt, options, card_type, force)
    }

    fn yes_or_no(&mut self, prompt: &str) -> bool;

    fn from_range(&mut self, prompt: &str, min: i64, max: i64, force: bool) -> Option<i64>;

    /// Pick one of `options` by index.
    fn from_options(&mut self, prompt: &str, options: &[String], force: bool) -> Option<usize>;
}
