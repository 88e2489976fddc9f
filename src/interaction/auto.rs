//! A deterministic bot for simulations and tests.
//!
//! Plays Big Money with light action support: it plays its most expensive
//! Action, buys the most expensive thing it can afford (skipping Curse,
//! Copper and the cheaper Victory cards), and when made to part with cards
//! gives up Curses and Victory cards first.

use crate::cards::{CardId, CardType};
use crate::core::EntityId;

use super::{CardView, Interaction, StackView};

/// Victory cards cheaper than this are never bought voluntarily.
const VICTORY_BUY_THRESHOLD: u32 = 8;

#[derive(Clone, Debug, Default)]
pub struct AutoInteraction {
    messages: Vec<String>,
    keep_messages: bool,
}

impl AutoInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every received message for later inspection.
    #[must_use]
    pub fn recording() -> Self {
        Self {
            messages: Vec::new(),
            keep_messages: true,
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn junk_rank(view: &CardView) -> (u8, u32) {
        let tier = if view.is(CardType::Curse) {
            0
        } else if view.is(CardType::Victory) && !view.is(CardType::Action) && !view.is(CardType::Treasure) {
            1
        } else {
            2
        };
        (tier, view.cost)
    }

    fn wanted(view: &StackView) -> bool {
        if view.is(CardType::Curse) || view.remaining == Some(0) {
            return false;
        }
        if view.is(CardType::Victory) && !view.is(CardType::Action) {
            return view.cost >= VICTORY_BUY_THRESHOLD;
        }
        // Copper is the only Treasure that costs nothing.
        !(view.is(CardType::Treasure) && view.cost == 0)
    }
}

/// First of the maximal elements, so ties go to the earlier option.
fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().rev().max_by_key(|item| key(item))
}

fn first_min_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().min_by_key(|item| key(item))
}

impl Interaction for AutoInteraction {
    fn send(&mut self, message: &str) {
        if self.keep_messages {
            self.messages.push(message.to_owned());
        }
    }

    fn choose_card_from_hand(&mut self, _prompt: &str, options: &[CardView], force: bool) -> Option<EntityId> {
        let actions: Vec<&CardView> = options
            .iter()
            .filter(|view| view.is(CardType::Action) || view.is(CardType::Reaction))
            .collect();
        if let Some(best) = first_max_by_key(&actions, |view| view.cost) {
            return Some(best.id);
        }
        if let Some(curse) = options.iter().find(|view| view.is(CardType::Curse)) {
            return Some(curse.id);
        }
        if !force {
            return None;
        }
        first_min_by_key(options, Self::junk_rank).map(|view| view.id)
    }

    fn choose_cards_from_hand(
        &mut self,
        _prompt: &str,
        options: &[CardView],
        force: bool,
        max_count: Option<usize>,
    ) -> Vec<EntityId> {
        let limit = max_count.unwrap_or(options.len());
        let mut ranked: Vec<&CardView> = options.iter().collect();
        ranked.sort_by_key(|view| Self::junk_rank(view));

        let mut picked: Vec<EntityId> = ranked
            .iter()
            .filter(|view| Self::junk_rank(view).0 < 2)
            .take(limit)
            .map(|view| view.id)
            .collect();
        if force {
            // A forced choice with a limit means "exactly that many".
            let target = max_count.unwrap_or(1).min(options.len());
            for view in &ranked {
                if picked.len() >= target {
                    break;
                }
                if !picked.contains(&view.id) {
                    picked.push(view.id);
                }
            }
        }
        picked
    }

    fn choose_kind_from_supply(&mut self, _prompt: &str, options: &[StackView], force: bool) -> Option<CardId> {
        let wanted: Vec<&StackView> = options.iter().filter(|view| Self::wanted(view)).collect();
        if let Some(best) = first_max_by_key(&wanted, |view| view.cost) {
            return Some(best.kind);
        }
        if !force {
            return None;
        }
        first_max_by_key(options, |view| (!view.is(CardType::Curse), view.cost)).map(|view| view.kind)
    }

    fn yes_or_no(&mut self, _prompt: &str) -> bool {
        true
    }

    fn from_range(&mut self, _prompt: &str, _min: i64, max: i64, _force: bool) -> Option<i64> {
        Some(max)
    }

    fn from_options(&mut self, _prompt: &str, options: &[String], _force: bool) -> Option<usize> {
        (!options.is_empty()).then_some(0)
    }
}
