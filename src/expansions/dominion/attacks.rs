//! Attack cards and Moat.

use crate::cards::{Attacking, Card, CardType, Playable, Reacting, Reaction};
use crate::core::Result;
use crate::expansions::base::{COPPER, CURSE, GOLD, SILVER};
use crate::rules::{article, name_list, plural, Attack, Game, PlayerScope};
use crate::zones::Zone;

pub(super) struct Moat;

impl Reacting for Moat {
    fn react(&self, _victim: &mut PlayerScope<'_>, _attack: &Attack, _card: Card) -> Result<Reaction> {
        Ok(Reaction::immunity())
    }
}

pub(super) struct Bureaucrat;

impl Playable for Bureaucrat {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        game.active_scope()?.gain_to(SILVER, Zone::Deck)?;
        Ok(())
    }
}

impl Attacking for Bureaucrat {
    fn attack_effect(&self, attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()> {
        let registry = victim.registry();
        let hand = victim.mat().zone(Zone::Hand).to_vec();
        let victories: Vec<Card> = hand
            .iter()
            .filter(|card| registry.is(card.kind, CardType::Victory))
            .copied()
            .collect();
        let Some(first) = victories.first().copied() else {
            let names: Vec<String> = hand.iter().map(|card| registry.name(card.kind)).collect();
            victim.broadcast(format!(
                "{} revealed a hand with no Victory cards: {}.",
                victim.name(),
                name_list(&names)
            ));
            return Ok(());
        };
        let card = if victories.iter().all(|card| card.kind == first.kind) {
            first
        } else {
            let prompt = format!(
                "{} played a Bureaucrat. Choose a Victory card to put back onto your deck.",
                attack.attacker_name
            );
            victim
                .choose_type_from_hand(&prompt, CardType::Victory, true)?
                .unwrap_or(first)
        };
        let card = victim.mat_mut().remove(Zone::Hand, card.id)?;
        victim.put_on_deck(card);
        victim.broadcast(format!(
            "{} put {} on top of their deck.",
            victim.name(),
            article(&registry.name(card.kind))
        ));
        Ok(())
    }

    fn prompt(&self, _attack: &Attack) -> Option<String> {
        Some("Other players must reveal a Victory card from their hand and put it onto their deck (or reveal a hand with no Victory cards).".into())
    }

    fn allows_simultaneous(&self) -> bool {
        true
    }
}

pub(super) struct Militia;

impl Attacking for Militia {
    fn attack_effect(&self, attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()> {
        let hand = victim.mat().zone(Zone::Hand).to_vec();
        let count = hand.len().saturating_sub(3);
        if count == 0 {
            victim.broadcast(format!(
                "{} only has {} in their hand.",
                victim.name(),
                plural(hand.len() as u32, "card")
            ));
            return Ok(());
        }
        let cards = plural(count as u32, "card");
        victim.broadcast(format!("{} must discard {cards}.", victim.name()));
        let prompt = format!("{} has played a Militia. Choose {cards} to discard.", attack.attacker_name);
        for card in victim.choose_exactly(&prompt, &hand, count)? {
            victim.discard(card.id)?;
        }
        Ok(())
    }

    fn prompt(&self, _attack: &Attack) -> Option<String> {
        Some("Other players must discard down to 3 cards in their hands.".into())
    }

    fn allows_simultaneous(&self) -> bool {
        true
    }
}

pub(super) struct Bandit;

impl Playable for Bandit {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        game.active_scope()?.gain(GOLD)?;
        Ok(())
    }
}

impl Attacking for Bandit {
    fn attack_effect(&self, attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()> {
        let registry = victim.registry();
        let mut trashable: Vec<Card> = Vec::with_capacity(2);
        let mut others: Vec<Card> = Vec::with_capacity(2);
        for _ in 0..2 {
            let Some(card) = victim.take_from_deck() else {
                victim.broadcast(format!("{} has no more cards to draw from.", victim.name()));
                break;
            };
            victim.broadcast(format!("{} revealed {}.", victim.name(), article(&registry.name(card.kind))));
            if registry.is(card.kind, CardType::Treasure) && card.kind != COPPER {
                trashable.push(card);
            } else {
                others.push(card);
            }
        }

        let to_trash = match trashable.as_slice() {
            [] => None,
            [a, b] if a.kind != b.kind => {
                let options = vec![registry.name(a.kind), registry.name(b.kind)];
                let prompt = format!("{} played a Bandit. You must choose a card to trash.", attack.attacker_name);
                let index = victim.from_options(&prompt, &options, true)?.unwrap_or(0);
                Some(if index == 0 { *a } else { *b })
            }
            [first, ..] => Some(*first),
        };
        if let Some(card) = to_trash {
            trashable.retain(|other| other.id != card.id);
            victim.trash_card(card);
        }
        for card in trashable.into_iter().chain(others) {
            victim.broadcast(format!("{} discarded {}.", victim.name(), article(&registry.name(card.kind))));
            victim.discard_card(card)?;
        }
        Ok(())
    }

    fn prompt(&self, _attack: &Attack) -> Option<String> {
        Some("Each other player must reveal the top 2 cards of their deck, trash a revealed Treasure other than Copper, and discard the rest.".into())
    }

    fn allows_simultaneous(&self) -> bool {
        true
    }
}

/// Resolved strictly in turn order: the last Curse goes to the next player.
pub(super) struct Witch;

impl Attacking for Witch {
    fn attack_effect(&self, _attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()> {
        victim.gain(CURSE)?;
        Ok(())
    }

    fn prompt(&self, _attack: &Attack) -> Option<String> {
        Some("Each other player gains a Curse.".into())
    }
}
