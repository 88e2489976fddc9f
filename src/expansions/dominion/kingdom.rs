//! Non-attack kingdom cards.

use crate::cards::{Card, CardType, Playable, Scored};
use crate::core::Result;
use crate::expansions::base::{COPPER, SILVER};
use crate::hooks::{HookScope, Persistence};
use crate::rules::{article, name_list, plural, Game, Player, SupplyFilter};
use crate::zones::{Zone, ZonePosition};

pub(super) struct Cellar;

impl Playable for Cellar {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Cellar. Choose any number of cards from your hand to discard. You will then draw that many cards.";
        let chosen = scope.choose_many_from_hand(prompt, |_| true, false, None)?;
        if chosen.is_empty() {
            scope.broadcast(format!("{} did not discard or draw any cards.", scope.name()));
            return Ok(());
        }
        for card in &chosen {
            scope.discard(card.id)?;
        }
        scope.broadcast(format!("{} discarded {}.", scope.name(), plural(chosen.len() as u32, "card")));
        scope.draw(chosen.len());
        Ok(())
    }
}

pub(super) struct Chapel;

impl Playable for Chapel {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Chapel. You may choose up to 4 cards from your hand to trash.";
        let chosen = scope.choose_many_from_hand(prompt, |_| true, false, Some(4))?;
        if chosen.is_empty() {
            scope.broadcast(format!("{} did not trash any cards.", scope.name()));
        }
        for card in chosen {
            scope.trash(card.id)?;
        }
        Ok(())
    }
}

pub(super) struct Harbinger;

impl Playable for Harbinger {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let discard = scope.mat().zone(Zone::Discard).to_vec();
        if discard.is_empty() {
            scope.broadcast(format!("{} has no cards in their discard pile.", scope.name()));
            return Ok(());
        }
        let prompt = "You played a Harbinger. You may choose a card from your discard pile to put onto your deck.";
        if let Some(card) = scope.choose_card(prompt, &discard, false)? {
            let card = scope.mat_mut().remove(Zone::Discard, card.id)?;
            scope.put_on_deck(card);
            scope.broadcast(format!("{} put a card from their discard pile onto their deck.", scope.name()));
        }
        Ok(())
    }
}

/// Registers a one-shot turn hook on Silver.
pub(super) struct Merchant;

impl Playable for Merchant {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        game.with_hooks(HookScope::Turn, |hooks| {
            hooks.on_treasure(SILVER, "Merchant", Persistence::Once, |scope, _silver| {
                scope.broadcast(format!("{} played a Silver and gets +1 $ from their Merchant.", scope.name()));
                scope.turn_mut()?.coins += 1;
                Ok(())
            })
        })?;
        Ok(())
    }
}

pub(super) struct Vassal;

impl Playable for Vassal {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let Some(top) = scope.take_from_deck() else {
            scope.broadcast(format!("{} has no cards left to draw from.", scope.name()));
            return Ok(());
        };
        let name = scope.card_name(top.kind);
        scope.broadcast(format!("{} discarded {}.", scope.name(), article(&name)));
        scope.discard_card(top)?;
        if !scope.registry().is(top.kind, CardType::Action) {
            return Ok(());
        }
        let prompt = format!("You played a Vassal and revealed {}. Would you like to play it?", article(&name));
        // A post-discard hook may already have moved the card.
        if !scope.yes_or_no(&prompt) || !scope.mat().contains(Zone::Discard, top.id) {
            return Ok(());
        }
        scope
            .mat_mut()
            .move_card(top.id, Zone::Discard, Zone::Played, ZonePosition::Top)?;
        game.play_without_side_effects(top)
    }
}

pub(super) struct Workshop;

impl Playable for Workshop {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Workshop. Select a card costing up to 4 $ to gain.";
        if let Some(kind) = scope.choose_from_supply(prompt, &SupplyFilter::up_to(4), true)? {
            scope.gain(kind)?;
        }
        Ok(())
    }
}

/// One point per ten cards owned.
pub(super) struct Gardens;

impl Scored for Gardens {
    fn points(&self, player: &Player) -> i32 {
        (player.all_cards().count() / 10) as i32
    }
}

pub(super) struct Moneylender;

impl Playable for Moneylender {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Moneylender. You may trash a Copper from your hand for +3 $.";
        if let Some(copper) = scope.choose_from_hand(prompt, |card| card.kind == COPPER, false)? {
            scope.trash(copper.id)?;
            scope.turn_mut()?.coins += 3;
        }
        Ok(())
    }
}

pub(super) struct Poacher;

impl Playable for Poacher {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let empty = scope.table().supply().num_empty_stacks();
        let hand = scope.mat().zone(Zone::Hand).to_vec();
        let count = empty.min(hand.len());
        if count == 0 {
            return Ok(());
        }
        let cards = plural(count as u32, "card");
        scope.broadcast(format!("{} must discard {cards}.", scope.name()));
        let prompt = format!("You played a Poacher and there are {empty} empty Supply piles. Choose {cards} to discard.");
        for card in scope.choose_exactly(&prompt, &hand, count)? {
            scope.discard(card.id)?;
        }
        Ok(())
    }
}

pub(super) struct Remodel;

impl Playable for Remodel {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Remodel. Choose a card from your hand to trash. You will then gain a card costing up to 2 $ more than it.";
        let Some(card) = scope.choose_from_hand(prompt, |_| true, true)? else {
            scope.broadcast(format!("{} has no cards in their hand to trash.", scope.name()));
            return Ok(());
        };
        let max_cost = scope.cost_of(card.kind)? + 2;
        scope.trash(card.id)?;
        let prompt = format!(
            "You played a Remodel and trashed {}. Select a card costing up to {max_cost} $ to gain.",
            article(&scope.card_name(card.kind))
        );
        if let Some(kind) = scope.choose_from_supply(&prompt, &SupplyFilter::up_to(max_cost), true)? {
            scope.gain(kind)?;
        }
        Ok(())
    }
}

pub(super) struct ThroneRoom;

impl Playable for ThroneRoom {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let player = game.active_player()?;
        let prompt = "You played a Throne Room. Select an Action card to play twice.";
        let chosen = game.scope(player).choose_type_from_hand(prompt, CardType::Action, false)?;
        let name = game.player(player).name().to_string();
        let Some(target) = chosen else {
            game.broadcast(format!("{name} has no other Action cards to use with their Throne Room."));
            return Ok(());
        };
        game.player_mut(player)
            .mat
            .move_card(target.id, Zone::Hand, Zone::Played, ZonePosition::Top)?;
        let played = article(&game.registry().name(target.kind));
        for time in ["first", "second"] {
            game.broadcast(format!("{name} plays {played} for the {time} time, thanks to their Throne Room."));
            game.play_without_side_effects(target)?;
        }
        Ok(())
    }
}

pub(super) struct CouncilRoom;

impl Playable for CouncilRoom {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let others = game.others(game.active_player()?);
        let names: Vec<&str> = others.iter().map(|id| game.player(*id).name()).collect();
        game.broadcast(format!("Other players ({}) each draw a card.", name_list(&names)));
        for id in others {
            game.scope(id).draw(1);
        }
        Ok(())
    }
}

pub(super) struct Library;

impl Playable for Library {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let mut set_aside = Vec::new();
        while scope.mat().count(Zone::Hand) < 7 {
            let Some(card) = scope.take_from_deck() else {
                scope.broadcast(format!("{} has no more cards to draw from.", scope.name()));
                break;
            };
            let drawn = article(&scope.card_name(card.kind));
            if scope.registry().is(card.kind, CardType::Action) {
                let actions = scope.turn()?.actions;
                let prompt = format!(
                    "You drew {drawn} with your Library. It's an Action card. You have {} remaining. Would you like to keep it?",
                    plural(actions, "action")
                );
                if !scope.yes_or_no(&prompt) {
                    scope.send(&format!("You set aside {drawn}."));
                    set_aside.push(card);
                    continue;
                }
            }
            scope.place(card, Zone::Hand);
            scope.send(&format!("You drew {drawn}."));
        }
        if set_aside.is_empty() {
            return Ok(());
        }
        let names: Vec<String> = set_aside.iter().map(|card| scope.card_name(card.kind)).collect();
        scope.broadcast(format!("{} discarded the set-aside cards: {}.", scope.name(), name_list(&names)));
        for card in set_aside {
            scope.discard_card(card)?;
        }
        Ok(())
    }
}

pub(super) struct Mine;

impl Playable for Mine {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Mine. You may choose a Treasure card from your hand to trash. If you do, you will gain a Treasure card to your hand costing up to 3 $ more than the trashed card.";
        let Some(card) = scope.choose_type_from_hand(prompt, CardType::Treasure, false)? else {
            scope.broadcast(format!("{} did not trash anything.", scope.name()));
            return Ok(());
        };
        let max_cost = scope.cost_of(card.kind)? + 3;
        scope.trash(card.id)?;
        let prompt = format!("Choose a Treasure card costing up to {max_cost} $ to gain to your hand.");
        let filter = SupplyFilter::up_to(max_cost).of_type(CardType::Treasure);
        if let Some(kind) = scope.choose_from_supply(&prompt, &filter, true)? {
            scope.gain_to(kind, Zone::Hand)?;
        }
        Ok(())
    }
}

pub(super) struct Sentry;

impl Playable for Sentry {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let mut revealed = Vec::with_capacity(2);
        for _ in 0..2 {
            match scope.take_from_deck() {
                Some(card) => revealed.push(card),
                None => {
                    scope.broadcast(format!("{} has no more cards to draw from.", scope.name()));
                    break;
                }
            }
        }

        let options: Vec<String> = ["Trash", "Discard", "Return to deck"].map(String::from).to_vec();
        let mut kept: Vec<Card> = Vec::new();
        for card in revealed {
            let name = scope.card_name(card.kind);
            let prompt = format!("You revealed {} with your Sentry. What would you like to do with it?", article(&name));
            match scope.from_options(&prompt, &options, true)? {
                Some(0) => scope.trash_card(card),
                Some(1) => {
                    scope.broadcast(format!("{} discarded {}.", scope.name(), article(&name)));
                    scope.discard_card(card)?;
                }
                _ => {
                    scope.send(&format!("You set the {name} aside to return to your deck."));
                    kept.push(card);
                }
            }
        }
        if kept.is_empty() {
            return Ok(());
        }

        if kept.iter().any(|card| card.kind != kept[0].kind) {
            let prompt = "You played a Sentry and must return these revealed cards to your deck in any order. (The last card you choose will be the top card of your deck.)";
            let order = scope.choose_cards(prompt, &kept, true, Some(kept.len()))?;
            // Cards left unnamed go underneath the named ones.
            let mut ordered: Vec<Card> = kept.iter().filter(|card| !order.contains(card)).copied().collect();
            ordered.extend(order);
            kept = ordered;
        }
        for card in &kept {
            scope.put_on_deck(*card);
        }
        scope.broadcast(format!(
            "{} put {} back on top of their deck.",
            scope.name(),
            plural(kept.len() as u32, "card")
        ));
        Ok(())
    }
}

pub(super) struct Artisan;

impl Playable for Artisan {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played an Artisan. Gain a card to your hand costing up to 5 $. You will then put a card from your hand onto your deck.";
        if let Some(kind) = scope.choose_from_supply(prompt, &SupplyFilter::up_to(5), true)? {
            scope.gain_to(kind, Zone::Hand)?;
        }
        let prompt = "You played an Artisan. Put a card from your hand onto your deck.";
        if let Some(card) = scope.choose_from_hand(prompt, |_| true, true)? {
            let card = scope.mat_mut().remove(Zone::Hand, card.id)?;
            scope.put_on_deck(card);
            let message = format!("You put {} from your hand onto your deck.", article(&scope.card_name(card.kind)));
            scope.send(&message);
        }
        Ok(())
    }
}

pub(super) struct Chancellor;

impl Playable for Chancellor {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let deck = scope.mat().count(Zone::Deck) as u32;
        let discard = scope.mat().count(Zone::Discard) as u32;
        let prompt = format!(
            "You played a Chancellor. Would you like to put your deck ({}) into your discard pile ({})?",
            plural(deck, "card"),
            plural(discard, "card")
        );
        if scope.yes_or_no(&prompt) {
            let mat = scope.mat_mut();
            let cards = mat.drain(Zone::Deck);
            mat.zone_mut(Zone::Discard).extend(cards);
            scope.broadcast(format!("{} put their deck into their discard pile.", scope.name()));
        }
        Ok(())
    }
}

pub(super) struct Feast;

impl Playable for Feast {
    fn action(&self, game: &mut Game, card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        // Replayed by Throne Room, the second play finds it already gone.
        if scope.mat().contains(Zone::Played, card.id) {
            scope.trash_from(Zone::Played, card.id)?;
        }
        let prompt = "You played and trashed a Feast. Select a card costing up to 5 $ to gain.";
        if let Some(kind) = scope.choose_from_supply(prompt, &SupplyFilter::up_to(5), true)? {
            scope.gain(kind)?;
        }
        Ok(())
    }
}

pub(super) struct Adventurer;

impl Playable for Adventurer {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let registry = scope.registry();
        let mut treasures = Vec::with_capacity(2);
        let mut others = Vec::new();
        while treasures.len() < 2 {
            let Some(card) = scope.take_from_deck() else {
                scope.broadcast(format!("{} has no cards left to draw from.", scope.name()));
                break;
            };
            if registry.is(card.kind, CardType::Treasure) {
                treasures.push(card);
            } else {
                others.push(card);
            }
        }
        let names = |cards: &[Card]| -> Vec<String> { cards.iter().map(|card| registry.name(card.kind)).collect() };
        if !treasures.is_empty() {
            scope.broadcast(format!(
                "Revealed treasures: {}. {} puts these into their hand.",
                name_list(&names(&treasures)),
                scope.name()
            ));
            for card in treasures {
                scope.place(card, Zone::Hand);
            }
        }
        if !others.is_empty() {
            scope.broadcast(format!(
                "Other revealed cards: {}. {} discards these.",
                name_list(&names(&others)),
                scope.name()
            ));
            for card in others {
                scope.discard_card(card)?;
            }
        }
        Ok(())
    }
}
