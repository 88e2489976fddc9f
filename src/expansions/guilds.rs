//! A slice of Guilds: Coffers and Overpay.
//!
//! Coffers are per-player tokens spent for coins when a Buy phase opens.
//! Overpay is a persistent post-buy hook registered during setup for every
//! Supply pile whose kind implements `Overpaid`.

use std::sync::Arc;

use crate::cards::{ActionBonus, Card, CardDefinition, CardEntry, CardId, CardRegistry, CardType, Overpaid, Playable};
use crate::core::Result;
use crate::hooks::{HookScope, Persistence};
use crate::rules::{article, name_list, plural, Game, PlayerScope, SupplyFilter};

use super::{register_all, Expansion};

pub const CANDLESTICK_MAKER: CardId = CardId::new(600);
pub const STONEMASON: CardId = CardId::new(601);
pub const DOCTOR: CardId = CardId::new(602);

#[derive(Clone, Copy, Debug, Default)]
pub struct GuildsSet;

impl GuildsSet {
    pub const NAME: &'static str = "Guilds";
}

struct CandlestickMaker;

impl Playable for CandlestickMaker {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        scope.player_mut().add_coffers(1);
        scope.broadcast(format!("{} gets +1 Coffers.", scope.name()));
        Ok(())
    }
}

struct Stonemason;

impl Playable for Stonemason {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Stonemason. Choose a card from your hand to trash. You will then gain two cards each costing less than the trashed card (if possible).";
        let Some(card) = scope.choose_from_hand(prompt, |_| true, true)? else {
            scope.broadcast(format!("{} did not trash a card.", scope.name()));
            return Ok(());
        };
        let cost = scope.cost_of(card.kind)?;
        scope.trash(card.id)?;
        let trashed = article(&scope.card_name(card.kind));
        for num in 1..=2 {
            let gained = match cost.checked_sub(1) {
                Some(max_cost) => {
                    let prompt = format!(
                        "You played a Stonemason and trashed {trashed}. Please choose a card ({num} of 2) to gain costing at most {max_cost} $."
                    );
                    scope.choose_from_supply(&prompt, &SupplyFilter::up_to(max_cost), true)?
                }
                None => None,
            };
            let Some(kind) = gained else {
                scope.broadcast(format!(
                    "There are no available cards for {} to gain costing less than {cost} $.",
                    scope.name()
                ));
                return Ok(());
            };
            scope.gain(kind)?;
        }
        Ok(())
    }
}

impl Overpaid for Stonemason {
    fn describe(&self, _whose: &str) -> String {
        "gain two Action cards each costing the amount overpaid.".into()
    }

    fn overpay(&self, buyer: &mut PlayerScope<'_>, _card: Card, amount: u32) -> Result<()> {
        let filter = SupplyFilter::exactly(amount).of_type(CardType::Action);
        for num in 1..=2 {
            let prompt = format!(
                "You overpaid for your purchased Stonemason by {amount} $. Please choose an Action card ({num} of 2) to gain costing {amount} $."
            );
            let Some(kind) = buyer.choose_from_supply(&prompt, &filter, true)? else {
                buyer.broadcast(format!(
                    "There are no available Action cards for {} to gain costing {amount} $.",
                    buyer.name()
                ));
                return Ok(());
            };
            buyer.gain(kind)?;
        }
        Ok(())
    }
}

struct Doctor;

impl Playable for Doctor {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let registry = scope.registry();
        let kinds = scope.table().supply().kinds().to_vec();
        let names: Vec<String> = kinds.iter().map(|kind| registry.name(*kind)).collect();
        let prompt = "You played a Doctor. Please name a card. You will then reveal the top 3 cards, trash the matches and put the rest back in any order.";
        let Some(index) = scope.from_options(prompt, &names, true)? else {
            return Ok(());
        };
        let named = kinds[index];
        scope.broadcast(format!("{} named {}.", scope.name(), names[index]));

        let mut top = Vec::with_capacity(3);
        for _ in 0..3 {
            let Some(card) = scope.take_from_deck() else {
                break;
            };
            top.push(card);
        }
        if top.is_empty() {
            scope.broadcast(format!("{} has no more cards in their deck.", scope.name()));
            return Ok(());
        }
        scope.reveal(&top);
        let (matches, rest): (Vec<Card>, Vec<Card>) = top.into_iter().partition(|card| card.kind == named);
        for card in matches {
            scope.trash_card(card);
        }
        if rest.is_empty() {
            return Ok(());
        }

        let mut order = rest.clone();
        if rest.iter().any(|card| card.kind != rest[0].kind) {
            let prompt = "You played a Doctor and must return these revealed cards to your deck in any order. (The last card you choose will be the top card of your deck.)";
            let chosen = scope.choose_cards(prompt, &rest, true, Some(rest.len()))?;
            // Cards left unchosen go beneath the chosen ones.
            order = rest
                .iter()
                .filter(|card| !chosen.iter().any(|other| other.id == card.id))
                .chain(chosen.iter())
                .copied()
                .collect();
        }
        let names: Vec<String> = order.iter().map(|card| registry.name(card.kind)).collect();
        for card in order {
            scope.put_on_deck(card);
        }
        scope.broadcast(format!("{} put {} back on top of their deck.", scope.name(), name_list(&names)));
        Ok(())
    }
}

impl Overpaid for Doctor {
    fn describe(&self, whose: &str) -> String {
        format!("per $ overpaid, look at the top card of {whose} deck and either trash it, discard it, or put it back.")
    }

    fn overpay(&self, buyer: &mut PlayerScope<'_>, _card: Card, amount: u32) -> Result<()> {
        let options = vec!["Trash it".to_string(), "Discard it".to_string(), "Put it back".to_string()];
        for num in 1..=amount {
            let Some(top) = buyer.take_from_deck() else {
                buyer.broadcast(format!("{} has no more cards in their deck.", buyer.name()));
                return Ok(());
            };
            let name = article(&buyer.card_name(top.kind));
            let prompt = format!(
                "You overpaid for your purchased Doctor by {amount} $. You revealed {name} from the top of your deck ({num} of {amount}). What would you like to do with it?"
            );
            match buyer.from_options(&prompt, &options, true)? {
                Some(0) => buyer.trash_card(top),
                Some(1) => {
                    buyer.broadcast(format!("{} discarded {name}.", buyer.name()));
                    buyer.discard_card(top)?;
                }
                _ => buyer.put_on_deck(top),
            }
        }
        Ok(())
    }
}

/// Offer to overpay after buying a kind that allows it.
fn overpay_after_buy(overpaid: Arc<dyn Overpaid>) -> impl Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync + 'static {
    move |scope, card| {
        let coins = scope.turn()?.coins;
        if coins == 0 {
            return Ok(());
        }
        let name = scope.card_name(card.kind);
        let prompt = format!(
            "You bought {} and may overpay for it in order to {} By how much would you like to overpay?",
            article(&name),
            overpaid.describe("your")
        );
        let Some(amount) = scope.from_range(&prompt, 1, i64::from(coins), false)? else {
            return Ok(());
        };
        let amount = u32::try_from(amount).unwrap_or(0).min(coins);
        if amount == 0 {
            return Ok(());
        }
        scope.turn_mut()?.spend_coins(amount);
        tracing::debug!(player = %scope.name(), card = %name, amount, "overpaid");
        scope.broadcast(format!(
            "{} overpaid for their {name} by {amount} $ and may {}",
            scope.name(),
            overpaid.describe("their")
        ));
        overpaid.overpay(scope, card, amount)
    }
}

impl Expansion for GuildsSet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        let none = ActionBonus::new();
        register_all(
            registry,
            [
                CardEntry::new(
                    CardDefinition::action(CANDLESTICK_MAKER, "Candlestick Maker", 2, none.actions(1).buys(1))
                        .with_description("+1 Coffers"),
                )
                .with_play(CandlestickMaker),
                CardEntry::new(CardDefinition::action(STONEMASON, "Stonemason", 2, none).with_description(
                    "Trash a card from your hand. Gain 2 cards each costing less than it. Overpay: Gain 2 Action cards each costing the amount overpaid.",
                ))
                .with_play(Stonemason)
                .with_overpay(Stonemason),
                CardEntry::new(CardDefinition::action(DOCTOR, "Doctor", 3, none).with_description(
                    "Name a card. Reveal the top 3 cards of your deck. Trash the matches. Put the rest back in any order. Overpay: Per $ overpaid, look at the top card of your deck; trash it, discard it, or put it back.",
                ))
                .with_play(Doctor)
                .with_overpay(Doctor),
            ],
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        vec![CANDLESTICK_MAKER, STONEMASON, DOCTOR]
    }

    /// Covers every overpayable pile in the Supply, whichever expansion
    /// registered it.
    fn setup(&self, game: &mut Game) -> Result<()> {
        let registry = Arc::clone(game.registry());
        let overpayable: Vec<(CardId, Arc<dyn Overpaid>)> = game
            .supply()
            .kinds()
            .iter()
            .filter_map(|kind| registry.get(*kind)?.overpaid().map(|overpaid| (*kind, overpaid)))
            .collect();
        if overpayable.is_empty() {
            return Ok(());
        }
        tracing::debug!(piles = overpayable.len(), "registering Overpay hooks");
        game.with_hooks(HookScope::Game, |hooks| {
            for (kind, overpaid) in overpayable {
                hooks.on_post_buy(kind, "Overpay", Persistence::Persistent, overpay_after_buy(overpaid));
            }
        })
    }

    fn pre_buy_phase(&self, game: &mut Game) -> Result<()> {
        let mut scope = game.active_scope()?;
        let coffers = scope.player().coffers();
        if coffers == 0 {
            return Ok(());
        }
        let prompt = format!("You have {coffers} Coffers. How many would you like to use for this Buy phase?");
        let Some(wanted) = scope.from_range(&prompt, 1, i64::from(coffers), false)? else {
            return Ok(());
        };
        let used = scope.player_mut().take_coffers(u32::try_from(wanted).unwrap_or(0));
        if used == 0 {
            return Ok(());
        }
        scope.broadcast(format!("{} used {}.", scope.name(), plural(used, "Coffer")));
        scope.turn_mut()?.coins += used;
        Ok(())
    }
}
