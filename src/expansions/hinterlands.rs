//! A slice of Hinterlands: Crossroads, Duchess and Tunnel.
//!
//! Duchess and Tunnel react to events that are not their own play, so the
//! expansion registers game-scope hooks for them during setup when they
//! are in the kingdom.

use crate::cards::{ActionBonus, Card, CardDefinition, CardEntry, CardId, CardRegistry, CardType, Playable};
use crate::core::Result;
use crate::hooks::{Gained, HookScope, Persistence};
use crate::rules::{article, plural, Game, PlayerScope};
use crate::zones::Zone;

use super::base::{DUCHY, GOLD};
use super::{register_all, Expansion};

pub const CROSSROADS: CardId = CardId::new(300);
pub const DUCHESS: CardId = CardId::new(301);
pub const TUNNEL: CardId = CardId::new(302);

#[derive(Clone, Copy, Debug, Default)]
pub struct HinterlandsSet;

impl HinterlandsSet {
    pub const NAME: &'static str = "Hinterlands";
}

struct Crossroads;

impl Playable for Crossroads {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        scope.reveal_hand();
        let registry = scope.registry();
        let victories = scope
            .mat()
            .zone(Zone::Hand)
            .iter()
            .filter(|card| registry.is(card.kind, CardType::Victory))
            .count();
        scope.broadcast(format!(
            "{} has {} in their hand.",
            scope.name(),
            plural(victories as u32, "Victory card")
        ));
        scope.draw(victories);
        // The play being resolved is already counted.
        if scope.turn()?.times_played(CROSSROADS) == 1 {
            scope.broadcast(format!(
                "This is the first Crossroads that {} has played this turn, so they receive +3 Actions.",
                scope.name()
            ));
            scope.turn_mut()?.actions += 3;
        }
        Ok(())
    }
}

struct Duchess;

impl Playable for Duchess {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let active = game.active_player()?;
        let mut order = vec![active];
        order.extend(game.others(active));
        for id in order {
            let mut scope = game.scope(id);
            let Some(card) = scope.take_from_deck() else {
                continue;
            };
            let name = article(&scope.card_name(card.kind));
            let prompt = format!("Duchess: the top card of your deck is {name}. Would you like to discard it?");
            if scope.yes_or_no(&prompt) {
                scope.broadcast(format!("{} discarded {name} from the top of their deck.", scope.name()));
                scope.discard_card(card)?;
            } else {
                scope.put_on_deck(card);
                scope.broadcast(format!("{} kept the top card of their deck.", scope.name()));
            }
        }
        Ok(())
    }
}

fn duchess_on_duchy(scope: &mut PlayerScope<'_>, _gained: &mut Gained) -> Result<()> {
    if scope.table().supply().is_empty(DUCHESS) {
        scope.broadcast("There are no Duchesses remaining in the Supply so one cannot be gained.");
        return Ok(());
    }
    scope.broadcast(format!("{} may gain a Duchess.", scope.name()));
    if scope.yes_or_no("You gained a Duchy and may gain a Duchess. Would you like to gain a Duchess?") {
        scope.gain(DUCHESS)?;
    } else {
        scope.broadcast(format!("{} did not gain a Duchess.", scope.name()));
    }
    Ok(())
}

/// Cleanup moves cards without firing post-discard hooks, so this only
/// runs for discards outside Cleanup.
fn tunnel_on_discard(scope: &mut PlayerScope<'_>, _tunnel: Card) -> Result<()> {
    if scope.yes_or_no("You discarded a Tunnel. Would you like to reveal it to gain a Gold?") {
        scope.broadcast(format!("{} revealed a Tunnel.", scope.name()));
        scope.gain(GOLD)?;
    }
    Ok(())
}

impl Expansion for HinterlandsSet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        register_all(
            registry,
            [
                CardEntry::new(
                    CardDefinition::action(CROSSROADS, "Crossroads", 2, ActionBonus::new()).with_description(
                        "Reveal your hand. +1 Card per Victory card revealed. If this is the first time you played a Crossroads this turn, +3 Actions.",
                    ),
                )
                .with_play(Crossroads),
                CardEntry::new(
                    CardDefinition::action(DUCHESS, "Duchess", 2, ActionBonus::new().coins(2)).with_description(
                        "Each player (including you) looks at the top card of their deck and may discard it. In games using this, when you gain a Duchy, you may gain a Duchess.",
                    ),
                )
                .with_play(Duchess),
                CardEntry::new(
                    CardDefinition::victory(TUNNEL, "Tunnel", 3, 2)
                        .with_type(CardType::Reaction)
                        .with_description("When you discard this other than during Clean-up, you may reveal it to gain a Gold."),
                ),
            ],
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        vec![CROSSROADS, DUCHESS, TUNNEL]
    }

    fn setup(&self, game: &mut Game) -> Result<()> {
        let (duchess, tunnel) = {
            let supply = game.supply();
            (supply.contains(DUCHESS), supply.contains(TUNNEL))
        };
        if duchess {
            game.with_hooks(HookScope::Game, |hooks| {
                hooks.on_post_gain(DUCHY, "Duchess", Persistence::Persistent, duchess_on_duchy)
            })?;
        }
        if tunnel {
            game.with_hooks(HookScope::Game, |hooks| {
                hooks.on_post_discard(TUNNEL, "Tunnel", Persistence::Persistent, tunnel_on_discard)
            })?;
        }
        Ok(())
    }
}
