//! Attack resolution and the reaction window.
//!
//! Playing an Attack card runs its `Playable` effect first, then this
//! protocol:
//!
//! 1. The card's public prompt, if any, is broadcast once.
//! 2. Each other player, in turn order, gets a reaction window: Reaction
//!    cards in hand are offered one at a time until the player declines or
//!    runs out. A revealed card is not offered again. A kind the player
//!    declined is never offered again for this attack, and a resolved kind
//!    only when its reaction allows repeats.
//! 3. A victim who revealed an immunity reaction is announced as immune;
//!    everyone else suffers `attack_effect`.
//! 4. `post_attack` runs once every victim is done.
//!
//! When both the card and the game allow it, step 2-3 runs for all victims
//! at once on the rayon pool. Each task owns a disjoint `&mut Player` and
//! shares the `Table`; the Supply mutex serializes gains, so two victims
//! racing for the last Curse cannot both get it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cards::{Attacking, Card, CardEntry, CardId, CardType, ReactionKind};
use crate::core::{EntityId, PlayerId, Result};
use crate::zones::Zone;

use super::game::Game;
use super::log::{article, plural};
use super::player::Player;
use super::scope::PlayerScope;

/// One Attack card play, as seen by its victims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub attacker: PlayerId,
    pub attacker_name: String,
    pub card: Card,
    pub card_name: String,
}

impl Game {
    pub(crate) fn resolve_attack(&mut self, attacking: &dyn Attacking, card: Card) -> Result<()> {
        let attacker = self.active_player()?;
        let attack = Attack {
            attacker,
            attacker_name: self.players[attacker].name().to_string(),
            card,
            card_name: self.table.name(card.kind),
        };
        if let Some(prompt) = attacking.prompt(&attack) {
            self.broadcast(prompt);
        }

        let victims = self.others(attacker);
        let concurrent = attacking.allows_simultaneous() && self.config.allow_simultaneous_reactions;
        tracing::debug!(card = %attack.card_name, victims = victims.len(), concurrent, "resolving attack");

        let table = &self.table;
        if concurrent {
            let mut tasks: Vec<(usize, &mut Player)> = self
                .players
                .iter_mut()
                .filter_map(|(id, player)| victims.iter().position(|v| *v == id).map(|order| (order, player)))
                .collect();
            tasks.sort_by_key(|(order, _)| *order);
            let results: Vec<Result<()>> = tasks
                .into_par_iter()
                .map(|(_, player)| {
                    let mut victim = PlayerScope::new(player, None, table);
                    resolve_victim(&mut victim, &attack, attacking)
                })
                .collect();
            results.into_iter().collect::<Result<Vec<()>>>()?;
        } else {
            for id in victims {
                let player = self.players.get_mut(id);
                table.broadcast(format!(
                    "{} must react to {}'s {}.",
                    player.name(),
                    attack.attacker_name,
                    attack.card_name
                ));
                let mut victim = PlayerScope::new(player, None, table);
                resolve_victim(&mut victim, &attack, attacking)?;
            }
        }

        attacking.post_attack(self, card)
    }
}

/// Reaction window, then the attack effect unless the victim became immune.
fn resolve_victim(victim: &mut PlayerScope<'_>, attack: &Attack, attacking: &dyn Attacking) -> Result<()> {
    let registry = victim.registry();
    let mut revealed: Vec<EntityId> = Vec::new();
    let mut ignored: Vec<CardId> = Vec::new();
    let mut immune = false;

    loop {
        let candidates: Vec<Card> = victim
            .mat()
            .zone(Zone::Hand)
            .iter()
            .filter(|card| {
                registry.is(card.kind, CardType::Reaction)
                    && registry.get(card.kind).is_some_and(|entry| entry.reacting().is_some())
                    && !revealed.contains(&card.id)
                    && !ignored.contains(&card.kind)
            })
            .copied()
            .collect();
        if candidates.is_empty() {
            break;
        }
        let prompt = format!(
            "{} played {} (an Attack card). You have {} in your hand. You may reveal any or all of them, one at a time.",
            attack.attacker_name,
            article(&attack.card_name),
            plural(candidates.len() as u32, "playable Reaction card"),
        );
        let Some(card) = victim.choose_card(&prompt, &candidates, false)? else {
            victim.send("You forfeited your opportunity to react.");
            break;
        };
        revealed.push(card.id);
        victim.broadcast(format!(
            "{} revealed {} in reaction to {}'s {}.",
            victim.name(),
            article(&victim.card_name(card.kind)),
            attack.attacker_name,
            attack.card_name
        ));
        let Some(reacting) = registry.get(card.kind).and_then(CardEntry::reacting) else {
            continue;
        };
        let reaction = reacting.react(victim, attack, card)?;
        tracing::debug!(victim = %victim.name(), kind = ?reaction.kind, card = card.kind.raw(), "reaction resolved");
        immune |= reaction.kind == ReactionKind::Immunity;
        if reaction.kind == ReactionKind::Declined || reaction.suppress_repeat {
            ignored.push(card.kind);
        }
    }

    if immune {
        tracing::debug!(victim = %victim.name(), card = %attack.card_name, "victim immune");
        victim.broadcast(format!(
            "{} is immune to the effects of {}'s {}.",
            victim.name(),
            attack.attacker_name,
            attack.card_name
        ));
        return Ok(());
    }
    attacking.attack_effect(attack, victim)
}
