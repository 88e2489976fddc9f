//! End conditions, exhaustion, cost modifiers and card conservation.

mod common;

use std::sync::Arc;

use proptest::prelude::*;

use common::{Fixture, STANDARD_KINGDOM};
use dominion_engine::cards::{Card, CardDefinition, CardEntry, CardId, CardRegistry};
use dominion_engine::core::{EntityId, GameConfig, GameRng};
use dominion_engine::expansions::base::{COPPER, CURSE, ESTATE, GOLD, PROVINCE, SILVER};
use dominion_engine::expansions::dominion::{CELLAR, MARKET, MILITIA, MOAT, SMITHY, VILLAGE, WITCH, WORKSHOP};
use dominion_engine::expansions::intrigue::BRIDGE;
use dominion_engine::expansions::prosperity::{BANK, COLONY, PEDDLER, PLATINUM};
use dominion_engine::supply::{FixedKingdom, StackSize, Supply};
use dominion_engine::zones::{PlayerMat, Zone, ZonePosition};
use dominion_engine::{AutoInteraction, DominionSet, GameBuilder, IntrigueSet, ProsperitySet};

fn drain(fx: &Fixture, kind: CardId) {
    let mut supply = fx.game.supply();
    while !supply.is_empty(kind) {
        supply.draw(kind).unwrap();
    }
}

fn finish_turn(fx: &mut Fixture) {
    fx.game.begin_turn().unwrap();
    fx.game.end_action_phase().unwrap();
    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();
}

#[test]
fn test_provinces_end_the_game() {
    let mut fx = Fixture::standard(1);
    assert_eq!(fx.game.supply().remaining(PROVINCE), Some(StackSize::Finite(8)));
    drain(&fx, PROVINCE);
    assert_eq!(fx.game.check_end().as_deref(), Some("All Provinces have been purchased."));
    assert!(!fx.game.is_over());

    finish_turn(&mut fx);

    let outcome = fx.game.outcome().unwrap().clone();
    assert_eq!(outcome.reason, "All Provinces have been purchased.");
    assert!(fx.log_contains("Game over! All Provinces have been purchased."));
    // Both players still hold only their starting Estates.
    for (id, _) in fx.game.players() {
        assert!(outcome.result.is_winner(id));
    }
}

#[test]
fn test_three_empty_piles_end_the_game() {
    let fx = Fixture::standard(2);
    drain(&fx, VILLAGE);
    drain(&fx, SMITHY);
    assert_eq!(fx.game.check_end(), None);

    drain(&fx, CURSE);

    let reason = fx.game.check_end().unwrap();
    assert!(reason.starts_with("Three Supply piles are empty: "));
    for name in ["Curse", "Village", "Smithy"] {
        assert!(reason.contains(name));
    }
}

#[test]
fn test_gain_from_empty_pile_is_absorbed() {
    let mut fx = Fixture::standard(3);
    let p = fx.first();
    drain(&fx, CURSE);

    assert_eq!(fx.game.scope(p).gain(CURSE).unwrap(), None);
    assert_eq!(fx.game.scope(p).gain_many(CURSE, 3, true).unwrap(), Vec::new());
    assert!(fx.log_contains("could not gain a Curse since that supply pile is empty."));
    assert!(fx.game.scope(p).gain(MARKET).unwrap().is_some());
}

#[test]
fn test_unlimited_treasure_piles() {
    let fx = Fixture::standard(4);
    let supply = fx.game.supply();

    for kind in [COPPER, SILVER, GOLD] {
        assert_eq!(supply.remaining(kind), Some(StackSize::Unlimited));
        assert_eq!(supply.population(kind), None);
    }
    assert_eq!(supply.remaining(ESTATE), Some(StackSize::Finite(8)));
    assert_eq!(supply.remaining(CURSE), Some(StackSize::Finite(10)));
    assert_eq!(supply.kingdom().len(), 10);
}

#[test]
fn test_bridge_lowers_costs_for_the_turn() {
    let kingdom = [BRIDGE, CELLAR, MOAT, VILLAGE, WORKSHOP, SMITHY, MARKET, BANK, PEDDLER, WITCH];
    let mut fx = Fixture::new(GameConfig::new(5), 2, &kingdom);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[BRIDGE, BRIDGE, ESTATE, ESTATE, ESTATE]);

    fx.play(BRIDGE);
    assert!(fx.log_contains("This turn, cards cost 1 $ less."));
    {
        let supply = fx.game.supply();
        assert_eq!(supply.cost(SMITHY).unwrap(), 3);
        assert_eq!(supply.cost(COPPER).unwrap(), 0);
        assert_eq!(supply.cost(PROVINCE).unwrap(), 7);
    }
    let turn = fx.game.turn_view().unwrap();
    assert_eq!((turn.buys, turn.coins), (2, 1));

    fx.game.end_action_phase().unwrap();
    fx.game.buy(ESTATE).unwrap();
    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();

    let supply = fx.game.supply();
    assert_eq!(supply.cost(SMITHY).unwrap(), 4);
    assert_eq!(supply.cost(ESTATE).unwrap(), 2);
}

#[test]
fn test_colony_pile_ends_the_game() {
    let kingdom = [BANK, PEDDLER, CELLAR, MOAT, VILLAGE, WORKSHOP, SMITHY, MARKET, BRIDGE, MILITIA];
    let build = |seed| {
        GameBuilder::new(GameConfig::new(seed))
            .player("Ada", AutoInteraction::new())
            .player("Brook", AutoInteraction::new())
            .expansion(DominionSet)
            .expansion(IntrigueSet)
            .expansion(ProsperitySet)
            .kingdom(FixedKingdom(kingdom.to_vec()))
            .build()
            .unwrap()
    };
    let game = (0..200)
        .map(build)
        .find(|game| game.supply().contains(COLONY))
        .unwrap();
    assert!(game.supply().contains(PLATINUM));
    assert_eq!(game.supply().remaining(PLATINUM), Some(StackSize::Finite(12)));

    {
        let mut supply = game.supply();
        while !supply.is_empty(COLONY) {
            supply.draw(COLONY).unwrap();
        }
    }
    assert_eq!(game.check_end().as_deref(), Some("All Colonies have been purchased."));
}

/// Every card of a finite kind is in exactly one place: its pile, the
/// trash, or some player's mat.
#[test]
fn test_auto_games_conserve_cards() {
    for simultaneous in [false, true] {
        let config = GameConfig::new(31).with_max_turns(40).with_simultaneous_reactions(simultaneous);
        let mut fx = Fixture::new(config, 3, &STANDARD_KINGDOM);
        fx.game.run().unwrap();

        let supply = fx.game.supply();
        for kind in supply.kinds().to_vec() {
            let Some(population) = supply.population(kind) else {
                continue;
            };
            let left = supply.remaining(kind).and_then(StackSize::count).unwrap_or(0);
            let held: usize = fx.game.players().map(|(_, player)| player.count_kind(kind)).sum();
            let total = left as usize + supply.trash_count(kind) + held;
            assert_eq!(total, population as usize, "kind {kind}");
        }
    }
}

fn one_kind_supply() -> Supply {
    let mut registry = CardRegistry::new();
    registry
        .register(CardEntry::new(CardDefinition::new(CardId::new(1), "Thing", 4)))
        .unwrap();
    let mut supply = Supply::new(Arc::new(registry));
    supply.add_stack(CardId::new(1), StackSize::Finite(10)).unwrap();
    supply
}

proptest! {
    #[test]
    fn prop_cost_never_negative(deltas in prop::collection::vec(-6i32..6, 0..20)) {
        let mut supply = one_kind_supply();
        let kind = CardId::new(1);
        let mut expected: i64 = 4;
        for delta in deltas {
            let cost = supply.modify_cost(kind, delta).unwrap();
            expected = (expected + i64::from(delta)).max(0);
            prop_assert_eq!(i64::from(cost), expected);
        }
        supply.reset_costs();
        prop_assert_eq!(supply.cost(kind).unwrap(), 4);
    }

    #[test]
    fn prop_draw_exhaustion(deck in 0u32..12, discard in 0u32..12, n in 0usize..30, seed in any::<u64>()) {
        let mut mat = PlayerMat::new();
        let mut next = 0u32;
        let mut card = || {
            next += 1;
            Card::new(EntityId::new(next), CardId::new(1))
        };
        for _ in 0..deck {
            mat.push(Zone::Deck, card());
        }
        for _ in 0..discard {
            mat.push(Zone::Discard, card());
        }

        let draw = mat.draw(n, &mut GameRng::new(seed));

        let available = (deck + discard) as usize;
        prop_assert_eq!(draw.cards.len(), n.min(available));
        prop_assert_eq!(draw.shuffled, n > deck as usize && discard > 0);
        prop_assert_eq!(mat.count(Zone::Hand), draw.cards.len());
        prop_assert_eq!(mat.len(), available);
    }

    #[test]
    fn prop_discard_then_draw_keeps_hand_size(
        hand in 0u32..8,
        deck in 0u32..6,
        discard in 0u32..6,
        k in 0usize..8,
        seed in any::<u64>(),
    ) {
        let mut mat = PlayerMat::new();
        let mut next = 0u32;
        let mut card = || {
            next += 1;
            Card::new(EntityId::new(next), CardId::new(1))
        };
        for (zone, count) in [(Zone::Hand, hand), (Zone::Deck, deck), (Zone::Discard, discard)] {
            for _ in 0..count {
                mat.push(zone, card());
            }
        }
        let k = k.min(hand as usize);
        let chosen: Vec<EntityId> = mat.zone(Zone::Hand).iter().take(k).map(|card| card.id).collect();

        for id in chosen {
            mat.move_card(id, Zone::Hand, Zone::Discard, ZonePosition::Top).unwrap();
        }
        let before = mat.count(Zone::Hand);
        let pool = (deck + discard) as usize + k;
        let draw = mat.draw(k, &mut GameRng::new(seed));

        prop_assert_eq!(draw.cards.len(), k.min(pool));
        prop_assert_eq!(mat.count(Zone::Hand), before + draw.cards.len());
        prop_assert_eq!(mat.count(Zone::Hand), hand as usize);
        prop_assert_eq!(mat.len(), (hand + deck + discard) as usize);
    }
}
