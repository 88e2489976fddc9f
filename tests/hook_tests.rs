//! Hooks: registration scopes, persistence, gain relocation and the cards
//! built on them.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{Answer, Fixture};
use dominion_engine::core::{EngineError, GameConfig};
use dominion_engine::expansions::base::{COPPER, DUCHY, ESTATE, GOLD, SILVER};
use dominion_engine::expansions::dominion::{CELLAR, MERCHANT, MILITIA, MOAT, SMITHY, VILLAGE, WORKSHOP};
use dominion_engine::expansions::hinterlands::{CROSSROADS, DUCHESS, TUNNEL};
use dominion_engine::expansions::intrigue::BRIDGE;
use dominion_engine::expansions::prosperity::{BANK, PEDDLER};
use dominion_engine::hooks::{HookScope, Persistence};
use dominion_engine::zones::Zone;

const HINTERLANDS_KINGDOM: [dominion_engine::CardId; 10] =
    [CROSSROADS, DUCHESS, TUNNEL, CELLAR, MOAT, VILLAGE, WORKSHOP, MILITIA, SMITHY, MERCHANT];

const PROSPERITY_KINGDOM: [dominion_engine::CardId; 10] =
    [BANK, PEDDLER, BRIDGE, CELLAR, MOAT, VILLAGE, WORKSHOP, MILITIA, SMITHY, MERCHANT];

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&count), count)
}

#[test]
fn test_post_gain_relocates_card() {
    let mut fx = Fixture::new(GameConfig::new(1), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    fx.game
        .with_hooks(HookScope::Game, |hooks| {
            hooks.on_post_gain(SILVER, "to hand", Persistence::Persistent, |_, gained| {
                gained.zone = Zone::Hand;
                Ok(())
            })
        })
        .unwrap();

    let silver = fx.game.scope(p).gain(SILVER).unwrap().unwrap();

    assert!(fx.game.player(p).mat.contains(Zone::Hand, silver.id));
    assert_eq!(fx.count_in(p, Zone::Discard, SILVER), 0);
}

#[test]
fn test_once_and_persistent_hooks() {
    let mut fx = Fixture::new(GameConfig::new(2), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    let (once, once_seen) = counter();
    let (every, every_seen) = counter();
    fx.game
        .with_hooks(HookScope::Game, |hooks| {
            hooks.on_post_gain(COPPER, "once", Persistence::Once, move |_, _| {
                once.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            hooks.on_post_gain(COPPER, "every", Persistence::Persistent, move |_, _| {
                every.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        })
        .unwrap();

    let mut scope = fx.game.scope(p);
    scope.gain(COPPER).unwrap();
    scope.gain(COPPER).unwrap();
    scope.gain(ESTATE).unwrap();

    assert_eq!(once_seen.load(Ordering::SeqCst), 1);
    assert_eq!(every_seen.load(Ordering::SeqCst), 2);
}

#[test]
fn test_turn_hooks_end_with_turn() {
    let mut fx = Fixture::new(GameConfig::new(3), 2, &HINTERLANDS_KINGDOM);
    let (p, q) = (fx.first(), fx.second());
    assert!(matches!(
        fx.game.with_hooks(HookScope::Turn, |_| ()),
        Err(EngineError::NoActiveTurn)
    ));

    let (seen, fired) = counter();
    fx.game.begin_turn().unwrap();
    fx.game
        .with_hooks(HookScope::Turn, move |hooks| {
            hooks.on_treasure(COPPER, "count", Persistence::Persistent, move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
        .unwrap();
    fx.set_hand(p, &[COPPER, COPPER, ESTATE, ESTATE, ESTATE]);
    fx.game.end_action_phase().unwrap();
    fx.play_all_treasures();
    assert_eq!(fired.load(Ordering::SeqCst), 2);

    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();
    assert_eq!(fx.game.begin_turn().unwrap(), q);
    fx.set_hand(q, &[COPPER, COPPER, COPPER, ESTATE, ESTATE]);
    fx.game.end_action_phase().unwrap();
    fx.play_all_treasures();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn test_merchant_bonus_once() {
    let mut fx = Fixture::new(GameConfig::new(4), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MERCHANT, SILVER, SILVER, COPPER, COPPER]);
    fx.stack_deck(p, &[ESTATE]);

    fx.play(MERCHANT);
    fx.game.end_action_phase().unwrap();
    fx.play_all_treasures();

    assert_eq!(fx.game.turn_view().unwrap().coins, 7);
    assert!(fx.log_contains("played a Silver and gets +1 $ from their Merchant."));
}

#[test]
fn test_duchess_offered_on_duchy() {
    let mut fx = Fixture::new(GameConfig::new(5), 2, &HINTERLANDS_KINGDOM);
    let (p, q) = (fx.first(), fx.second());
    fx.script(p).push(Answer::Yes);
    fx.script(q).push(Answer::No);

    fx.game.scope(p).gain(DUCHY).unwrap();
    fx.game.scope(q).gain(DUCHY).unwrap();

    assert_eq!(fx.count_in(p, Zone::Discard, DUCHESS), 1);
    assert_eq!(fx.game.player(q).count_kind(DUCHESS), 0);
    assert!(fx.log_contains(&format!("{} did not gain a Duchess.", fx.name(q))));

    {
        let mut supply = fx.game.supply();
        while !supply.is_empty(DUCHESS) {
            supply.draw(DUCHESS).unwrap();
        }
    }
    fx.game.scope(q).gain(DUCHY).unwrap();
    assert!(fx.log_contains("There are no Duchesses remaining in the Supply so one cannot be gained."));
}

#[test]
fn test_duchess_top_cards() {
    let mut fx = Fixture::new(GameConfig::new(6), 2, &HINTERLANDS_KINGDOM);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[DUCHESS]);
    fx.stack_deck(p, &[ESTATE]);
    fx.stack_deck(q, &[GOLD]);
    fx.script(p).push(Answer::Yes);
    fx.script(q).push(Answer::No);

    fx.play(DUCHESS);

    assert_eq!(fx.game.turn_view().unwrap().coins, 2);
    assert_eq!(fx.kinds_in(p, Zone::Discard), vec![ESTATE]);
    assert_eq!(fx.kinds_in(q, Zone::Deck).last(), Some(&GOLD));
    assert!(fx.script(p).prompts()[0].contains("the top card of your deck is an Estate"));
}

#[test]
fn test_tunnel_discard_gains_gold() {
    let mut fx = Fixture::new(GameConfig::new(7), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[CELLAR, TUNNEL, COPPER, COPPER, COPPER]);
    fx.script(p).push(Answer::PickMany(vec![TUNNEL])).push(Answer::Yes);

    fx.play(CELLAR);

    assert_eq!(fx.count_in(p, Zone::Discard, TUNNEL), 1);
    assert_eq!(fx.count_in(p, Zone::Discard, GOLD), 1);
    assert!(fx.log_contains(&format!("{} revealed a Tunnel.", fx.name(p))));
}

#[test]
fn test_tunnel_ignores_cleanup() {
    let mut fx = Fixture::new(GameConfig::new(8), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[TUNNEL, ESTATE, ESTATE, ESTATE, ESTATE]);
    fx.game.end_action_phase().unwrap();
    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();

    assert_eq!(fx.game.player(p).count_kind(GOLD), 0);
    assert!(fx.script(p).prompts().is_empty());
}

#[test]
fn test_tunnel_reacts_to_militia_discard() {
    let mut fx = Fixture::new(GameConfig::new(9), 2, &HINTERLANDS_KINGDOM);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MILITIA]);
    fx.set_hand(q, &[TUNNEL, ESTATE, COPPER, COPPER, COPPER]);
    fx.script(q).push(Answer::PickMany(vec![TUNNEL, ESTATE])).push(Answer::Yes);

    fx.play(MILITIA);

    assert_eq!(fx.count_in(q, Zone::Discard, GOLD), 1);
    assert_eq!(fx.game.player(q).mat.count(Zone::Hand), 3);
}

#[test]
fn test_crossroads_actions_only_first_time() {
    let mut fx = Fixture::new(GameConfig::new(10), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[CROSSROADS, CROSSROADS, ESTATE, ESTATE, COPPER]);
    fx.stack_deck(p, &[COPPER, COPPER, COPPER, COPPER]);

    fx.play(CROSSROADS);
    assert_eq!(fx.game.turn_view().unwrap().actions, 3);
    assert_eq!(fx.game.player(p).mat.count(Zone::Hand), 6);

    fx.play(CROSSROADS);
    assert_eq!(fx.game.turn_view().unwrap().actions, 2);
    assert_eq!(fx.game.player(p).mat.count(Zone::Hand), 7);
    assert!(fx.log_contains("has 2 Victory cards in their hand."));
}

#[test]
fn test_peddler_discount_during_buy() {
    let mut fx = Fixture::new(GameConfig::new(11), 2, &PROSPERITY_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[VILLAGE, VILLAGE, COPPER, COPPER, COPPER]);
    fx.stack_deck(p, &[ESTATE, ESTATE]);
    fx.play(VILLAGE);
    fx.play(VILLAGE);
    fx.game.end_action_phase().unwrap();
    fx.play_all_treasures();
    assert_eq!(fx.game.supply().cost(PEDDLER).unwrap(), 8);

    fx.game.open_buying().unwrap();
    assert_eq!(fx.game.supply().cost(PEDDLER).unwrap(), 4);
    fx.game.buy(PEDDLER).unwrap_err();
    fx.game.turn_mut().unwrap().coins += 1;
    fx.game.buy(PEDDLER).unwrap();

    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();
    assert_eq!(fx.game.supply().cost(PEDDLER).unwrap(), 8);
}

#[test]
fn test_bank_counts_treasures_in_play() {
    let mut fx = Fixture::new(GameConfig::new(12), 2, &PROSPERITY_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    let hand = fx.set_hand(p, &[BANK, COPPER, SILVER, ESTATE, ESTATE]);
    fx.game.end_action_phase().unwrap();

    // Bank first in the request; it still resolves last.
    let ids: Vec<_> = hand.iter().take(3).map(|card| card.id).collect();
    fx.game.play_treasures(&ids).unwrap();

    assert_eq!(fx.game.turn_view().unwrap().coins, 1 + 2 + 3);
    assert_eq!(fx.kinds_in(p, Zone::Played).last(), Some(&BANK));
}

/// Victims discarding Tunnels at the same time must each find the
/// persistent Tunnel hook, even while another victim is still answering.
#[test]
fn test_concurrent_tunnel_discards_each_gain_gold() {
    let config = GameConfig::new(11).with_simultaneous_reactions(true);
    let mut fx = Fixture::new(config, 3, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MILITIA]);
    let victims = fx.game.others(p);
    for victim in &victims {
        fx.set_hand(*victim, &[TUNNEL, COPPER, COPPER, ESTATE, ESTATE]);
        fx.script(*victim)
            .push(Answer::PickMany(vec![TUNNEL, ESTATE]))
            .push(Answer::YesAfter(Duration::from_millis(200)));
    }

    fx.play(MILITIA);

    for victim in &victims {
        assert_eq!(fx.count_in(*victim, Zone::Discard, GOLD), 1, "{}", fx.name(*victim));
        assert_eq!(fx.script(*victim).pending(), 0);
        assert!(fx.log_contains(&format!("{} revealed a Tunnel.", fx.name(*victim))));
    }
    assert_eq!(fx.game.table().hooks().post_discard.len(), 1);
}

fn pass_turn(fx: &mut Fixture) {
    fx.game.end_action_phase().unwrap();
    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();
}

#[test]
fn test_pre_turn_hooks_wait_for_their_owner() {
    let mut fx = Fixture::new(GameConfig::new(12), 2, &HINTERLANDS_KINGDOM);
    let (p, q) = (fx.first(), fx.second());
    let (seen, fired) = counter();
    fx.game
        .with_hooks(HookScope::Game, move |hooks| {
            hooks.on_pre_turn(q, SMITHY, "bonus", Persistence::Once, move |scope| {
                seen.fetch_add(1, Ordering::SeqCst);
                scope.turn_mut()?.coins += 2;
                Ok(())
            })
        })
        .unwrap();

    assert_eq!(fx.game.begin_turn().unwrap(), p);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(fx.game.turn_view().unwrap().coins, 0);
    pass_turn(&mut fx);

    assert_eq!(fx.game.begin_turn().unwrap(), q);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(fx.game.turn_view().unwrap().coins, 2);
    assert!(fx.game.table().hooks().pre_turn.is_empty());
    pass_turn(&mut fx);

    fx.game.begin_turn().unwrap();
    pass_turn(&mut fx);
    fx.game.begin_turn().unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_persistent_pre_turn_hook_fires_every_turn() {
    let mut fx = Fixture::new(GameConfig::new(13), 2, &HINTERLANDS_KINGDOM);
    let p = fx.first();
    let (seen, fired) = counter();
    fx.game
        .with_hooks(HookScope::Game, move |hooks| {
            hooks.on_pre_turn(p, SMITHY, "every turn", Persistence::Persistent, move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
        .unwrap();

    for _ in 0..4 {
        fx.game.begin_turn().unwrap();
        pass_turn(&mut fx);
    }

    assert_eq!(fired.load(Ordering::SeqCst), 2);
    assert_eq!(fx.game.table().hooks().pre_turn.len(), 1);
}
