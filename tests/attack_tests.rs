//! Attacks, reactions and concurrent victim resolution.

mod common;

use common::{Answer, Fixture, STANDARD_KINGDOM};
use dominion_engine::core::GameConfig;
use dominion_engine::expansions::base::{COPPER, CURSE, ESTATE, GOLD, SILVER};
use dominion_engine::expansions::dominion::{
    BANDIT, BUREAUCRAT, CELLAR, LABORATORY, MARKET, MILITIA, MOAT, SMITHY, VILLAGE, WITCH,
};
use dominion_engine::zones::Zone;

#[test]
fn test_militia_discards_down_to_three() {
    let mut fx = Fixture::standard(1);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MILITIA, COPPER, COPPER, COPPER, COPPER]);
    fx.set_hand(q, &[COPPER, COPPER, ESTATE, ESTATE, SILVER]);
    fx.script(q).push(Answer::PickMany(vec![ESTATE, ESTATE]));

    fx.play(MILITIA);

    assert_eq!(fx.game.turn_view().unwrap().coins, 2);
    assert_eq!(fx.kinds_in(q, Zone::Hand), vec![COPPER, COPPER, SILVER]);
    assert_eq!(fx.count_in(q, Zone::Discard, ESTATE), 2);
    assert!(fx.log_contains(&format!("{} must discard 2 cards.", fx.name(q))));
    assert!(fx.log_contains(&format!("{} must react to {}'s Militia.", fx.name(q), fx.name(p))));
    assert_eq!(fx.script(q).pending(), 0);
}

#[test]
fn test_small_hand_is_spared() {
    let mut fx = Fixture::standard(2);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MILITIA]);
    fx.set_hand(q, &[COPPER, ESTATE]);

    fx.play(MILITIA);

    assert_eq!(fx.game.player(q).mat.count(Zone::Hand), 2);
    assert!(fx.log_contains(&format!("{} only has 2 cards in their hand.", fx.name(q))));
}

#[test]
fn test_moat_grants_immunity() {
    let mut fx = Fixture::standard(3);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[WITCH]);
    fx.set_hand(q, &[MOAT, COPPER, COPPER, ESTATE, ESTATE]);
    fx.script(q).push(Answer::Pick(MOAT));

    fx.play(WITCH);

    assert_eq!(fx.game.player(q).count_kind(CURSE), 0);
    assert_eq!(fx.game.player(q).mat.count(Zone::Hand), 5);
    assert!(fx.log_contains(&format!("{} revealed a Moat in reaction to {}'s Witch.", fx.name(q), fx.name(p))));
    assert!(fx.log_contains(&format!("{} is immune to the effects of {}'s Witch.", fx.name(q), fx.name(p))));
    let prompts = fx.script(q).prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("You have 1 playable Reaction card in your hand."));
}

#[test]
fn test_declined_reaction() {
    let mut fx = Fixture::standard(4);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MILITIA]);
    fx.set_hand(q, &[MOAT, COPPER, COPPER, ESTATE, ESTATE]);
    fx.script(q).push(Answer::Skip).push(Answer::PickMany(vec![ESTATE, ESTATE]));

    fx.play(MILITIA);

    assert_eq!(fx.kinds_in(q, Zone::Hand), vec![MOAT, COPPER, COPPER]);
    assert!(fx.script(q).saw("You forfeited your opportunity to react."));
}

#[test]
fn test_witch_curses_in_turn_order() {
    let mut fx = Fixture::new(GameConfig::new(5), 3, &STANDARD_KINGDOM);
    let p = fx.first();
    let victims = fx.game.others(p);
    {
        let mut supply = fx.game.supply();
        assert_eq!(supply.population(CURSE), Some(20));
        for _ in 0..19 {
            supply.draw(CURSE).unwrap();
        }
    }
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[WITCH]);
    for victim in &victims {
        fx.set_hand(*victim, &[COPPER, COPPER, COPPER, ESTATE, ESTATE]);
    }

    fx.play(WITCH);

    assert_eq!(fx.count_in(victims[0], Zone::Discard, CURSE), 1);
    assert_eq!(fx.game.player(victims[1]).count_kind(CURSE), 0);
    assert!(fx.log_contains(&format!(
        "{} could not gain a Curse since that supply pile is empty.",
        fx.name(victims[1])
    )));
    assert_eq!(fx.game.player(p).mat.count(Zone::Hand), 2);
}

#[test]
fn test_bureaucrat() {
    let kingdom = [CELLAR, MOAT, VILLAGE, BUREAUCRAT, MILITIA, SMITHY, BANDIT, MARKET, WITCH, LABORATORY];
    let mut fx = Fixture::new(GameConfig::new(6), 2, &kingdom);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[BUREAUCRAT]);
    fx.set_hand(q, &[COPPER, ESTATE, COPPER, ESTATE, COPPER]);

    fx.play(BUREAUCRAT);

    assert_eq!(fx.kinds_in(p, Zone::Deck).last(), Some(&SILVER));
    assert_eq!(fx.kinds_in(q, Zone::Deck).last(), Some(&ESTATE));
    assert_eq!(fx.game.player(q).mat.count(Zone::Hand), 4);
    assert!(fx.script(q).prompts().is_empty());
}

#[test]
fn test_bandit_trashes_chosen_treasure() {
    let kingdom = [CELLAR, MOAT, VILLAGE, BUREAUCRAT, MILITIA, SMITHY, BANDIT, MARKET, WITCH, LABORATORY];
    let mut fx = Fixture::new(GameConfig::new(7), 2, &kingdom);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[BANDIT]);
    fx.stack_deck(q, &[GOLD, SILVER]);
    fx.script(q).push(Answer::Option(1));

    fx.play(BANDIT);

    assert_eq!(fx.count_in(p, Zone::Discard, GOLD), 1);
    assert_eq!(fx.game.supply().trash_count(SILVER), 1);
    assert_eq!(fx.count_in(q, Zone::Discard, GOLD), 1);
    assert_eq!(fx.game.player(q).count_kind(SILVER), 0);
}

#[test]
fn test_bandit_spares_copper() {
    let kingdom = [CELLAR, MOAT, VILLAGE, BUREAUCRAT, MILITIA, SMITHY, BANDIT, MARKET, WITCH, LABORATORY];
    let mut fx = Fixture::new(GameConfig::new(8), 2, &kingdom);
    let (p, q) = (fx.first(), fx.second());
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[BANDIT]);
    fx.stack_deck(q, &[COPPER, ESTATE]);

    fx.play(BANDIT);

    assert_eq!(fx.game.supply().trashed().count(), 0);
    assert_eq!(fx.kinds_in(q, Zone::Discard), vec![COPPER, ESTATE]);
}

fn militia_round(simultaneous: bool) -> Fixture {
    let config = GameConfig::new(9).with_simultaneous_reactions(simultaneous);
    let mut fx = Fixture::new(config, 4, &STANDARD_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[MILITIA]);
    fx.play(MILITIA);
    fx
}

#[test]
fn test_concurrent_and_sequential_agree() {
    let sequential = militia_round(false);
    let concurrent = militia_round(true);
    let p = sequential.first();

    for victim in sequential.game.others(p) {
        assert_eq!(sequential.game.player(victim).mat.count(Zone::Hand), 3);
        assert_eq!(concurrent.game.player(victim).mat.count(Zone::Hand), 3);
        assert_eq!(
            sequential.game.player(victim).mat.zone(Zone::Discard),
            concurrent.game.player(victim).mat.zone(Zone::Discard)
        );
    }
    assert!(sequential.log_contains("must react to"));
    assert!(!concurrent.log_contains("must react to"));
}

#[test]
fn test_witch_never_concurrent() {
    let mut fx = Fixture::new(GameConfig::new(10).with_simultaneous_reactions(true), 3, &STANDARD_KINGDOM);
    let p = fx.first();
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[WITCH]);

    fx.play(WITCH);

    assert!(fx.log_contains("must react to"));
    for victim in fx.game.others(p) {
        assert_eq!(fx.game.player(victim).count_kind(CURSE), 1);
    }
}

#[test]
fn test_witch_with_no_curses_left() {
    let mut fx = Fixture::standard(11);
    let p = fx.first();
    let q = fx.second();
    {
        let mut supply = fx.game.supply();
        while supply.draw(CURSE).is_ok() {}
        assert!(supply.is_empty(CURSE));
    }
    fx.game.begin_turn().unwrap();
    fx.set_hand(p, &[WITCH, COPPER]);
    fx.set_hand(q, &[COPPER, COPPER, COPPER, ESTATE, ESTATE]);

    fx.play(WITCH);

    assert_eq!(fx.game.player(p).mat.count(Zone::Hand), 3);
    assert_eq!(fx.game.player(q).count_kind(CURSE), 0);
    assert!(fx.log_contains(&format!(
        "{} could not gain a Curse since that supply pile is empty.",
        fx.name(q)
    )));
    assert_eq!(fx.game.check_end(), None);

    fx.game.end_action_phase().unwrap();
    fx.play_all_treasures();
    fx.game.end_buy_phase().unwrap();
    fx.game.cleanup().unwrap();
    assert!(!fx.game.is_over());
    assert_eq!(fx.game.current_player(), q);

    // Two more empty piles end it.
    {
        let mut supply = fx.game.supply();
        while supply.draw(VILLAGE).is_ok() {}
        while supply.draw(CELLAR).is_ok() {}
    }
    assert!(fx.game.check_end().is_some_and(|reason| reason.starts_with("Three Supply piles are empty")));
}
