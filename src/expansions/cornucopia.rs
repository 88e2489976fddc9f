//! A slice of Cornucopia, plus Young Witch and its Bane pile.
//!
//! Horse Traders sets itself aside when attacked and comes back through a
//! pre-turn hook owned by the player who set it aside. Young Witch asks for
//! one extra kingdom pile, the Bane, once the kingdom is known.

use rustc_hash::FxHashSet;

use crate::cards::{
    ActionBonus, Attacking, Card, CardDefinition, CardEntry, CardId, CardRegistry, CardType, Playable, Reacting,
    Reaction, Scored,
};
use crate::core::{GameRng, Result};
use crate::expansions::base::CURSE;
use crate::hooks::{HookScope, Persistence};
use crate::rules::{article, name_list, plural, Attack, Game, Player, PlayerScope, SupplyFilter};
use crate::zones::{Zone, ZonePosition};

use super::{register_all, Expansion, ExtraPile};

pub const HAMLET: CardId = CardId::new(500);
pub const FORTUNE_TELLER: CardId = CardId::new(501);
pub const MENAGERIE: CardId = CardId::new(502);
pub const FARMING_VILLAGE: CardId = CardId::new(503);
pub const HORSE_TRADERS: CardId = CardId::new(504);
pub const REMAKE: CardId = CardId::new(505);
pub const YOUNG_WITCH: CardId = CardId::new(506);
pub const HARVEST: CardId = CardId::new(507);
pub const HUNTING_PARTY: CardId = CardId::new(508);
pub const FAIRGROUNDS: CardId = CardId::new(509);

/// Supply role of the pile picked for Young Witch.
pub const BANE: &str = "Bane";

const KINGDOM: [CardId; 10] = [
    HAMLET,
    FORTUNE_TELLER,
    MENAGERIE,
    FARMING_VILLAGE,
    HORSE_TRADERS,
    REMAKE,
    YOUNG_WITCH,
    HARVEST,
    HUNTING_PARTY,
    FAIRGROUNDS,
];

#[derive(Clone, Copy, Debug, Default)]
pub struct CornucopiaSet;

impl CornucopiaSet {
    pub const NAME: &'static str = "Cornucopia";
}

fn distinct_kinds<'a>(cards: impl IntoIterator<Item = &'a Card>) -> usize {
    cards.into_iter().map(|card| card.kind).collect::<FxHashSet<_>>().len()
}

fn card_names(registry: &CardRegistry, cards: &[Card]) -> Vec<String> {
    cards.iter().map(|card| registry.name(card.kind)).collect()
}

struct Hamlet;

impl Hamlet {
    fn discard_for(scope: &mut PlayerScope<'_>, reward: &str) -> Result<bool> {
        if !scope.yes_or_no(&format!("Would you like to discard a card for {reward}?")) {
            return Ok(false);
        }
        let prompt = format!("Which card would you like to discard for {reward}?");
        let Some(card) = scope.choose_from_hand(&prompt, |_| true, false)? else {
            return Ok(false);
        };
        scope.discard(card.id)?;
        scope.broadcast(format!(
            "{} discarded {} for {reward}.",
            scope.name(),
            article(&scope.card_name(card.kind))
        ));
        Ok(true)
    }
}

impl Playable for Hamlet {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        if Self::discard_for(&mut scope, "+1 Action")? {
            scope.turn_mut()?.actions += 1;
        }
        if Self::discard_for(&mut scope, "+1 Buy")? {
            scope.turn_mut()?.buys += 1;
        }
        Ok(())
    }
}

struct FortuneTeller;

impl Attacking for FortuneTeller {
    fn attack_effect(&self, _attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()> {
        let registry = victim.registry();
        let mut passed = Vec::new();
        let mut found = None;
        while let Some(card) = victim.take_from_deck() {
            if registry.is(card.kind, CardType::Victory) || registry.is(card.kind, CardType::Curse) {
                found = Some(card);
                break;
            }
            passed.push(card);
        }
        match found {
            Some(card) => {
                victim.put_on_deck(card);
                victim.broadcast(format!(
                    "{} put {} on top of their deck.",
                    victim.name(),
                    article(&registry.name(card.kind))
                ));
            }
            None => victim.broadcast(format!("{} has no more cards to draw from.", victim.name())),
        }
        if !passed.is_empty() {
            victim.broadcast(format!(
                "{} discarded {}.",
                victim.name(),
                name_list(&card_names(registry, &passed))
            ));
            for card in passed {
                victim.discard_card(card)?;
            }
        }
        Ok(())
    }

    fn prompt(&self, _attack: &Attack) -> Option<String> {
        Some("Each other player reveals cards from the top of their deck until they reveal a Victory card or a Curse. They put it on top and discard the rest.".into())
    }

    fn allows_simultaneous(&self) -> bool {
        true
    }
}

struct Menagerie;

impl Playable for Menagerie {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        scope.reveal_hand();
        let hand = scope.mat().zone(Zone::Hand);
        let all_different = distinct_kinds(hand) == hand.len();
        scope.draw(if all_different { 3 } else { 1 });
        Ok(())
    }
}

struct FarmingVillage;

impl Playable for FarmingVillage {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let registry = scope.registry();
        let mut passed = Vec::new();
        let mut found = None;
        while let Some(card) = scope.take_from_deck() {
            if registry.is(card.kind, CardType::Treasure) || registry.is(card.kind, CardType::Action) {
                found = Some(card);
                break;
            }
            passed.push(card);
        }
        match found {
            Some(card) => {
                scope.place(card, Zone::Hand);
                scope.broadcast(format!(
                    "{} put {} into their hand.",
                    scope.name(),
                    article(&registry.name(card.kind))
                ));
            }
            None => scope.broadcast(format!("{} has no more cards to draw from.", scope.name())),
        }
        if !passed.is_empty() {
            scope.broadcast(format!("{} discarded {}.", scope.name(), name_list(&card_names(registry, &passed))));
            for card in passed {
                scope.discard_card(card)?;
            }
        }
        Ok(())
    }
}

struct HorseTraders;

impl Playable for HorseTraders {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let hand = scope.mat().zone(Zone::Hand).to_vec();
        let chosen = scope.choose_exactly("You played a Horse Traders. Select 2 cards to discard.", &hand, 2)?;
        if chosen.is_empty() {
            scope.broadcast(format!("{} did not have any cards to discard.", scope.name()));
            return Ok(());
        }
        for card in &chosen {
            scope.discard(card.id)?;
        }
        let names = card_names(scope.registry(), &chosen);
        scope.broadcast(format!("{} discarded {}.", scope.name(), name_list(&names)));
        Ok(())
    }
}

/// Setting Horse Traders aside is not immunity; every copy in hand may be
/// set aside against the same attack.
impl Reacting for HorseTraders {
    fn react(&self, victim: &mut PlayerScope<'_>, _attack: &Attack, card: Card) -> Result<Reaction> {
        let prompt = "Would you like to set this Horse Traders aside from your hand? If you do, then at the start of your next turn, you will return it to your hand and get +1 Card.";
        if !victim.yes_or_no(prompt) {
            return Ok(Reaction::declined());
        }
        victim
            .mat_mut()
            .move_card(card.id, Zone::Hand, Zone::SetAside, ZonePosition::Top)?;
        victim.broadcast(format!("{} set a Horse Traders aside from their hand for next turn.", victim.name()));
        let owner = victim.id();
        victim.with_hooks(HookScope::Game, |hooks| {
            hooks.on_pre_turn(owner, HORSE_TRADERS, "Horse Traders", Persistence::Once, move |scope| {
                scope.broadcast(format!(
                    "{} draws an additional card from the Horse Traders they set aside.",
                    scope.name()
                ));
                scope.draw(1);
                scope.broadcast(format!(
                    "{} returns the Horse Traders they set aside to their hand.",
                    scope.name()
                ));
                scope
                    .mat_mut()
                    .move_card(card.id, Zone::SetAside, Zone::Hand, ZonePosition::Top)?;
                Ok(())
            })
        })?;
        Ok(Reaction::revealed())
    }
}

struct Remake;

impl Playable for Remake {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        for ordinal in ["first", "second"] {
            let prompt = format!("You played a Remake. Choose the {ordinal} card from your hand to trash.");
            let Some(card) = scope.choose_from_hand(&prompt, |_| true, true)? else {
                return Ok(());
            };
            let cost = scope.cost_of(card.kind)? + 1;
            scope.trash(card.id)?;
            let prompt = format!(
                "You trashed {} with your Remake. Choose a card costing exactly {cost} $ to gain.",
                article(&scope.card_name(card.kind))
            );
            if let Some(kind) = scope.choose_from_supply(&prompt, &SupplyFilter::exactly(cost), true)? {
                scope.gain(kind)?;
            }
        }
        Ok(())
    }
}

struct YoungWitch;

impl Playable for YoungWitch {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let hand = scope.mat().zone(Zone::Hand).to_vec();
        for card in scope.choose_exactly("You played a Young Witch. Select 2 cards to discard.", &hand, 2)? {
            scope.discard(card.id)?;
            scope.broadcast(format!("{} discarded {}.", scope.name(), article(&scope.card_name(card.kind))));
        }
        Ok(())
    }
}

/// Resolved in turn order, like Witch.
impl Attacking for YoungWitch {
    fn attack_effect(&self, attack: &Attack, victim: &mut PlayerScope<'_>) -> Result<()> {
        let bane = victim.table().supply().kind_with_role(BANE);
        if let Some(bane) = bane.filter(|kind| victim.mat().zone(Zone::Hand).iter().any(|card| card.kind == *kind)) {
            let name = victim.card_name(bane);
            let prompt = format!(
                "{} played a Young Witch. Would you like to reveal {} (the Bane) from your hand to avoid gaining a Curse?",
                attack.attacker_name,
                article(&name)
            );
            if victim.yes_or_no(&prompt) {
                victim.broadcast(format!(
                    "{} revealed {} (the Bane) and does not gain a Curse.",
                    victim.name(),
                    article(&name)
                ));
                return Ok(());
            }
        }
        victim.gain(CURSE)?;
        Ok(())
    }

    fn prompt(&self, _attack: &Attack) -> Option<String> {
        Some("Each other player may reveal a Bane card from their hand; if they don't, they gain a Curse.".into())
    }
}

struct Harvest;

impl Playable for Harvest {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let mut revealed = Vec::with_capacity(4);
        for _ in 0..4 {
            let Some(card) = scope.take_from_deck() else {
                break;
            };
            revealed.push(card);
        }
        let different = distinct_kinds(&revealed) as u32;
        scope.broadcast(format!(
            "{} played a Harvest and revealed {} ({}).",
            scope.name(),
            name_list(&card_names(scope.registry(), &revealed)),
            plural(different, "differently named card")
        ));
        for card in revealed {
            scope.discard_card(card)?;
        }
        scope.turn_mut()?.coins += different;
        Ok(())
    }
}

struct HuntingParty;

impl Playable for HuntingParty {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        scope.reveal_hand();
        let in_hand: FxHashSet<CardId> = scope.mat().zone(Zone::Hand).iter().map(|card| card.kind).collect();
        let mut copies = Vec::new();
        let mut found = None;
        while let Some(card) = scope.take_from_deck() {
            if !in_hand.contains(&card.kind) {
                found = Some(card);
                break;
            }
            copies.push(card);
        }
        let registry = scope.registry();
        if !copies.is_empty() {
            scope.broadcast(format!(
                "{} revealed and discarded {} with their Hunting Party.",
                scope.name(),
                name_list(&card_names(registry, &copies))
            ));
            for card in copies {
                scope.discard_card(card)?;
            }
        }
        match found {
            Some(card) => {
                scope.place(card, Zone::Hand);
                scope.broadcast(format!(
                    "{} put {} into their hand with their Hunting Party.",
                    scope.name(),
                    article(&registry.name(card.kind))
                ));
            }
            None => scope.broadcast(format!(
                "{} had no cards left to draw from and did not put anything into their hand.",
                scope.name()
            )),
        }
        Ok(())
    }
}

/// Two points per five differently named cards owned.
struct Fairgrounds;

impl Scored for Fairgrounds {
    fn points(&self, player: &Player) -> i32 {
        (2 * (distinct_kinds(player.all_cards()) / 5)) as i32
    }
}

fn action(id: CardId, name: &str, cost: u32, bonus: ActionBonus, text: &str) -> CardDefinition {
    CardDefinition::action(id, name, cost, bonus).with_description(text)
}

impl Expansion for CornucopiaSet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        let none = ActionBonus::new();
        register_all(
            registry,
            [
                CardEntry::new(action(
                    HAMLET,
                    "Hamlet",
                    2,
                    none.cards(1).actions(1),
                    "You may discard a card for +1 Action. You may discard a card for +1 Buy.",
                ))
                .with_play(Hamlet),
                CardEntry::new(
                    action(
                        FORTUNE_TELLER,
                        "Fortune Teller",
                        3,
                        none.coins(2),
                        "Each other player reveals cards from the top of their deck until they reveal a Victory card or a Curse. They put it on top and discard the rest.",
                    )
                    .with_type(CardType::Attack),
                )
                .with_attack(FortuneTeller),
                CardEntry::new(action(
                    MENAGERIE,
                    "Menagerie",
                    3,
                    none.actions(1),
                    "Reveal your hand. If the revealed cards all have different names, +3 Cards. Otherwise, +1 Card.",
                ))
                .with_play(Menagerie),
                CardEntry::new(action(
                    FARMING_VILLAGE,
                    "Farming Village",
                    4,
                    none.actions(2),
                    "Reveal cards from your deck until you reveal a Treasure or Action card. Put that card into your hand and discard the rest.",
                ))
                .with_play(FarmingVillage),
                CardEntry::new(
                    action(
                        HORSE_TRADERS,
                        "Horse Traders",
                        4,
                        none.buys(1).coins(3),
                        "Discard 2 cards. When another player plays an Attack card, you may first set this aside from your hand. If you do, then at the start of your next turn, +1 Card and return this to your hand.",
                    )
                    .with_type(CardType::Reaction),
                )
                .with_play(HorseTraders)
                .with_reaction(HorseTraders),
                CardEntry::new(action(
                    REMAKE,
                    "Remake",
                    4,
                    none,
                    "Do this twice: Trash a card from your hand, then gain a card costing exactly 1 $ more than it.",
                ))
                .with_play(Remake),
                CardEntry::new(
                    action(
                        YOUNG_WITCH,
                        "Young Witch",
                        4,
                        none.cards(2),
                        "Discard 2 cards. Each other player may reveal a Bane card from their hand; if they don't, they gain a Curse. Setup: Add an extra Kingdom card pile costing 2 $ or 3 $ to the Supply. Cards from that pile are Bane cards.",
                    )
                    .with_type(CardType::Attack),
                )
                .with_play(YoungWitch)
                .with_attack(YoungWitch),
                CardEntry::new(action(
                    HARVEST,
                    "Harvest",
                    5,
                    none,
                    "Reveal the top 4 cards of your deck, then discard them. +1 $ per differently named card revealed.",
                ))
                .with_play(Harvest),
                CardEntry::new(action(
                    HUNTING_PARTY,
                    "Hunting Party",
                    5,
                    none.cards(1).actions(1),
                    "Reveal your hand. Reveal cards from your deck until you reveal one that isn't a copy of one in your hand. Put it into your hand and discard the rest.",
                ))
                .with_play(HuntingParty),
                CardEntry::new(
                    CardDefinition::new(FAIRGROUNDS, "Fairgrounds", 6)
                        .with_type(CardType::Victory)
                        .with_description("Worth 2 victory points per 5 differently named cards you have (round down)."),
                )
                .with_score(Fairgrounds),
            ],
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        KINGDOM.to_vec()
    }

    /// Young Witch brings a Bane: an unused kingdom candidate costing 2 $
    /// or 3 $.
    fn additional_kingdom_cards(
        &self,
        kingdom: &[CardId],
        candidates: &[CardId],
        registry: &CardRegistry,
        rng: &mut GameRng,
    ) -> Vec<ExtraPile> {
        if !kingdom.contains(&YOUNG_WITCH) {
            return Vec::new();
        }
        let eligible: Vec<CardId> = candidates
            .iter()
            .copied()
            .filter(|kind| !kingdom.contains(kind))
            .filter(|kind| registry.definition(*kind).is_ok_and(|def| (2..=3).contains(&def.cost)))
            .collect();
        match rng.choose(&eligible) {
            Some(kind) => {
                tracing::debug!(bane = %registry.name(*kind), "Young Witch Bane chosen");
                vec![ExtraPile { kind: *kind, role: BANE }]
            }
            None => {
                tracing::warn!("no kingdom card costing 2 or 3 is left to be Young Witch's Bane");
                Vec::new()
            }
        }
    }
}
