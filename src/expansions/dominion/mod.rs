//! The Dominion base game kingdom, second edition plus the first-edition
//! cards it replaced.

mod attacks;
mod kingdom;

use crate::cards::{ActionBonus, CardDefinition, CardEntry, CardId, CardRegistry, CardType};
use crate::core::Result;

use super::{register_all, Expansion};

pub const CELLAR: CardId = CardId::new(100);
pub const CHAPEL: CardId = CardId::new(101);
pub const MOAT: CardId = CardId::new(102);
pub const HARBINGER: CardId = CardId::new(103);
pub const MERCHANT: CardId = CardId::new(104);
pub const VASSAL: CardId = CardId::new(105);
pub const VILLAGE: CardId = CardId::new(106);
pub const WORKSHOP: CardId = CardId::new(107);
pub const BUREAUCRAT: CardId = CardId::new(108);
pub const GARDENS: CardId = CardId::new(109);
pub const MILITIA: CardId = CardId::new(110);
pub const MONEYLENDER: CardId = CardId::new(111);
pub const POACHER: CardId = CardId::new(112);
pub const REMODEL: CardId = CardId::new(113);
pub const SMITHY: CardId = CardId::new(114);
pub const THRONE_ROOM: CardId = CardId::new(115);
pub const BANDIT: CardId = CardId::new(116);
pub const COUNCIL_ROOM: CardId = CardId::new(117);
pub const FESTIVAL: CardId = CardId::new(118);
pub const LABORATORY: CardId = CardId::new(119);
pub const LIBRARY: CardId = CardId::new(120);
pub const MARKET: CardId = CardId::new(121);
pub const MINE: CardId = CardId::new(122);
pub const SENTRY: CardId = CardId::new(123);
pub const WITCH: CardId = CardId::new(124);
pub const ARTISAN: CardId = CardId::new(125);
pub const CHANCELLOR: CardId = CardId::new(126);
pub const WOODCUTTER: CardId = CardId::new(127);
pub const FEAST: CardId = CardId::new(128);
pub const ADVENTURER: CardId = CardId::new(129);

#[derive(Clone, Copy, Debug, Default)]
pub struct DominionSet;

impl DominionSet {
    pub const NAME: &'static str = "Dominion";
}

fn action(id: CardId, name: &str, cost: u32, bonus: ActionBonus, text: &str) -> CardDefinition {
    CardDefinition::action(id, name, cost, bonus).with_description(text)
}

fn attack(id: CardId, name: &str, cost: u32, bonus: ActionBonus, text: &str) -> CardDefinition {
    action(id, name, cost, bonus, text).with_type(CardType::Attack)
}

impl Expansion for DominionSet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        let none = ActionBonus::new();
        register_all(
            registry,
            [
                CardEntry::new(action(CELLAR, "Cellar", 2, none.actions(1), "Discard any number of cards, then draw that many."))
                    .with_play(kingdom::Cellar),
                CardEntry::new(action(CHAPEL, "Chapel", 2, none, "Trash up to 4 cards from your hand."))
                    .with_play(kingdom::Chapel),
                CardEntry::new(
                    action(
                        MOAT,
                        "Moat",
                        2,
                        none.cards(2),
                        "When another player plays an Attack card, you may first reveal this from your hand, to be unaffected by it.",
                    )
                    .with_type(CardType::Reaction),
                )
                .with_reaction(attacks::Moat),
                CardEntry::new(action(
                    HARBINGER,
                    "Harbinger",
                    3,
                    none.cards(1).actions(1),
                    "Look through your discard pile. You may put a card from it onto your deck.",
                ))
                .with_play(kingdom::Harbinger),
                CardEntry::new(action(
                    MERCHANT,
                    "Merchant",
                    3,
                    none.cards(1).actions(1),
                    "The first time you play a Silver this turn, +1 $.",
                ))
                .with_play(kingdom::Merchant),
                CardEntry::new(action(
                    VASSAL,
                    "Vassal",
                    3,
                    none.coins(2),
                    "Discard the top card of your deck. If it's an Action card, you may play it.",
                ))
                .with_play(kingdom::Vassal),
                CardEntry::new(action(VILLAGE, "Village", 3, none.cards(1).actions(2), "")),
                CardEntry::new(action(WORKSHOP, "Workshop", 3, none, "Gain a card costing up to 4 $."))
                    .with_play(kingdom::Workshop),
                CardEntry::new(attack(
                    BUREAUCRAT,
                    "Bureaucrat",
                    4,
                    none,
                    "Gain a Silver onto your deck. Each other player reveals a Victory card from their hand and puts it onto their deck (or reveals a hand with no Victory cards).",
                ))
                .with_play(attacks::Bureaucrat)
                .with_attack(attacks::Bureaucrat),
                CardEntry::new(
                    CardDefinition::new(GARDENS, "Gardens", 4)
                        .with_type(CardType::Victory)
                        .with_description("Worth 1 victory point per 10 cards you have (round down)."),
                )
                .with_score(kingdom::Gardens),
                CardEntry::new(attack(
                    MILITIA,
                    "Militia",
                    4,
                    none.coins(2),
                    "Each other player discards down to 3 cards in hand.",
                ))
                .with_attack(attacks::Militia),
                CardEntry::new(action(MONEYLENDER, "Moneylender", 4, none, "You may trash a Copper from your hand for +3 $."))
                    .with_play(kingdom::Moneylender),
                CardEntry::new(action(
                    POACHER,
                    "Poacher",
                    4,
                    none.cards(1).actions(1).coins(1),
                    "Discard a card per empty Supply pile.",
                ))
                .with_play(kingdom::Poacher),
                CardEntry::new(action(
                    REMODEL,
                    "Remodel",
                    4,
                    none,
                    "Trash a card from your hand. Gain a card costing up to 2 $ more than it.",
                ))
                .with_play(kingdom::Remodel),
                CardEntry::new(action(SMITHY, "Smithy", 4, none.cards(3), "")),
                CardEntry::new(action(
                    THRONE_ROOM,
                    "Throne Room",
                    4,
                    none,
                    "You may play an Action card from your hand twice.",
                ))
                .with_play(kingdom::ThroneRoom),
                CardEntry::new(attack(
                    BANDIT,
                    "Bandit",
                    5,
                    none,
                    "Gain a Gold. Each other player reveals the top 2 cards of their deck, trashes a revealed Treasure other than Copper, and discards the rest.",
                ))
                .with_play(attacks::Bandit)
                .with_attack(attacks::Bandit),
                CardEntry::new(action(
                    COUNCIL_ROOM,
                    "Council Room",
                    5,
                    none.cards(4).buys(1),
                    "Each other player draws a card.",
                ))
                .with_play(kingdom::CouncilRoom),
                CardEntry::new(action(FESTIVAL, "Festival", 5, none.actions(2).buys(1).coins(2), "")),
                CardEntry::new(action(LABORATORY, "Laboratory", 5, none.cards(2).actions(1), "")),
                CardEntry::new(action(
                    LIBRARY,
                    "Library",
                    5,
                    none,
                    "Draw until you have 7 cards in hand, skipping any Action cards you choose to; set those aside, discarding them afterwards.",
                ))
                .with_play(kingdom::Library),
                CardEntry::new(action(MARKET, "Market", 5, none.cards(1).actions(1).buys(1).coins(1), "")),
                CardEntry::new(action(
                    MINE,
                    "Mine",
                    5,
                    none,
                    "You may trash a Treasure from your hand. Gain a Treasure to your hand costing up to 3 $ more than it.",
                ))
                .with_play(kingdom::Mine),
                CardEntry::new(action(
                    SENTRY,
                    "Sentry",
                    5,
                    none.cards(1).actions(1),
                    "Look at the top 2 cards of your deck. Trash and/or discard any number of them. Put the rest back on top in any order.",
                ))
                .with_play(kingdom::Sentry),
                CardEntry::new(attack(WITCH, "Witch", 5, none.cards(2), "Each other player gains a Curse."))
                    .with_attack(attacks::Witch),
                CardEntry::new(action(
                    ARTISAN,
                    "Artisan",
                    6,
                    none,
                    "Gain a card to your hand costing up to 5 $. Put a card from your hand onto your deck.",
                ))
                .with_play(kingdom::Artisan),
                CardEntry::new(action(
                    CHANCELLOR,
                    "Chancellor",
                    3,
                    none.coins(2),
                    "You may immediately put your deck into your discard pile.",
                ))
                .with_play(kingdom::Chancellor),
                CardEntry::new(action(WOODCUTTER, "Woodcutter", 3, none.buys(1).coins(2), "")),
                CardEntry::new(action(FEAST, "Feast", 4, none, "Trash this card. Gain a card costing up to 5 $."))
                    .with_play(kingdom::Feast),
                CardEntry::new(action(
                    ADVENTURER,
                    "Adventurer",
                    6,
                    none,
                    "Reveal cards from your deck until you reveal 2 Treasure cards. Put those Treasure cards into your hand and discard the other revealed cards.",
                ))
                .with_play(kingdom::Adventurer),
            ],
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        (CELLAR.raw()..=ADVENTURER.raw()).map(CardId::new).collect()
    }
}
