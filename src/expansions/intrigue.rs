//! A slice of Intrigue.

use crate::cards::{ActionBonus, Card, CardDefinition, CardEntry, CardId, CardRegistry, CardType, Playable};
use crate::core::Result;
use crate::rules::{plural, Game};
use crate::zones::Zone;

use super::{register_all, Expansion};

pub const COURTYARD: CardId = CardId::new(200);
pub const SHANTY_TOWN: CardId = CardId::new(201);
pub const CONSPIRATOR: CardId = CardId::new(202);
pub const BRIDGE: CardId = CardId::new(203);

#[derive(Clone, Copy, Debug, Default)]
pub struct IntrigueSet;

impl IntrigueSet {
    pub const NAME: &'static str = "Intrigue";
}

struct Courtyard;

impl Playable for Courtyard {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let prompt = "You played a Courtyard. Choose a card from your hand to put onto your deck.";
        let Some(card) = scope.choose_from_hand(prompt, |_| true, true)? else {
            scope.broadcast(format!("{} does not have any cards in their hand.", scope.name()));
            return Ok(());
        };
        let card = scope.mat_mut().remove(Zone::Hand, card.id)?;
        scope.put_on_deck(card);
        scope.broadcast(format!("{} put a card from their hand onto their deck.", scope.name()));
        Ok(())
    }
}

struct ShantyTown;

impl Playable for ShantyTown {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        scope.reveal_hand();
        let registry = scope.registry();
        let has_action = scope
            .mat()
            .zone(Zone::Hand)
            .iter()
            .any(|card| registry.is(card.kind, CardType::Action));
        if has_action {
            scope.broadcast(format!("{} has Action cards in their hand.", scope.name()));
        } else {
            scope.broadcast(format!("{} has no Action cards in their hand, so they draw 2 cards.", scope.name()));
            scope.draw(2);
        }
        Ok(())
    }
}

struct Conspirator;

impl Playable for Conspirator {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        let mut scope = game.active_scope()?;
        let played = scope.turn()?.actions_played();
        if played < 3 {
            scope.broadcast(format!("{} has played fewer than 3 Actions this turn.", scope.name()));
            return Ok(());
        }
        scope.broadcast(format!(
            "{} has played {} this turn.",
            scope.name(),
            plural(played, "Action")
        ));
        scope.draw(1);
        scope.turn_mut()?.actions += 1;
        Ok(())
    }
}

/// Lowers every cost until Cleanup resets them.
struct Bridge;

impl Playable for Bridge {
    fn action(&self, game: &mut Game, _card: Card) -> Result<()> {
        game.supply().modify_all_costs(-1);
        game.broadcast("This turn, cards cost 1 $ less.");
        Ok(())
    }
}

impl Expansion for IntrigueSet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        let none = ActionBonus::new();
        register_all(
            registry,
            [
                CardEntry::new(
                    CardDefinition::action(COURTYARD, "Courtyard", 2, none.cards(3))
                        .with_description("Put a card from your hand onto your deck."),
                )
                .with_play(Courtyard),
                CardEntry::new(
                    CardDefinition::action(SHANTY_TOWN, "Shanty Town", 3, none.actions(2))
                        .with_description("Reveal your hand. If you have no Action cards in hand, +2 Cards."),
                )
                .with_play(ShantyTown),
                CardEntry::new(
                    CardDefinition::action(CONSPIRATOR, "Conspirator", 4, none.coins(2))
                        .with_description("If you've played 3 or more Actions this turn (counting this), +1 Card and +1 Action."),
                )
                .with_play(Conspirator),
                CardEntry::new(
                    CardDefinition::action(BRIDGE, "Bridge", 4, none.buys(1).coins(1))
                        .with_description("This turn, cards (everywhere) cost 1 $ less, but not less than 0 $."),
                )
                .with_play(Bridge),
            ],
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        vec![COURTYARD, SHANTY_TOWN, CONSPIRATOR, BRIDGE]
    }
}
