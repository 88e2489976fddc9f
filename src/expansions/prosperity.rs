//! A slice of Prosperity: Platinum and Colony, Bank and Peddler.

use crate::cards::{ActionBonus, Card, CardDefinition, CardEntry, CardId, CardRegistry, CardType, Valued};
use crate::core::{GameRng, Result};
use crate::hooks::{HookScope, Persistence};
use crate::rules::{Game, PlayerScope};
use crate::supply::{StackSize, KINGDOM_SIZE};
use crate::zones::Zone;

use super::{register_all, victory_pile, EndCondition, Expansion};

pub const PLATINUM: CardId = CardId::new(400);
pub const COLONY: CardId = CardId::new(401);
pub const BANK: CardId = CardId::new(402);
pub const PEDDLER: CardId = CardId::new(403);

const KINGDOM: [CardId; 2] = [BANK, PEDDLER];

#[derive(Clone, Copy, Debug, Default)]
pub struct ProsperitySet;

impl ProsperitySet {
    pub const NAME: &'static str = "Prosperity";
}

/// Worth 1 $ per Treasure in play, itself included.
struct Bank;

impl Valued for Bank {
    fn value(&self, scope: &PlayerScope<'_>, _card: Card) -> u32 {
        let registry = scope.registry();
        scope
            .mat()
            .zone(Zone::Played)
            .iter()
            .filter(|card| registry.is(card.kind, CardType::Treasure))
            .count() as u32
    }
}

fn peddler_discount(scope: &mut PlayerScope<'_>, kind: CardId) -> Result<()> {
    let registry = scope.registry();
    let actions = scope
        .mat()
        .zone(Zone::Played)
        .iter()
        .filter(|card| registry.is(card.kind, CardType::Action))
        .count() as i32;
    if actions == 0 {
        return Ok(());
    }
    let cost = scope.table().supply().modify_cost(kind, -2 * actions)?;
    tracing::debug!(player = %scope.name(), actions, cost, "Peddler discounted");
    scope.send(&format!("With {actions} Action cards in play, Peddler costs {cost} $ this turn."));
    Ok(())
}

fn colonies_gone(game: &Game) -> Option<String> {
    let supply = game.supply();
    (supply.contains(COLONY) && supply.is_empty(COLONY)).then(|| "All Colonies have been purchased.".to_string())
}

impl Expansion for ProsperitySet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        register_all(
            registry,
            [
                CardEntry::new(CardDefinition::treasure(PLATINUM, "Platinum", 9, 5).with_description("5 $")),
                CardEntry::new(CardDefinition::victory(COLONY, "Colony", 11, 10).with_description("10 victory points")),
                CardEntry::new(
                    CardDefinition::new(BANK, "Bank", 7)
                        .with_type(CardType::Treasure)
                        .with_description("When you play this, it's worth 1 $ per Treasure you have in play (counting this)."),
                )
                .with_value(Bank),
                CardEntry::new(
                    CardDefinition::action(PEDDLER, "Peddler", 8, ActionBonus::new().cards(1).actions(1).coins(1))
                        .with_description("During your Buy phase, this costs 2 $ less per Action card you have in play."),
                ),
            ],
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        KINGDOM.to_vec()
    }

    /// Platinum and Colony join with probability equal to the share of
    /// Prosperity cards in the kingdom.
    fn basic_piles(
        &self,
        player_count: usize,
        kingdom: &[CardId],
        _registry: &CardRegistry,
        rng: &mut GameRng,
    ) -> Vec<(CardId, StackSize)> {
        let ours = kingdom.iter().filter(|kind| KINGDOM.contains(kind)).count();
        let odds = ours as f64 / KINGDOM_SIZE as f64;
        if !rng.gen_bool(odds) {
            tracing::debug!(ours, "not using Platinum and Colony");
            return Vec::new();
        }
        tracing::debug!(ours, "using Platinum and Colony");
        vec![(PLATINUM, StackSize::Finite(12)), (COLONY, victory_pile(player_count))]
    }

    fn setup(&self, game: &mut Game) -> Result<()> {
        if game.supply().contains(PEDDLER) {
            game.with_hooks(HookScope::Game, |hooks| {
                hooks.on_pre_buy(PEDDLER, "Peddler", Persistence::Persistent, peddler_discount)
            })?;
        }
        Ok(())
    }

    fn end_conditions(&self) -> Vec<EndCondition> {
        vec![Box::new(colonies_gone)]
    }

    /// Banks go last so they count every other Treasure.
    fn order_treasures(&self, _registry: &CardRegistry, treasures: &mut Vec<Card>) {
        treasures.sort_by_key(|card| card.kind == BANK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banks_ordered_last() {
        use crate::core::EntityId;

        let card = |id: u32, kind: CardId| Card::new(EntityId::new(id), kind);
        let mut treasures = vec![card(1, BANK), card(2, PLATINUM), card(3, BANK), card(4, CardId::new(1))];
        ProsperitySet.order_treasures(&CardRegistry::new(), &mut treasures);

        let ids: Vec<u32> = treasures.iter().map(|card| card.id.raw()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_platinum_and_colony_odds() {
        let registry = CardRegistry::new();
        let none: Vec<CardId> = (100..110).map(CardId::new).collect();
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert!(ProsperitySet.basic_piles(2, &none, &registry, &mut rng).is_empty());
        }

        let all: Vec<CardId> = std::iter::repeat(BANK).take(KINGDOM_SIZE).collect();
        let piles = ProsperitySet.basic_piles(3, &all, &registry, &mut rng);
        assert_eq!(piles, vec![(PLATINUM, StackSize::Finite(12)), (COLONY, StackSize::Finite(12))]);
    }
}
