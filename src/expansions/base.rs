//! Basic Treasures, Victory cards and Curses, the standard end conditions
//! and scoring.

use crate::cards::{CardDefinition, CardEntry, CardId, CardRegistry, CardType};
use crate::core::{GameRng, Result};
use crate::rules::{name_list, Game, Player};
use crate::supply::StackSize;

use super::{register_all, victory_pile, EndCondition, Expansion};

pub const COPPER: CardId = CardId::new(1);
pub const SILVER: CardId = CardId::new(2);
pub const GOLD: CardId = CardId::new(3);
pub const ESTATE: CardId = CardId::new(4);
pub const DUCHY: CardId = CardId::new(5);
pub const PROVINCE: CardId = CardId::new(6);
pub const CURSE: CardId = CardId::new(7);

#[derive(Clone, Copy, Debug, Default)]
pub struct BaseSet;

impl BaseSet {
    pub const NAME: &'static str = "Base";
}

fn provinces_gone(game: &Game) -> Option<String> {
    let supply = game.supply();
    (supply.contains(PROVINCE) && supply.is_empty(PROVINCE)).then(|| "All Provinces have been purchased.".to_string())
}

fn three_piles_empty(game: &Game) -> Option<String> {
    let supply = game.supply();
    if supply.num_empty_stacks() < 3 {
        return None;
    }
    let empty: Vec<String> = supply
        .kinds()
        .iter()
        .filter(|kind| supply.is_empty(**kind))
        .map(|kind| game.registry().name(*kind))
        .collect();
    Some(format!("Three Supply piles are empty: {}.", name_list(&empty)))
}

impl Expansion for BaseSet {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()> {
        register_all(
            registry,
            [
                CardDefinition::treasure(COPPER, "Copper", 0, 1).with_description("1 $"),
                CardDefinition::treasure(SILVER, "Silver", 3, 2).with_description("2 $"),
                CardDefinition::treasure(GOLD, "Gold", 6, 3).with_description("3 $"),
                CardDefinition::victory(ESTATE, "Estate", 2, 1).with_description("1 victory point"),
                CardDefinition::victory(DUCHY, "Duchy", 5, 3).with_description("3 victory points"),
                CardDefinition::victory(PROVINCE, "Province", 8, 6).with_description("6 victory points"),
                CardDefinition::new(CURSE, "Curse", 0)
                    .with_type(CardType::Curse)
                    .with_points(-1)
                    .with_description("-1 victory point"),
            ]
            .into_iter()
            .map(CardEntry::new),
        )
    }

    fn kingdom_cards(&self) -> Vec<CardId> {
        Vec::new()
    }

    fn basic_piles(
        &self,
        player_count: usize,
        _kingdom: &[CardId],
        _registry: &CardRegistry,
        _rng: &mut GameRng,
    ) -> Vec<(CardId, StackSize)> {
        let curses = (player_count.saturating_sub(1) * 10) as u32;
        vec![
            (COPPER, StackSize::Unlimited),
            (SILVER, StackSize::Unlimited),
            (GOLD, StackSize::Unlimited),
            (ESTATE, victory_pile(player_count)),
            (DUCHY, victory_pile(player_count)),
            (PROVINCE, victory_pile(player_count)),
            (CURSE, StackSize::Finite(curses)),
        ]
    }

    fn end_conditions(&self) -> Vec<EndCondition> {
        vec![Box::new(provinces_gone) as EndCondition, Box::new(three_piles_empty)]
    }

    /// Every card's points: dynamic if the kind computes them, printed
    /// otherwise.
    fn score(&self, player: &Player, registry: &CardRegistry) -> i32 {
        player
            .all_cards()
            .filter_map(|card| registry.get(card.kind))
            .map(|entry| match entry.scored() {
                Some(scored) => scored.points(player),
                None => entry.definition.points.unwrap_or(0),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_sizes_follow_player_count() {
        let mut rng = GameRng::new(0);
        let registry = CardRegistry::new();

        let two = BaseSet.basic_piles(2, &[], &registry, &mut rng);
        assert!(two.contains(&(PROVINCE, StackSize::Finite(8))));
        assert!(two.contains(&(CURSE, StackSize::Finite(10))));
        assert!(two.contains(&(COPPER, StackSize::Unlimited)));

        let four = BaseSet.basic_piles(4, &[], &registry, &mut rng);
        assert!(four.contains(&(DUCHY, StackSize::Finite(12))));
        assert!(four.contains(&(CURSE, StackSize::Finite(30))));
    }

    #[test]
    fn test_registers_seven_basics() {
        let mut registry = CardRegistry::new();
        BaseSet.register_cards(&mut registry).unwrap();

        assert_eq!(registry.len(), 7);
        assert_eq!(registry.by_name("Province"), Some(PROVINCE));
        assert_eq!(registry.definition(CURSE).unwrap().points, Some(-1));
        assert!(registry.is(GOLD, CardType::Treasure));
    }
}
