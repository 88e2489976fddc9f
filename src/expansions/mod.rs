//! Card content.
//!
//! An `Expansion` contributes card kinds, kingdom candidates, basic piles,
//! setup work (usually game-scope hooks), end conditions and scoring. The
//! builder asks every active expansion in order; the base set is always
//! first.
//!
//! Card ids are partitioned by expansion so that sets combine freely:
//!
//! | Range | Expansion |
//! |-------|-----------|
//! | 1-99 | base |
//! | 100-199 | Dominion |
//! | 200-299 | Intrigue |
//! | 300-399 | Hinterlands |
//! | 400-499 | Prosperity |
//! | 500-599 | Cornucopia |
//! | 600-699 | Guilds |

pub mod base;
pub mod cornucopia;
pub mod dominion;
pub mod guilds;
pub mod hinterlands;
pub mod intrigue;
pub mod prosperity;

use crate::cards::{Card, CardEntry, CardId, CardRegistry};
use crate::core::{GameRng, Result};
use crate::rules::{Game, Player};
use crate::supply::StackSize;

pub use base::BaseSet;
pub use cornucopia::CornucopiaSet;
pub use dominion::DominionSet;
pub use guilds::GuildsSet;
pub use hinterlands::HinterlandsSet;
pub use intrigue::IntrigueSet;
pub use prosperity::ProsperitySet;

/// A kingdom pile added on top of the selected kingdom, with the role it
/// plays in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraPile {
    pub kind: CardId,
    pub role: &'static str,
}

/// Checked after every turn. `Some(reason)` ends the game.
pub type EndCondition = Box<dyn Fn(&Game) -> Option<String> + Send + Sync>;

pub trait Expansion: Send + Sync {
    fn name(&self) -> &'static str;

    fn register_cards(&self, registry: &mut CardRegistry) -> Result<()>;

    /// Kinds this expansion offers for the kingdom.
    fn kingdom_cards(&self) -> Vec<CardId>;

    /// Extra kingdom piles some selected card calls for, chosen from
    /// `candidates` once the kingdom is known.
    fn additional_kingdom_cards(
        &self,
        kingdom: &[CardId],
        candidates: &[CardId],
        registry: &CardRegistry,
        rng: &mut GameRng,
    ) -> Vec<ExtraPile> {
        let _ = (kingdom, candidates, registry, rng);
        Vec::new()
    }

    /// Non-kingdom piles, decided once the kingdom is known.
    fn basic_piles(
        &self,
        player_count: usize,
        kingdom: &[CardId],
        registry: &CardRegistry,
        rng: &mut GameRng,
    ) -> Vec<(CardId, StackSize)> {
        let _ = (player_count, kingdom, registry, rng);
        Vec::new()
    }

    /// Runs once the Supply and the players exist, before the first turn.
    fn setup(&self, game: &mut Game) -> Result<()> {
        let _ = game;
        Ok(())
    }

    /// Runs at the start of each Buy phase, before pre-buy hooks.
    fn pre_buy_phase(&self, game: &mut Game) -> Result<()> {
        let _ = game;
        Ok(())
    }

    fn end_conditions(&self) -> Vec<EndCondition> {
        Vec::new()
    }

    /// Reorder Treasures about to be played together.
    fn order_treasures(&self, registry: &CardRegistry, treasures: &mut Vec<Card>) {
        let _ = (registry, treasures);
    }

    /// Points this expansion contributes to a player's score.
    fn score(&self, player: &Player, registry: &CardRegistry) -> i32 {
        let _ = (player, registry);
        0
    }
}

/// Register a batch of entries.
pub(crate) fn register_all(registry: &mut CardRegistry, entries: impl IntoIterator<Item = CardEntry>) -> Result<()> {
    for entry in entries {
        registry.register(entry)?;
    }
    Ok(())
}

/// Pile size for Victory kinds: 8 with two players, 12 otherwise.
#[must_use]
pub fn victory_pile(player_count: usize) -> StackSize {
    StackSize::Finite(if player_count == 2 { 8 } else { 12 })
}
