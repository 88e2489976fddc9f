//! One registry per trigger class.

use std::sync::Arc;

use crate::cards::{Card, CardId};
use crate::core::{PlayerId, Result};
use crate::rules::PlayerScope;
use crate::zones::Zone;

use super::registry::{Hook, HookId, HookRegistry, Persistence};

/// A card that has just been gained and where it landed.
///
/// Post-gain hooks may change `zone` to redirect the card, or replace
/// `card` with a different one; later hooks then see the replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gained {
    pub card: Card,
    pub zone: Zone,
}

/// Fires after a Treasure of the keyed kind adds its value.
pub type TreasureFn = dyn Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync;
/// Fires once after all Treasures for the Buy phase are played.
pub type PostTreasureFn = dyn Fn(&mut PlayerScope<'_>) -> Result<()> + Send + Sync;
/// Fires before buying starts, once per Supply pile of the keyed kind.
pub type PreBuyFn = dyn Fn(&mut PlayerScope<'_>, CardId) -> Result<()> + Send + Sync;
/// Fires after a card of the keyed kind is bought.
pub type PostBuyFn = dyn Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync;
/// Fires after a card of the keyed kind is gained.
pub type PostGainFn = dyn Fn(&mut PlayerScope<'_>, &mut Gained) -> Result<()> + Send + Sync;
/// Fires after a card of the keyed kind is discarded outside Cleanup.
pub type PostDiscardFn = dyn Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync;
/// Fires at the start of Cleanup, before hand and play area are discarded.
pub type PreCleanupFn = dyn Fn(&mut PlayerScope<'_>) -> Result<()> + Send + Sync;
/// Fires when its owner's turn begins, before the Action phase.
pub type PreTurnFn = dyn Fn(&mut PlayerScope<'_>) -> Result<()> + Send + Sync;

/// All hook registries of one scope.
///
/// The game owns one table for its whole lifetime and every turn owns a
/// fresh one, so turn-scoped hooks disappear with the turn.
#[derive(Debug, Default)]
pub struct HookTable {
    pub treasure: HookRegistry<TreasureFn>,
    pub post_treasure: HookRegistry<PostTreasureFn>,
    pub pre_buy: HookRegistry<PreBuyFn>,
    pub post_buy: HookRegistry<PostBuyFn>,
    pub post_gain: HookRegistry<PostGainFn>,
    pub post_discard: HookRegistry<PostDiscardFn>,
    pub pre_cleanup: HookRegistry<PreCleanupFn>,
    pub pre_turn: HookRegistry<PreTurnFn>,
    next_id: u32,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> HookId {
        let id = HookId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn on_treasure(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<TreasureFn> = Arc::new(f);
        let id = self.alloc();
        self.treasure.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    pub fn on_post_treasure(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PostTreasureFn> = Arc::new(f);
        let id = self.alloc();
        self.post_treasure.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    pub fn on_pre_buy(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>, CardId) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PreBuyFn> = Arc::new(f);
        let id = self.alloc();
        self.pre_buy.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    pub fn on_post_buy(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PostBuyFn> = Arc::new(f);
        let id = self.alloc();
        self.post_buy.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    pub fn on_post_gain(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>, &mut Gained) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PostGainFn> = Arc::new(f);
        let id = self.alloc();
        self.post_gain.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    pub fn on_post_discard(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>, Card) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PostDiscardFn> = Arc::new(f);
        let id = self.alloc();
        self.post_discard.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    pub fn on_pre_cleanup(
        &mut self,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PreCleanupFn> = Arc::new(f);
        let id = self.alloc();
        self.pre_cleanup.register_with_id(Hook::new(id, label, kind, persistence, callback))
    }

    /// Arm a hook for the start of `owner`'s next turn (every turn while
    /// `Persistent`). Only the game-scope table is consulted for these.
    pub fn on_pre_turn(
        &mut self,
        owner: PlayerId,
        kind: CardId,
        label: impl Into<String>,
        persistence: Persistence,
        f: impl Fn(&mut PlayerScope<'_>) -> Result<()> + Send + Sync + 'static,
    ) -> HookId {
        let callback: Arc<PreTurnFn> = Arc::new(f);
        let id = self.alloc();
        self.pre_turn
            .register_with_id(Hook::new(id, label, kind, persistence, callback).owned_by(owner))
    }

    /// Remove a hook from whichever registry holds it.
    pub fn unregister(&mut self, id: HookId) -> bool {
        self.treasure.unregister(id).is_some()
            || self.post_treasure.unregister(id).is_some()
            || self.pre_buy.unregister(id).is_some()
            || self.post_buy.unregister(id).is_some()
            || self.post_gain.unregister(id).is_some()
            || self.post_discard.unregister(id).is_some()
            || self.pre_cleanup.unregister(id).is_some()
            || self.pre_turn.unregister(id).is_some()
    }

    #[must_use]
    pub fn contains(&self, id: HookId) -> bool {
        self.treasure.contains(id)
            || self.post_treasure.contains(id)
            || self.pre_buy.contains(id)
            || self.post_buy.contains(id)
            || self.post_gain.contains(id)
            || self.post_discard.contains(id)
            || self.pre_cleanup.contains(id)
            || self.pre_turn.contains(id)
    }

    /// Hooks across all registries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.treasure.len()
            + self.post_treasure.len()
            + self.pre_buy.len()
            + self.post_buy.len()
            + self.post_gain.len()
            + self.post_discard.len()
            + self.pre_cleanup.len()
            + self.pre_turn.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique_across_registries() {
        let mut table = HookTable::new();
        let a = table.on_treasure(CardId::new(1), "a", Persistence::Once, |_, _| Ok(()));
        let b = table.on_post_gain(CardId::new(1), "b", Persistence::Persistent, |_, _| Ok(()));
        let c = table.on_pre_cleanup(CardId::new(2), "c", Persistence::Once, |_| Ok(()));
        let d = table.on_pre_turn(PlayerId::new(1), CardId::new(2), "d", Persistence::Once, |_| Ok(()));

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(c, d);
        assert_eq!(table.len(), 4);
        assert_eq!(table.pre_turn.iter().next().and_then(|hook| hook.owner), Some(PlayerId::new(1)));
        assert_eq!(table.post_gain.count_for(CardId::new(1)), 1);
    }

    #[test]
    fn test_unregister_finds_the_right_registry() {
        let mut table = HookTable::new();
        let keep = table.on_pre_buy(CardId::new(3), "keep", Persistence::Persistent, |_, _| Ok(()));
        let drop = table.on_post_discard(CardId::new(3), "drop", Persistence::Persistent, |_, _| Ok(()));

        assert!(table.unregister(drop));
        assert!(!table.unregister(drop));
        assert!(table.contains(keep));
        assert!(!table.is_empty());
    }
}
