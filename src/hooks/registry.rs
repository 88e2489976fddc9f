//! Hook registry.
//!
//! A registry stores hooks of one trigger class and finds the ones keyed to
//! a card kind when the matching event happens. Firing claims the matching
//! hooks under the lock and runs them after it is released: `Persistent`
//! hooks are cloned and stay registered, `Once` hooks are removed as they
//! are claimed so that no two callers can both run them. A callback may
//! therefore gain cards, register hooks or fire other hooks, and a second
//! thread firing the same trigger meanwhile still sees every persistent
//! hook.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{PlayerId, Result};

/// Unique identifier for a hook within its table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookId(pub u32);

impl HookId {
    /// Create a new hook ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for HookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hook({})", self.0)
    }
}

/// Lifetime of the table a hook lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookScope {
    /// Lives for the whole game.
    Game,
    /// Discarded with the current turn.
    Turn,
}

/// What happens to a hook after it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persistence {
    /// Removed after firing once.
    Once,
    /// Stays armed.
    Persistent,
}

/// A registered callback.
pub struct Hook<F: ?Sized> {
    pub id: HookId,
    /// Name for logs, usually the registering card.
    pub label: String,
    /// Card kind whose event fires this hook.
    pub kind: CardId,
    pub persistence: Persistence,
    /// Player the hook fires for; `None` fires for anyone.
    pub owner: Option<PlayerId>,
    callback: Arc<F>,
}

impl<F: ?Sized> Hook<F> {
    pub fn new(id: HookId, label: impl Into<String>, kind: CardId, persistence: Persistence, callback: Arc<F>) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            persistence,
            owner: None,
            callback,
        }
    }

    #[must_use]
    pub fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// The callback, ready to invoke.
    pub fn callback(&self) -> &F {
        &self.callback
    }
}

impl<F: ?Sized> Clone for Hook<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label.clone(),
            kind: self.kind,
            persistence: self.persistence,
            owner: self.owner,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<F: ?Sized> std::fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("persistence", &self.persistence)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Hooks of one trigger class, indexed by card kind.
pub struct HookRegistry<F: ?Sized> {
    hooks: FxHashMap<HookId, Hook<F>>,

    /// Index by kind; each list is kept in registration (id) order.
    by_kind: FxHashMap<CardId, Vec<HookId>>,
}

impl<F: ?Sized> Default for HookRegistry<F> {
    fn default() -> Self {
        Self {
            hooks: FxHashMap::default(),
            by_kind: FxHashMap::default(),
        }
    }
}

impl<F: ?Sized> std::fmt::Debug for HookRegistry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.hooks.values()).finish()
    }
}

impl<F: ?Sized> HookRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under its own id.
    pub fn register_with_id(&mut self, hook: Hook<F>) -> HookId {
        let id = hook.id;
        self.index(id, hook.kind);
        self.hooks.insert(id, hook);
        id
    }

    fn index(&mut self, id: HookId, kind: CardId) {
        let ids = self.by_kind.entry(kind).or_default();
        let at = ids.partition_point(|other| *other < id);
        ids.insert(at, id);
    }

    /// Unregister a hook.
    pub fn unregister(&mut self, id: HookId) -> Option<Hook<F>> {
        let hook = self.hooks.remove(&id)?;
        if let Some(ids) = self.by_kind.get_mut(&hook.kind) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_kind.remove(&hook.kind);
            }
        }
        Some(hook)
    }

    #[must_use]
    pub fn contains(&self, id: HookId) -> bool {
        self.hooks.contains_key(&id)
    }

    /// Hooks keyed to a kind.
    #[must_use]
    pub fn count_for(&self, kind: CardId) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Get total hook count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hook<F>> {
        self.hooks.values()
    }

    /// Claim the hooks to fire for `kind` (every kind when `None`), in
    /// registration order. `Once` hooks leave the registry; `Persistent`
    /// hooks are cloned and stay.
    pub fn claim(&mut self, kind: Option<CardId>) -> Vec<Hook<F>> {
        self.claim_where(kind, |_| true)
    }

    /// Claim the hooks of every kind that fire for `player`: those owned by
    /// them and those with no owner.
    pub fn claim_for(&mut self, player: PlayerId) -> Vec<Hook<F>> {
        self.claim_where(None, |hook| hook.owner.map_or(true, |owner| owner == player))
    }

    fn claim_where(&mut self, kind: Option<CardId>, wanted: impl Fn(&Hook<F>) -> bool) -> Vec<Hook<F>> {
        let mut ids: Vec<HookId> = match kind {
            Some(kind) => self.by_kind.get(&kind).cloned().unwrap_or_default(),
            None => self.hooks.keys().copied().collect(),
        };
        ids.sort_unstable();
        let mut claimed = Vec::with_capacity(ids.len());
        for id in ids {
            let persistence = match self.hooks.get(&id) {
                Some(hook) if wanted(hook) => hook.persistence,
                _ => continue,
            };
            let hook = match persistence {
                Persistence::Once => self.unregister(id),
                Persistence::Persistent => self.hooks.get(&id).cloned(),
            };
            claimed.extend(hook);
        }
        claimed
    }

    /// Put back claimed `Once` hooks that never ran. Order is always by id,
    /// so hooks registered meanwhile keep their place.
    pub fn restore(&mut self, unfired: Vec<Hook<F>>) {
        for hook in unfired {
            if !self.contains(hook.id) {
                self.register_with_id(hook);
            }
        }
    }
}

/// Invoke claimed `hooks` in order.
///
/// Stops at the first failing callback and hands back the `Once` hooks that
/// never ran, to be restored with the error.
pub fn fire<F: ?Sized>(
    hooks: Vec<Hook<F>>,
    mut call: impl FnMut(&Hook<F>) -> Result<()>,
) -> (Vec<Hook<F>>, Result<()>) {
    let mut pending = hooks.into_iter();
    for hook in pending.by_ref() {
        tracing::debug!(hook = %hook.label, id = %hook.id, "firing hook");
        if let Err(err) = call(&hook) {
            let unfired = pending.filter(|hook| hook.persistence == Persistence::Once).collect();
            return (unfired, Err(err));
        }
    }
    (Vec::new(), Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineError;

    type Counter = dyn Fn(&mut u32) -> Result<()> + Send + Sync;

    fn hook(id: u32, kind: u32, persistence: Persistence) -> Hook<Counter> {
        let callback: Arc<Counter> = Arc::new(|n: &mut u32| {
            *n += 1;
            Ok(())
        });
        Hook::new(HookId::new(id), format!("hook {id}"), CardId::new(kind), persistence, callback)
    }

    fn ids(hooks: &[Hook<Counter>]) -> Vec<u32> {
        hooks.iter().map(|h| h.id.raw()).collect()
    }

    #[test]
    fn test_claim_is_keyed_and_ordered() {
        let mut registry = HookRegistry::new();
        registry.register_with_id(hook(3, 1, Persistence::Once));
        registry.register_with_id(hook(1, 1, Persistence::Persistent));
        registry.register_with_id(hook(2, 2, Persistence::Once));

        let claimed = registry.claim(Some(CardId::new(1)));
        assert_eq!(ids(&claimed), vec![1, 3]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.count_for(CardId::new(1)), 1);
        assert_eq!(ids(&registry.claim(None)), vec![1, 2]);
    }

    #[test]
    fn test_persistent_hooks_visible_while_claimed() {
        let mut registry = HookRegistry::new();
        registry.register_with_id(hook(1, 1, Persistence::Persistent));

        let first = registry.claim(Some(CardId::new(1)));
        let second = registry.claim(Some(CardId::new(1)));

        assert_eq!(ids(&first), vec![1]);
        assert_eq!(ids(&second), vec![1]);
        assert!(registry.contains(HookId::new(1)));
    }

    #[test]
    fn test_once_hook_fires_exactly_once() {
        let mut registry = HookRegistry::new();
        registry.register_with_id(hook(1, 1, Persistence::Once));
        registry.register_with_id(hook(2, 1, Persistence::Persistent));

        let mut count = 0;
        for _ in 0..3 {
            let claimed = registry.claim(Some(CardId::new(1)));
            let (unfired, result) = fire(claimed, |h| (h.callback())(&mut count));
            result.unwrap();
            registry.restore(unfired);
        }

        assert_eq!(count, 4);
        assert!(!registry.contains(HookId::new(1)));
        assert!(registry.contains(HookId::new(2)));
    }

    #[test]
    fn test_failure_keeps_unfired_hooks() {
        let mut registry: HookRegistry<Counter> = HookRegistry::new();
        let broken: Arc<Counter> = Arc::new(|_: &mut u32| Err(EngineError::NoActiveTurn));
        registry.register_with_id(Hook::new(HookId::new(1), "broken", CardId::new(1), Persistence::Once, broken));
        registry.register_with_id(hook(2, 1, Persistence::Once));

        let mut count = 0;
        let (unfired, result) = fire(registry.claim(Some(CardId::new(1))), |h| (h.callback())(&mut count));
        assert!(result.is_err());
        registry.restore(unfired);

        assert_eq!(count, 0);
        assert!(!registry.contains(HookId::new(1)));
        assert!(registry.contains(HookId::new(2)));
    }

    #[test]
    fn test_restore_keeps_id_order() {
        let mut registry = HookRegistry::new();
        registry.register_with_id(hook(1, 1, Persistence::Once));
        let claimed = registry.claim(Some(CardId::new(1)));

        registry.register_with_id(hook(5, 1, Persistence::Once));
        registry.restore(claimed);

        assert_eq!(ids(&registry.claim(Some(CardId::new(1)))), vec![1, 5]);
    }

    #[test]
    fn test_unregister() {
        let mut registry = HookRegistry::new();
        registry.register_with_id(hook(2, 1, Persistence::Once));
        registry.register_with_id(hook(1, 2, Persistence::Once));

        assert!(registry.unregister(HookId::new(9)).is_none());
        assert!(registry.unregister(HookId::new(2)).is_some());
        assert_eq!(registry.count_for(CardId::new(1)), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_claim_for_respects_owner() {
        let mut registry = HookRegistry::new();
        registry.register_with_id(hook(1, 1, Persistence::Once).owned_by(PlayerId::new(0)));
        registry.register_with_id(hook(2, 2, Persistence::Once).owned_by(PlayerId::new(1)));
        registry.register_with_id(hook(3, 3, Persistence::Persistent));

        assert_eq!(ids(&registry.claim_for(PlayerId::new(1))), vec![2, 3]);
        assert_eq!(ids(&registry.claim_for(PlayerId::new(1))), vec![3]);
        assert!(registry.contains(HookId::new(1)));
    }
}
