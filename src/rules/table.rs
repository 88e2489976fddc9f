//! State shared by every player: card kinds, the Supply, game-scope hooks
//! and the log.
//!
//! `Table` is `Sync`. Concurrent attack tasks each hold a `&Table`; the
//! Supply and hook mutexes are the only serialization points.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::cards::{CardId, CardRegistry, CardType};
use crate::hooks::HookTable;
use crate::supply::Supply;

use super::log::GameLog;

#[derive(Debug)]
pub struct Table {
    registry: Arc<CardRegistry>,
    supply: Mutex<Supply>,
    hooks: Mutex<HookTable>,
    log: GameLog,
}

impl Table {
    #[must_use]
    pub fn new(supply: Supply) -> Self {
        Self {
            registry: Arc::clone(supply.registry()),
            supply: Mutex::new(supply),
            hooks: Mutex::new(HookTable::new()),
            log: GameLog::new(),
        }
    }

    /// Replace the default unbounded log (builder pattern).
    #[must_use]
    pub fn with_log(mut self, log: GameLog) -> Self {
        self.log = log;
        self
    }

    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    /// Lock the Supply. Keep the guard short-lived: never hold it across a
    /// player choice or a hook.
    pub fn supply(&self) -> MutexGuard<'_, Supply> {
        self.supply.lock()
    }

    /// Lock the game-scope hooks.
    pub fn hooks(&self) -> MutexGuard<'_, HookTable> {
        self.hooks.lock()
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn broadcast(&self, message: impl Into<String>) {
        self.log.push(message);
    }

    #[must_use]
    pub fn name(&self, kind: CardId) -> String {
        self.registry.name(kind)
    }

    #[must_use]
    pub fn is(&self, kind: CardId, card_type: CardType) -> bool {
        self.registry.is(kind, card_type)
    }
}
