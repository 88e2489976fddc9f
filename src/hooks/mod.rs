//! Deferred callbacks fired on game events.
//!
//! ## Key Types
//!
//! - `Hook`: callback keyed to a card kind, with a `Persistence`
//! - `HookRegistry`: hooks of one trigger class, claimed for firing
//! - `HookTable`: one registry per trigger class, for one `HookScope`
//! - `Gained`: the mutable post-gain event
//!
//! Cards register hooks from their effects (Merchant's "first Silver this
//! turn") or from expansion setup (Duchess's "when you gain a Duchy").
//! The engine fires them without knowing which card put them there.

pub mod registry;
pub mod table;

pub use registry::{fire, Hook, HookId, HookRegistry, HookScope, Persistence};
pub use table::{
    Gained, HookTable, PostBuyFn, PostDiscardFn, PostGainFn, PostTreasureFn, PreBuyFn, PreCleanupFn,
    PreTurnFn, TreasureFn,
};
