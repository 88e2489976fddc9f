//! # dominion-engine
//!
//! A rules engine for the Dominion deck-building card game.
//!
//! ## Design Principles
//!
//! 1. **Content Is Data Plus Behaviour**: a card kind is a `CardDefinition`
//!    plus optional capability objects (`Playable`, `Attacking`, `Reacting`,
//!    `Valued`, `Scored`, `Overpaid`). Expansions register them; the engine
//!    never matches on card names.
//!
//! 2. **Decisions Cross One Boundary**: every player decision goes through
//!    the `Interaction` trait. The engine filters the candidates and
//!    validates the answer.
//!
//! 3. **Deterministic**: one seed drives kingdom selection, turn order and
//!    every player's shuffles.
//!
//! ## Architecture
//!
//! - **Shared Table**: the Supply, the game-scope hooks and the public log
//!   sit behind `parking_lot` mutexes so attack victims can resolve
//!   concurrently (`rayon`) while the attacker waits.
//!
//! - **Hooks**: turn-start, treasure, buy, gain, discard and cleanup
//!   triggers keyed by card kind, scoped to the game or to a single turn.
//!
//! ## Modules
//!
//! - `core`: entity and player ids, RNG, configuration, errors
//! - `cards`: card kinds, instances, registry, capability traits
//! - `supply`: Supply piles, trash, costs, kingdom selection
//! - `zones`: a player's deck, hand, discard pile and play area
//! - `hooks`: trigger registries and the per-scope hook table
//! - `interaction`: the decision boundary and the auto bot
//! - `rules`: turns, player operations, attacks, the game
//! - `expansions`: the base set and kingdom card sets
//! - `session`: rooms hosting several games

pub mod core;
pub mod cards;
pub mod supply;
pub mod zones;
pub mod hooks;
pub mod interaction;
pub mod rules;
pub mod expansions;
pub mod session;

// Re-export commonly used types
pub use crate::core::{EngineError, EntityId, GameConfig, GameRng, KingdomConfig, PlayerId, PlayerMap, Result};

pub use crate::cards::{
    ActionBonus, Attacking, Card, CardDefinition, CardEntry, CardId, CardRegistry, CardType, CardTypes, Overpaid,
    Playable, Reacting, Reaction, ReactionKind, Scored, Valued,
};

pub use crate::supply::{FixedKingdom, KingdomPolicy, RandomKingdom, StackSize, Supply, KINGDOM_SIZE};

pub use crate::zones::{PlayerMat, Zone, ZonePosition};

pub use crate::hooks::{Gained, HookScope, HookTable, Persistence};

pub use crate::interaction::{AutoInteraction, CardView, Interaction, PlayerView, StackView, TurnView};

pub use crate::rules::{
    Game, GameBuilder, GameOutcome, GameResult, Phase, Player, PlayerScope, SupplyFilter, Turn,
};

pub use crate::expansions::{
    BaseSet, CornucopiaSet, DominionSet, Expansion, ExtraPile, GuildsSet, HinterlandsSet, IntrigueSet, ProsperitySet,
};

pub use crate::session::SessionManager;
