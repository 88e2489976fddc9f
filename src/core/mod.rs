//! Core engine types: card identity, players, RNG, configuration, errors.
//!
//! Nothing in this module knows about phases, zones or specific cards.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, KingdomConfig, DEFAULT_HAND_SIZE};
pub use error::{EngineError, Result};
