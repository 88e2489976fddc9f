//! Player zones.
//!
//! ## Key Types
//!
//! - `Zone`: deck, hand, discard pile, play area
//! - `ZonePosition`: where in a zone a card is placed
//! - `PlayerMat`: the four ordered zones of one player

pub mod mat;

pub use mat::{Draw, PlayerMat, Zone, ZonePosition};
