//! Card system: kinds, instances, behaviour and the registry.
//!
//! ## Key Types
//!
//! - `CardId`: identifier of a card kind
//! - `CardType` / `CardTypes`: the closed set of type tags
//! - `CardDefinition`: cost, types, value, points, static Action bonus
//! - `Card`: one physical card, tracked by `EntityId`
//! - `Playable`, `Attacking`, `Reacting`, `Valued`, `Scored`, `Overpaid`:
//!   capabilities
//! - `CardRegistry`: kind lookup shared by the whole game

pub mod types;
pub mod definition;
pub mod instance;
pub mod traits;
pub mod registry;

pub use types::{CardType, CardTypes};
pub use definition::{ActionBonus, CardDefinition, CardId};
pub use instance::Card;
pub use traits::{Attacking, Overpaid, Playable, Reacting, Reaction, ReactionKind, Scored, Valued};
pub use registry::{CardEntry, CardRegistry};
