//! Turn structure, player operations, attacks and the game itself.
//!
//! ## Key Types
//!
//! - `Game`: roster, shared table, turn order, end conditions
//! - `GameBuilder`: setup from players, expansions and a kingdom policy
//! - `PlayerScope`: one player's operations (draw, gain, discard, trash, choose)
//! - `Turn` / `Phase`: counters and the Action, Buy, Cleanup state machine
//! - `Attack`: an attack in progress, seen by its victims
//! - `GameLog`: the public message log

pub mod attack;
pub mod builder;
pub mod game;
pub mod log;
pub mod outcome;
pub mod player;
pub mod scope;
pub mod table;
pub mod turn;

pub use attack::Attack;
pub use builder::{GameBuilder, MAX_PLAYERS, MIN_PLAYERS};
pub use game::Game;
pub use log::{article, name_list, plural, GameLog};
pub use outcome::{GameOutcome, GameResult};
pub use player::Player;
pub use scope::{GainOptions, PlayerScope, SupplyFilter};
pub use table::Table;
pub use turn::{Phase, Turn};
