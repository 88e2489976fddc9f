//! Room registry.
//!
//! A server hosts several games at once, one per room. `SessionManager`
//! owns them and is handed around by reference; there is no process-wide
//! game table.

pub mod manager;

pub use manager::{RoomId, SessionManager};
