//! Card instance identity.
//!
//! Two Coppers are the same *kind* of card but different *instances*. Zones
//! remove "this exact card", so every physical card carries an `EntityId`
//! handed out by the Supply when the card first comes into existence.
//!
//! ```
//! use dominion_engine::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::default();
//! let first = ids.next_id();
//! let second = ids.next_id();
//!
//! assert_ne!(first, second);
//! assert_eq!(first, EntityId::new(0));
//! assert_eq!(ids.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of one physical card.
///
/// Ids are never reused within a game, so a stale id can only fail to be
/// found; it can never alias a different card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
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

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of fresh `EntityId`s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Allocate the next unused id.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = EntityAllocator::default();
        let allocated: Vec<_> = (0..5).map(|_| ids.next_id()).collect();

        assert_eq!(allocated, (0..5).map(EntityId).collect::<Vec<_>>());
        assert_eq!(ids.allocated(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "#42");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
