//! One Supply pile and its cost state.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackSize {
    Finite(u32),
    Unlimited,
}

impl StackSize {
    /// Remaining count, `None` for unlimited piles.
    #[must_use]
    pub fn count(self) -> Option<u32> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Unlimited => None,
        }
    }
}

/// A pile of one card kind.
///
/// The modified cost starts at the base cost, moves by additive
/// adjustments that never take it below zero, and is reset every Cleanup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyStack {
    pub kind: CardId,
    initial: StackSize,
    remaining: StackSize,
    base_cost: u32,
    modified_cost: u32,
}

impl SupplyStack {
    #[must_use]
    pub fn new(kind: CardId, size: StackSize, base_cost: u32) -> Self {
        Self {
            kind,
            initial: size,
            remaining: size,
            base_cost,
            modified_cost: base_cost,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining == StackSize::Finite(0)
    }

    #[must_use]
    pub fn remaining(&self) -> StackSize {
        self.remaining
    }

    #[must_use]
    pub fn initial(&self) -> StackSize {
        self.initial
    }

    #[must_use]
    pub fn base_cost(&self) -> u32 {
        self.base_cost
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.modified_cost
    }

    /// Remove one card from the count. `false` if the pile is empty.
    pub fn take(&mut self) -> bool {
        match &mut self.remaining {
            StackSize::Finite(0) => false,
            StackSize::Finite(n) => {
                *n -= 1;
                true
            }
            StackSize::Unlimited => true,
        }
    }

    /// Add one card back to the count.
    pub fn put_back(&mut self) {
        if let StackSize::Finite(n) = &mut self.remaining {
            *n += 1;
        }
    }

    /// Adjust the modified cost, clamped at zero. Returns the new cost.
    pub fn modify_cost(&mut self, delta: i32) -> u32 {
        let adjusted = i64::from(self.modified_cost) + i64::from(delta);
        self.modified_cost = u32::try_from(adjusted.max(0)).unwrap_or(u32::MAX);
        self.modified_cost
    }

    pub fn reset_cost(&mut self) {
        self.modified_cost = self.base_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_stack_refuses_when_empty() {
        let mut stack = SupplyStack::new(CardId::new(1), StackSize::Finite(1), 3);

        assert!(stack.take());
        assert!(stack.is_empty());
        assert!(!stack.take());

        stack.put_back();
        assert_eq!(stack.remaining(), StackSize::Finite(1));
    }

    #[test]
    fn test_unlimited_never_empties() {
        let mut stack = SupplyStack::new(CardId::new(1), StackSize::Unlimited, 0);
        for _ in 0..100 {
            assert!(stack.take());
        }
        assert!(!stack.is_empty());
        assert_eq!(stack.remaining().count(), None);
    }

    #[test]
    fn test_cost_floor_and_reset() {
        let mut stack = SupplyStack::new(CardId::new(1), StackSize::Finite(10), 2);

        assert_eq!(stack.modify_cost(-5), 0);
        assert_eq!(stack.modify_cost(1), 1);
        assert_eq!(stack.base_cost(), 2);

        stack.reset_cost();
        assert_eq!(stack.cost(), 2);
    }
}
