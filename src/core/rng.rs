//! Seeded randomness.
//!
//! A game owns one root `GameRng`. Each seat draws its shuffles from its own
//! stream split off the root, and setup work (kingdom sampling, Platinum and
//! Colony odds) uses a stream derived from a label. The same seed therefore
//! replays the same game as long as the players make the same choices.
//!
//! ```
//! use dominion_engine::core::GameRng;
//!
//! let mut root = GameRng::new(7);
//! let mut first_seat = root.split();
//! let mut second_seat = root.split();
//!
//! let mut deck_a: Vec<u32> = (0..10).collect();
//! let mut deck_b = deck_a.clone();
//! first_seat.shuffle(&mut deck_a);
//! second_seat.shuffle(&mut deck_b);
//! assert_ne!(deck_a, deck_b);
//! ```

use std::hash::Hasher;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// Odd constant used to spread split seeds apart.
const SPLIT_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    splits: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            splits: 0,
        }
    }

    /// Split off the next independent stream.
    ///
    /// The n-th split of a given seed is always the same stream, so seats
    /// keep their shuffles regardless of what other seats draw.
    #[must_use]
    pub fn split(&mut self) -> Self {
        self.splits += 1;
        Self::new(self.seed.wrapping_add(self.splits.wrapping_mul(SPLIT_STEP)))
    }

    /// A stream for one labelled purpose. Does not advance `self`.
    #[must_use]
    pub fn derive(&self, label: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(label.as_bytes());
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `true` with the given probability, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Up to `amount` distinct elements, fewer if `items` is shorter.
    pub fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items.choose_multiple(&mut self.inner, amount).cloned().collect()
    }
}
