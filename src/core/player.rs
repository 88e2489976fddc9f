//! Seats and per-seat storage.
//!
//! A `PlayerId` is the seat a player took when joining. The order in which
//! seats take turns is a separate shuffled list held by the game, so seat 0
//! does not necessarily move first.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat number, 0-based in joining order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every seat at a table of `count`, in joining order.
    ///
    /// ```
    /// use dominion_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = PlayerId> {
        (0..count).map(|seat| PlayerId(seat as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use dominion_engine::core::{PlayerId, PlayerMap};
///
/// let mut vp = PlayerMap::from_vec(vec![3, 3]);
/// vp[PlayerId::new(1)] += 6;
///
/// assert_eq!(vp[PlayerId::new(0)], 3);
/// assert_eq!(vp[PlayerId::new(1)], 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Values in seat order. Panics on an empty or oversized table.
    pub fn from_vec(seats: Vec<T>) -> Self {
        assert!(!seats.is_empty(), "a table needs at least one seat");
        assert!(seats.len() <= usize::from(u8::MAX), "too many seats");
        Self { seats }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.seats.iter().enumerate().map(|(seat, value)| (PlayerId(seat as u8), value))
    }

    /// Disjoint mutable borrows of every seat, which lets attack resolution
    /// hand each victim to its own task.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.seats.iter_mut().enumerate().map(|(seat, value)| (PlayerId(seat as u8), value))
    }

    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap {
            seats: self.iter().map(|(id, value)| f(id, value)).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}
