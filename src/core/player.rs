//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The two seats at the board. Player A owns holes 0-6 and store 7,
//! Player B owns holes 8-14 and store 15.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, RangeInclusive};

use super::board::{HOLES_PER_SIDE, STORE_A, STORE_B};

/// One of the two seats at the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// Bottom row, store on the right (slot 7).
    A,
    /// Top row, store on the left (slot 15).
    B,
}

impl Player {
    /// Both players, A first.
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    /// Index into two-element per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// The other player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Slot index of this player's store.
    #[must_use]
    pub const fn store(self) -> usize {
        match self {
            Player::A => STORE_A,
            Player::B => STORE_B,
        }
    }

    /// Slot index of the opponent's store (never sown into by this player).
    #[must_use]
    pub const fn opponent_store(self) -> usize {
        self.other().store()
    }

    /// Slot indices of this player's seven holes.
    #[must_use]
    pub fn holes(self) -> RangeInclusive<usize> {
        match self {
            Player::A => 0..=HOLES_PER_SIDE - 1,
            Player::B => STORE_A + 1..=STORE_A + HOLES_PER_SIDE,
        }
    }

    /// Check whether `slot` is one of this player's holes (stores excluded).
    #[must_use]
    pub fn owns_hole(self, slot: usize) -> bool {
        self.holes().contains(&slot)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::A => write!(f, "Player A"),
            Player::B => write!(f, "Player B"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use congkak_engine::core::{Player, PlayerMap};
///
/// let mut gains: PlayerMap<u32> = PlayerMap::with_value(0);
/// gains[Player::B] += 3;
///
/// assert_eq!(gains[Player::A], 0);
/// assert_eq!(gains[Player::B], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::A), factory(Player::B)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Create a new PlayerMap from A's and B's values.
    pub fn from_pair(a: T, b: T) -> Self {
        Self { data: [a, b] }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs, A first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_basics() {
        assert_eq!(Player::A.other(), Player::B);
        assert_eq!(Player::B.other(), Player::A);
        assert_eq!(Player::A.store(), 7);
        assert_eq!(Player::B.store(), 15);
        assert_eq!(Player::A.opponent_store(), 15);
        assert_eq!(format!("{}", Player::B), "Player B");
    }

    #[test]
    fn test_player_holes() {
        let a: Vec<_> = Player::A.holes().collect();
        let b: Vec<_> = Player::B.holes().collect();
        assert_eq!(a, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(b, vec![8, 9, 10, 11, 12, 13, 14]);

        assert!(Player::A.owns_hole(6));
        assert!(!Player::A.owns_hole(7));
        assert!(!Player::B.owns_hole(15));
        assert!(Player::B.owns_hole(8));
    }

    #[test]
    fn test_player_map_new() {
        let map = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[Player::A], 0);
        assert_eq!(map[Player::B], 10);
    }

    #[test]
    fn test_player_map_iter() {
        let map = PlayerMap::new(|p| p.store());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Player::A, &7), (Player::B, &15)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::new(|p| p.index() as u32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
