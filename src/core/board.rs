//! The 16-slot seed board.
//!
//! ## Layout
//!
//! ```text
//!        14  13  12  11  10   9   8          <- Player B holes
//!   15                               7       <- stores (B left, A right)
//!         0   1   2   3   4   5   6          <- Player A holes
//! ```
//!
//! Sowing runs in increasing index order, wrapping from 15 back to 0.
//! The hole opposite `i` is `14 - i`.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Total number of slots (14 holes + 2 stores).
pub const SLOT_COUNT: usize = 16;

/// Holes on each side of the board.
pub const HOLES_PER_SIDE: usize = 7;

/// Player A's store.
pub const STORE_A: usize = 7;

/// Player B's store.
pub const STORE_B: usize = 15;

/// Seeds per hole in the standard opening.
pub const DEFAULT_SEEDS_PER_HOLE: u32 = 7;

/// Seed counts per slot.
///
/// Counts are unsigned: no slot can go negative, and arithmetic that would
/// underflow or overflow panics as an engine bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    slots: [u32; SLOT_COUNT],
}

impl Board {
    /// An empty board (all slots zero).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: [0; SLOT_COUNT],
        }
    }

    /// The opening layout: `seeds_per_hole` in each of the 14 holes, empty stores.
    ///
    /// ```
    /// use congkak_engine::core::Board;
    ///
    /// let board = Board::standard(7);
    /// assert_eq!(board.total(), 98);
    /// assert_eq!(board.get(7), 0);
    /// ```
    #[must_use]
    pub fn standard(seeds_per_hole: u32) -> Self {
        let mut board = Self::empty();
        for player in Player::ALL {
            for hole in player.holes() {
                board.slots[hole] = seeds_per_hole;
            }
        }
        board
    }

    /// Build a board from explicit slot counts.
    #[must_use]
    pub const fn from_slots(slots: [u32; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    /// All slot counts in index order.
    #[must_use]
    pub fn slots(&self) -> &[u32; SLOT_COUNT] {
        &self.slots
    }

    // === Slot Operations ===

    /// Seeds in `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> u32 {
        self.slots[slot]
    }

    /// Overwrite the count in `slot`.
    pub fn set(&mut self, slot: usize, count: u32) {
        self.slots[slot] = count;
    }

    /// Add one seed to `slot`, returning the new count.
    pub fn increment(&mut self, slot: usize) -> u32 {
        self.add(slot, 1)
    }

    /// Add `count` seeds to `slot`, returning the new count.
    pub fn add(&mut self, slot: usize, count: u32) -> u32 {
        let updated = self.slots[slot]
            .checked_add(count)
            .unwrap_or_else(|| panic!("slot {slot} overflowed adding {count} seeds"));
        self.slots[slot] = updated;
        updated
    }

    /// Empty `slot`, returning how many seeds it held.
    pub fn zero(&mut self, slot: usize) -> u32 {
        std::mem::take(&mut self.slots[slot])
    }

    // === Queries ===

    /// Check if `slot` is a store.
    #[must_use]
    pub const fn is_store(slot: usize) -> bool {
        slot == STORE_A || slot == STORE_B
    }

    /// The player whose side `slot` lies on (stores included).
    ///
    /// Returns `None` for indices outside the board.
    #[must_use]
    pub const fn side_of(slot: usize) -> Option<Player> {
        match slot {
            0..=STORE_A => Some(Player::A),
            8..=STORE_B => Some(Player::B),
            _ => None,
        }
    }

    /// The hole directly across from `hole`.
    #[must_use]
    pub fn opposite(hole: usize) -> usize {
        debug_assert!(hole < SLOT_COUNT && !Self::is_store(hole));
        14 - hole
    }

    /// Seeds in `player`'s store.
    #[must_use]
    pub fn store_of(&self, player: Player) -> u32 {
        self.slots[player.store()]
    }

    /// Seeds in `player`'s seven holes.
    #[must_use]
    pub fn side_total(&self, player: Player) -> u32 {
        player.holes().map(|hole| self.slots[hole]).sum()
    }

    /// True iff all seven holes on `player`'s side are empty.
    #[must_use]
    pub fn is_side_empty(&self, player: Player) -> bool {
        player.holes().all(|hole| self.slots[hole] == 0)
    }

    /// Sum of every slot.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.slots.iter().sum()
    }

    /// Move every seed left on `player`'s side into that player's store.
    ///
    /// Returns the number of seeds moved.
    pub fn collect_side(&mut self, player: Player) -> u32 {
        let collected: u32 = player.holes().map(|hole| self.zero(hole)).sum();
        self.add(player.store(), collected);
        collected
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard(DEFAULT_SEEDS_PER_HOLE)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = |range: &mut dyn Iterator<Item = usize>| {
            range
                .map(|i| format!("{:>3}", self.slots[i]))
                .collect::<String>()
        };
        writeln!(f, "     {}", row(&mut Player::B.holes().rev()))?;
        writeln!(f, "{:>3}{:>24}", self.slots[STORE_B], self.slots[STORE_A])?;
        write!(f, "     {}", row(&mut Player::A.holes()))
    }
}
