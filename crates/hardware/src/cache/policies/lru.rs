//! Least Recently Used (LRU) Replacement Policy.
//!
//! Every line carries a rank, and the ranks of all lines always form the
//! permutation `0..N`: rank 0 is the most recently used line and rank `N-1`
//! the least recently used one. Invalid lines are ranked like any other line.
//!
//! An access is a move-to-front on that permutation. The touched line drops to
//! rank 0 and every line that was more recent than it shifts back by one;
//! lines that were already older keep their rank.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(N), one pass over the table
//!   - `select_victim()`: O(N), one pass over the table
//! - **Space Complexity:** O(N), one rank per line
//! - **Hardware Cost:** High - every line compares its rank on every access

use super::ReplacementPolicy;
use crate::cache::line::CacheLineTable;
use crate::cache::staged::{LineUpdate, StagedUpdates};

/// Rank-permutation LRU policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruRankPolicy;

impl LruRankPolicy {
    /// Creates the policy.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruRankPolicy {
    /// Stages a move-to-front of `index`.
    ///
    /// The touched line gets rank 0. Every other line whose rank is strictly
    /// below the touched line's current rank gets its rank plus one. Touching
    /// the line that is already at rank 0 stages nothing.
    fn touch(&self, table: &CacheLineTable, index: usize, staged: &mut StagedUpdates) {
        let pivot = table.rank(index);
        if pivot == 0 {
            return;
        }

        for (j, line) in table.lines().iter().enumerate() {
            if j != index && line.rank < pivot {
                staged.push(LineUpdate::SetRank {
                    index: j,
                    rank: line.rank + 1,
                });
            }
        }
        staged.push(LineUpdate::SetRank { index, rank: 0 });
    }

    /// Returns the line with the highest rank.
    ///
    /// Lines are scanned in ascending index order and a later line only
    /// replaces the current candidate when its rank is strictly greater, so
    /// ties resolve to the lowest index.
    fn select_victim(&self, table: &CacheLineTable) -> usize {
        let mut victim = 0;
        let mut max_rank = 0;
        for (i, line) in table.lines().iter().enumerate() {
            if i == 0 || line.rank > max_rank {
                victim = i;
                max_rank = line.rank;
            }
        }
        victim
    }

    /// Gives line `i` rank `i`.
    fn reset_ranks(&self, table: &mut CacheLineTable) {
        for i in 0..table.len() {
            table.set_rank(i, i);
        }
    }
}
