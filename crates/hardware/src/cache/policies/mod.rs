//! Cache Replacement Policies.
//!
//! A policy decides which line a miss overwrites and how an access changes the
//! recency order. Policies keep their state in the per-line `rank` field of the
//! [`CacheLineTable`], so a policy value itself is stateless and every decision
//! is a function of the start-of-tick table.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, as an explicit rank permutation.

/// Least Recently Used replacement policy.
pub mod lru;

pub use lru::LruRankPolicy;

use super::line::CacheLineTable;
use super::staged::StagedUpdates;

/// Trait for cache replacement policies.
///
/// Defines the interface for recording an access and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync {
    /// Stages the rank changes caused by an access to `index`.
    ///
    /// Reads ranks only from `table`, which must be the start-of-tick state.
    ///
    /// # Arguments
    ///
    /// * `table` - The unmodified line table.
    /// * `index` - The line that was accessed.
    /// * `staged` - Receives the rank updates.
    fn touch(&self, table: &CacheLineTable, index: usize, staged: &mut StagedUpdates);

    /// Selects the line to evict on a miss.
    ///
    /// # Returns
    ///
    /// The index of the victim line.
    fn select_victim(&self, table: &CacheLineTable) -> usize;

    /// Restores the initial ranking.
    fn reset_ranks(&self, table: &mut CacheLineTable);
}
