//! Cache line storage.
//!
//! The table is a fixed array of `capacity` line records created once at
//! construction. Lines are identified by position; their contents are
//! overwritten on allocation and their ranks on every access, but the array
//! itself never grows or shrinks.
//!
//! Two invariants hold at every tick boundary:
//! 1. The ranks of all lines form the permutation `0..capacity`.
//! 2. No two valid lines hold the same tag.

use super::staged::{LineUpdate, StagedUpdates};
use crate::common::error::InvariantViolation;

/// A single cache line record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the resident block.
    pub tag: u64,
    /// Line holds a live mapping.
    pub valid: bool,
    /// Line was written since it was allocated.
    pub dirty: bool,
    /// Recency rank; 0 is most recently used, `capacity - 1` least.
    pub rank: usize,
    /// Block payload.
    pub data: u64,
}

impl CacheLine {
    /// A cleared line at the given rank.
    const fn empty(rank: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            rank,
            data: 0,
        }
    }

    /// Whether this line must be written back before it is reused.
    #[inline]
    pub const fn needs_write_back(&self) -> bool {
        self.valid && self.dirty
    }
}

/// Fixed-size table of cache lines.
#[derive(Clone, Debug)]
pub struct CacheLineTable {
    lines: Vec<CacheLine>,
}

impl CacheLineTable {
    /// Creates a table of `capacity` cleared lines with line `i` at rank `i`.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: (0..capacity).map(CacheLine::empty).collect(),
        }
    }

    /// Number of lines.
    #[inline]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the table has no lines. Never true for a validated geometry.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines in index order.
    #[inline]
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// The line at `index`.
    #[inline]
    pub fn line(&self, index: usize) -> &CacheLine {
        &self.lines[index]
    }

    /// Finds the valid line holding `tag`.
    ///
    /// Lines are scanned in ascending index order and the first match wins.
    pub fn lookup(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Payload of the line at `index`.
    #[inline]
    pub fn read(&self, index: usize) -> u64 {
        self.lines[index].data
    }

    /// Overwrites the payload of the line at `index`.
    #[inline]
    pub fn write_at(&mut self, index: usize, data: u64) {
        self.lines[index].data = data;
    }

    /// Marks the line at `index` as modified.
    #[inline]
    pub fn mark_dirty(&mut self, index: usize) {
        self.lines[index].dirty = true;
    }

    /// Marks the line at `index` as unmodified.
    #[inline]
    pub fn mark_clean(&mut self, index: usize) {
        self.lines[index].dirty = false;
    }

    /// Drops the mapping held by the line at `index`. Its rank is kept.
    #[inline]
    pub fn invalidate(&mut self, index: usize) {
        let line = &mut self.lines[index];
        line.valid = false;
        line.dirty = false;
    }

    /// Installs a block into the line at `index`. Its rank is kept.
    #[inline]
    pub fn allocate(&mut self, index: usize, tag: u64, dirty: bool, data: u64) {
        let line = &mut self.lines[index];
        line.tag = tag;
        line.valid = true;
        line.dirty = dirty;
        line.data = data;
    }

    /// Rank of the line at `index`.
    #[inline]
    pub fn rank(&self, index: usize) -> usize {
        self.lines[index].rank
    }

    /// Overwrites the rank of the line at `index`.
    #[inline]
    pub fn set_rank(&mut self, index: usize, rank: usize) {
        self.lines[index].rank = rank;
    }

    /// Clears the contents of every line. Ranks are left to the replacement policy.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            *line = CacheLine::empty(line.rank);
        }
    }

    /// Applies and drains a tick's staged updates, in order.
    pub fn apply(&mut self, staged: &mut StagedUpdates) {
        for update in staged.drain() {
            match update {
                LineUpdate::SetRank { index, rank } => self.set_rank(index, rank),
                LineUpdate::Store { index, data } => self.write_at(index, data),
                LineUpdate::MarkDirty { index } => self.mark_dirty(index),
                LineUpdate::Allocate {
                    index,
                    tag,
                    dirty,
                    data,
                } => self.allocate(index, tag, dirty, data),
            }
        }
    }

    /// Verifies the rank-permutation and unique-tag invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning lines in index order.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let capacity = self.lines.len();
        let mut holder: Vec<Option<usize>> = vec![None; capacity];

        for (index, line) in self.lines.iter().enumerate() {
            let slot = holder
                .get_mut(line.rank)
                .ok_or(InvariantViolation::RankOutOfRange {
                    index,
                    rank: line.rank,
                    capacity,
                })?;
            if let Some(first) = *slot {
                return Err(InvariantViolation::DuplicateRank {
                    first,
                    second: index,
                    rank: line.rank,
                });
            }
            *slot = Some(index);
        }

        for (first, a) in self.lines.iter().enumerate().filter(|(_, l)| l.valid) {
            if let Some(offset) = self.lines[first + 1..]
                .iter()
                .position(|b| b.valid && b.tag == a.tag)
            {
                return Err(InvariantViolation::DuplicateTag {
                    first,
                    second: first + 1 + offset,
                    tag: a.tag,
                });
            }
        }

        Ok(())
    }
}
