//! Staged line updates.
//!
//! A tick never mutates the line table while it is still deciding what to do.
//! The request processor and the replacement policy read the start-of-tick
//! table and record every mutation here; the controller applies the whole
//! list at the tick boundary with [`CacheLineTable::apply`].
//!
//! [`CacheLineTable::apply`]: super::line::CacheLineTable::apply

/// A single mutation of one cache line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineUpdate {
    /// Overwrite the LRU rank of a line.
    SetRank {
        /// Target line.
        index: usize,
        /// New rank.
        rank: usize,
    },

    /// Overwrite the payload of a resident line.
    Store {
        /// Target line.
        index: usize,
        /// New payload.
        data: u64,
    },

    /// Mark a line as modified.
    MarkDirty {
        /// Target line.
        index: usize,
    },

    /// Install a new block into a line.
    Allocate {
        /// Target line.
        index: usize,
        /// Tag of the incoming block.
        tag: u64,
        /// Whether the incoming block is already modified.
        dirty: bool,
        /// Initial payload.
        data: u64,
    },
}

/// Ordered list of line updates produced by one tick.
///
/// The buffer is sized at construction to hold a full tick (one rank update per
/// line plus the payload updates), so steady-state ticks do not allocate.
#[derive(Clone, Debug, Default)]
pub struct StagedUpdates {
    updates: Vec<LineUpdate>,
}

impl StagedUpdates {
    /// Extra slots beyond the per-line rank updates: an allocate or a
    /// store plus a dirty mark.
    const PAYLOAD_SLOTS: usize = 2;

    /// Most updates a single tick can stage on a `capacity`-line table.
    pub const fn max_len(capacity: usize) -> usize {
        capacity + Self::PAYLOAD_SLOTS
    }

    /// Creates a buffer large enough for any tick on a `capacity`-line table.
    pub fn for_capacity(capacity: usize) -> Self {
        Self {
            updates: Vec::with_capacity(Self::max_len(capacity)),
        }
    }

    /// Records an update.
    #[inline]
    pub fn push(&mut self, update: LineUpdate) {
        self.updates.push(update);
    }

    /// Returns the staged updates in the order they were recorded.
    pub fn as_slice(&self) -> &[LineUpdate] {
        &self.updates
    }

    /// Number of staged updates.
    pub const fn len(&self) -> usize {
        self.updates.len()
    }

    /// Whether nothing has been staged.
    pub const fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Drops all staged updates, keeping the allocation.
    pub fn clear(&mut self) {
        self.updates.clear();
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, LineUpdate> {
        self.updates.drain(..)
    }
}
