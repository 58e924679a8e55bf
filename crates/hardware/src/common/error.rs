//! Configuration and invariant error definitions.
//!
//! The controller has no runtime error path: every tick is processed to
//! completion. Errors therefore fall into two groups:
//! 1. **Configuration Errors:** Rejected geometry, reported once at construction.
//! 2. **Invariant Violations:** Table states that the tick algorithms can never
//!    produce. They are reported by `CacheLineTable::check_invariants` and
//!    asserted after every tick in debug builds.

use thiserror::Error;

/// Errors raised while loading or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The cache must hold at least one line.
    #[error("cache capacity must be at least one line")]
    ZeroCapacity,

    /// Block size must be a non-zero power of two.
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(u64),

    /// Address width must be within 1..=64 bits.
    #[error("address width {0} is outside 1..=64 bits")]
    AddressWidthOutOfRange(u32),

    /// Data width must be within 1..=64 bits.
    #[error("data width {0} is outside 1..=64 bits")]
    DataWidthOutOfRange(u32),

    /// The block offset consumes the whole address, leaving no tag bits.
    #[error("address width {address_width} leaves no tag bits after a {offset_width}-bit offset")]
    NoTagBits {
        /// Configured address width in bits.
        address_width: u32,
        /// Derived offset width in bits.
        offset_width: u32,
    },

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A line table state that breaks one of the table invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A line carries a rank outside `0..capacity`.
    #[error("line {index} has rank {rank}, capacity is {capacity}")]
    RankOutOfRange {
        /// Offending line.
        index: usize,
        /// Rank held by the line.
        rank: usize,
        /// Number of lines in the table.
        capacity: usize,
    },

    /// Two lines share a rank, so the ranks are not a permutation.
    #[error("lines {first} and {second} share rank {rank}")]
    DuplicateRank {
        /// Lower-indexed line holding the rank.
        first: usize,
        /// Higher-indexed line holding the rank.
        second: usize,
        /// Shared rank.
        rank: usize,
    },

    /// Two valid lines map the same tag.
    #[error("valid lines {first} and {second} both hold tag {tag:#x}")]
    DuplicateTag {
        /// Lower-indexed line holding the tag.
        first: usize,
        /// Higher-indexed line holding the tag.
        second: usize,
        /// Shared tag.
        tag: u64,
    },
}
