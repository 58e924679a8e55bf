//! Fully-Associative Cache Controller.
//!
//! This module models the decision logic of a fixed-capacity, fully-associative
//! write-back cache with exact LRU replacement. Components, leaves first:
//!
//! - [`decoder`]: splits addresses into tag and block offset.
//! - [`line`]: the fixed array of line records that holds all cache state.
//! - [`policies`]: the rank-permutation LRU policy.
//! - [`processor`]: decides a tick's response and state changes.
//! - [`controller`]: owns everything and exposes `tick` and `reset`.
//!
//! The controller never performs memory I/O. It signals dirty evictions for the
//! host to write back and returns a placeholder for read misses.

/// Top-level controller façade.
pub mod controller;

/// Address tag/offset decoding.
pub mod decoder;

/// Cache line records and the line table.
pub mod line;

/// Cache replacement policy implementations.
pub mod policies;

/// Per-tick request processing.
pub mod processor;

/// Request, response and state signals.
pub mod signals;

/// Staged per-tick line updates.
pub mod staged;

pub use controller::CacheController;
pub use decoder::{AddressDecoder, DecodedAddress};
pub use line::{CacheLine, CacheLineTable};
pub use policies::{LruRankPolicy, ReplacementPolicy};
pub use processor::{Eviction, MISS_FILL, RequestProcessor, TickOutcome};
pub use signals::{ControllerState, Request, Response, WriteBack};
pub use staged::{LineUpdate, StagedUpdates};
