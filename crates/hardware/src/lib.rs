//! Fully-associative LRU cache controller model.
//!
//! This crate implements a tick-accurate model of a small cache controller with the following:
//! 1. **Cache:** Address decoding, line table, rank-permutation LRU, and per-tick request processing.
//! 2. **Configuration:** JSON-loadable geometry with construction-time validation.
//! 3. **Statistics:** Hit, miss, and eviction counters with a printable report.
//!
//! ```
//! use lrucache_core::{CacheController, Config, Request};
//!
//! let mut cache = CacheController::new(&Config::default()).unwrap();
//!
//! let first = cache.tick(&Request::write(0x20, 0xA5A5_A5A5));
//! assert!(!first.hit);
//!
//! let second = cache.tick(&Request::read(0x20));
//! assert!(second.hit);
//! assert_eq!(second.read_data, 0xA5A5_A5A5);
//! ```

/// Cache controller (decoder, line table, replacement policy, request processing).
pub mod cache;
/// Common helpers and error types.
pub mod common;
/// Controller configuration (defaults, geometry validation).
pub mod config;
/// Controller statistics collection and reporting.
pub mod stats;

/// Top-level controller; construct with `CacheController::new`.
pub use crate::cache::CacheController;
/// Per-tick input and output signals.
pub use crate::cache::{Request, Response};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
