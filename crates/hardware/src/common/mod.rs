//! Common utilities and types used throughout the cache controller model.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Bit Helpers:** Width masks and `ceil(log2)` used to derive field widths.
//! 2. **Error Handling:** Configuration errors and table invariant violations.

/// Bit-width helpers (masks, logarithms).
pub mod bits;

/// Error types for configuration and invariant checking.
pub mod error;

pub use bits::{ceil_log2, low_mask};
pub use error::{ConfigError, InvariantViolation};
