//! Configuration system for the cache controller model.
//!
//! This module defines the structures used to parameterize the controller. It provides:
//! 1. **Defaults:** Baseline geometry (16 lines, 1-byte blocks, 8-bit addresses, 32-bit data).
//! 2. **Structures:** General (observability) settings and cache geometry settings.
//! 3. **Validation:** Conversion of a raw `CacheConfig` into a checked `CacheGeometry`.
//!
//! Configuration is immutable once a controller has been constructed. It is read
//! from JSON (`Config::from_json_str`, `Config::from_json_file`) or built with
//! `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::bits::{ceil_log2, low_mask};
use crate::common::error::ConfigError;

/// Default configuration constants for the controller.
mod defaults {
    /// Number of cache lines.
    pub const CAPACITY: usize = 16;

    /// Block size in bytes (one addressable unit per line).
    pub const BLOCK_SIZE: u64 = 1;

    /// Request address width in bits.
    pub const ADDRESS_WIDTH: u32 = 8;

    /// Line payload width in bits.
    pub const DATA_WIDTH: u32 = 32;

    /// Invariant checks run after every tick in debug builds regardless of
    /// this setting; enabling it extends them to release builds.
    pub const CHECK_INVARIANTS: bool = false;
}

/// Root configuration structure.
///
/// Fields that are omitted from a JSON document fall back to their defaults.
///
/// # Examples
///
/// ```
/// use lrucache_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_ticks": true },
///     "cache": { "capacity": 4, "block_size": 16, "address_width": 16 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace_ticks);
/// assert_eq!(config.cache.capacity, 4);
/// assert_eq!(config.cache.data_width, 32);
///
/// let geometry = config.cache.geometry().unwrap();
/// assert_eq!(geometry.offset_width, 4);
/// assert_eq!(geometry.tag_width, 12);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Observability settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed or a field
    /// has the wrong type. Geometry is not validated here; see
    /// [`CacheConfig::geometry`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Json`] if its contents are malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// General controller settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `debug`-level tracing event with the request and response of every tick.
    #[serde(default)]
    pub trace_ticks: bool,

    /// Check table invariants after every tick in release builds too.
    #[serde(default = "GeneralConfig::default_check_invariants")]
    pub check_invariants: bool,
}

impl GeneralConfig {
    const fn default_check_invariants() -> bool {
        defaults::CHECK_INVARIANTS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_ticks: false,
            check_invariants: defaults::CHECK_INVARIANTS,
        }
    }
}

/// Raw cache geometry as supplied by the host.
///
/// Use [`CacheConfig::geometry`] to validate it and derive field widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of lines (N).
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,
    /// Block size in bytes; must be a power of two.
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: u64,
    /// Request address width in bits.
    #[serde(default = "CacheConfig::default_address_width")]
    pub address_width: u32,
    /// Line payload width in bits.
    #[serde(default = "CacheConfig::default_data_width")]
    pub data_width: u32,
}

impl CacheConfig {
    const fn default_capacity() -> usize {
        defaults::CAPACITY
    }

    const fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    const fn default_address_width() -> u32 {
        defaults::ADDRESS_WIDTH
    }

    const fn default_data_width() -> u32 {
        defaults::DATA_WIDTH
    }

    /// Validates the configuration and derives the field layout.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroCapacity`] if `capacity` is 0.
    /// * [`ConfigError::BlockSizeNotPowerOfTwo`] if `block_size` is 0 or not a power of two.
    /// * [`ConfigError::AddressWidthOutOfRange`] / [`ConfigError::DataWidthOutOfRange`]
    ///   if a width is outside 1..=64.
    /// * [`ConfigError::NoTagBits`] if the offset consumes every address bit.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.block_size));
        }
        if !(1..=u64::BITS).contains(&self.address_width) {
            return Err(ConfigError::AddressWidthOutOfRange(self.address_width));
        }
        if !(1..=u64::BITS).contains(&self.data_width) {
            return Err(ConfigError::DataWidthOutOfRange(self.data_width));
        }

        let offset_width = ceil_log2(self.block_size);
        if offset_width >= self.address_width {
            return Err(ConfigError::NoTagBits {
                address_width: self.address_width,
                offset_width,
            });
        }

        Ok(CacheGeometry {
            capacity: self.capacity,
            block_size: self.block_size,
            address_width: self.address_width,
            data_width: self.data_width,
            offset_width,
            tag_width: self.address_width - offset_width,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            block_size: defaults::BLOCK_SIZE,
            address_width: defaults::ADDRESS_WIDTH,
            data_width: defaults::DATA_WIDTH,
        }
    }
}

/// Validated cache geometry with derived field widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    /// Number of lines (N).
    pub capacity: usize,
    /// Block size in bytes.
    pub block_size: u64,
    /// Request address width in bits.
    pub address_width: u32,
    /// Line payload width in bits.
    pub data_width: u32,
    /// `ceil(log2(block_size))`.
    pub offset_width: u32,
    /// `address_width - offset_width`.
    pub tag_width: u32,
}

impl CacheGeometry {
    /// Mask selecting the valid bits of an address.
    #[inline]
    pub const fn address_mask(&self) -> u64 {
        low_mask(self.address_width)
    }

    /// Mask selecting the valid bits of a data word.
    #[inline]
    pub const fn data_mask(&self) -> u64 {
        low_mask(self.data_width)
    }

    /// Mask selecting the offset bits of an address.
    #[inline]
    pub const fn offset_mask(&self) -> u64 {
        low_mask(self.offset_width)
    }

    /// Mask selecting the bits of a tag (after shifting out the offset).
    #[inline]
    pub const fn tag_mask(&self) -> u64 {
        low_mask(self.tag_width)
    }
}
