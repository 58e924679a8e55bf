//! Configuration parsing and geometry validation.

use std::io::Write;

use lrucache_core::common::error::ConfigError;
use lrucache_core::config::{CacheConfig, Config};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn default_config() {
    let config = Config::default();
    assert!(!config.general.trace_ticks);
    assert!(!config.general.check_invariants);
    assert_eq!(
        config.cache,
        CacheConfig {
            capacity: 16,
            block_size: 1,
            address_width: 8,
            data_width: 32,
        }
    );
}

#[test]
fn default_geometry() {
    let geometry = match CacheConfig::default().geometry() {
        Ok(g) => g,
        Err(e) => panic!("default geometry rejected: {e}"),
    };
    assert_eq!(geometry.offset_width, 0);
    assert_eq!(geometry.tag_width, 8);
    assert_eq!(geometry.address_mask(), 0xFF);
    assert_eq!(geometry.data_mask(), 0xFFFF_FFFF);
}

#[test]
fn empty_json_uses_defaults() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config.cache, CacheConfig::default());
    assert!(!config.general.trace_ticks);
}

#[test]
fn partial_json_overrides_fields() {
    let json = r#"{
        "general": { "check_invariants": true },
        "cache": { "capacity": 64, "data_width": 64 }
    }"#;
    let config = Config::from_json_str(json).unwrap();
    assert!(config.general.check_invariants);
    assert!(!config.general.trace_ticks);
    assert_eq!(config.cache.capacity, 64);
    assert_eq!(config.cache.data_width, 64);
    assert_eq!(config.cache.block_size, 1);
    assert_eq!(config.cache.address_width, 8);
}

#[test]
fn malformed_json_is_rejected() {
    let result = Config::from_json_str(r#"{ "cache": { "capacity": "many" } }"#);
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "cache": {{ "capacity": 8, "block_size": 4, "address_width": 12 }} }}"#
    )
    .unwrap();

    let config = Config::from_json_file(file.path()).unwrap();
    let geometry = config.cache.geometry().unwrap();
    assert_eq!(geometry.capacity, 8);
    assert_eq!(geometry.offset_width, 2);
    assert_eq!(geometry.tag_width, 10);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[rstest]
#[case(1, 0)]
#[case(2, 1)]
#[case(8, 3)]
#[case(64, 6)]
fn offset_width_is_log2_of_block_size(#[case] block_size: u64, #[case] offset_width: u32) {
    let config = CacheConfig {
        block_size,
        address_width: 16,
        ..CacheConfig::default()
    };
    let geometry = config.geometry().unwrap();
    assert_eq!(geometry.block_size, block_size);
    assert_eq!(geometry.offset_width, offset_width);
    assert_eq!(geometry.tag_width, 16 - offset_width);
}

#[test]
fn zero_capacity_is_rejected() {
    let config = CacheConfig {
        capacity: 0,
        ..CacheConfig::default()
    };
    assert!(matches!(config.geometry(), Err(ConfigError::ZeroCapacity)));
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(12)]
fn non_power_of_two_block_is_rejected(#[case] block_size: u64) {
    let config = CacheConfig {
        block_size,
        ..CacheConfig::default()
    };
    assert!(matches!(
        config.geometry(),
        Err(ConfigError::BlockSizeNotPowerOfTwo(b)) if b == block_size
    ));
}

#[rstest]
#[case(0)]
#[case(65)]
fn address_width_out_of_range_is_rejected(#[case] address_width: u32) {
    let config = CacheConfig {
        address_width,
        ..CacheConfig::default()
    };
    assert!(matches!(
        config.geometry(),
        Err(ConfigError::AddressWidthOutOfRange(w)) if w == address_width
    ));
}

#[rstest]
#[case(0)]
#[case(128)]
fn data_width_out_of_range_is_rejected(#[case] data_width: u32) {
    let config = CacheConfig {
        data_width,
        ..CacheConfig::default()
    };
    assert!(matches!(
        config.geometry(),
        Err(ConfigError::DataWidthOutOfRange(w)) if w == data_width
    ));
}

#[test]
fn block_covering_the_address_is_rejected() {
    let config = CacheConfig {
        block_size: 256,
        address_width: 8,
        ..CacheConfig::default()
    };
    assert!(matches!(
        config.geometry(),
        Err(ConfigError::NoTagBits {
            address_width: 8,
            offset_width: 8
        })
    ));
}

#[test]
fn error_messages_name_the_problem() {
    let config = CacheConfig {
        block_size: 3,
        ..CacheConfig::default()
    };
    let message = config.geometry().map(|_| ()).unwrap_err().to_string();
    assert_eq!(message, "block size 3 is not a power of two");
}
