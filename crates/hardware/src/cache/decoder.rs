//! Address decoding.
//!
//! Splits a request address into the tag that identifies a memory block and
//! the offset of the addressed unit within that block:
//!
//! ```text
//!  address_width-1          offset_width  offset_width-1       0
//! +-----------------------------------+------------------------+
//! |                tag                |         offset         |
//! +-----------------------------------+------------------------+
//! ```

use crate::config::CacheGeometry;

/// A request address split into its tag and block offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order `tag_width` bits.
    pub tag: u64,
    /// Low-order `offset_width` bits.
    pub offset: u64,
}

/// Pure tag/offset splitter for a fixed geometry.
#[derive(Clone, Copy, Debug)]
pub struct AddressDecoder {
    address_mask: u64,
    offset_mask: u64,
    tag_mask: u64,
    offset_width: u32,
}

impl AddressDecoder {
    /// Creates a decoder for the given geometry.
    pub const fn new(geometry: &CacheGeometry) -> Self {
        Self {
            address_mask: geometry.address_mask(),
            offset_mask: geometry.offset_mask(),
            tag_mask: geometry.tag_mask(),
            offset_width: geometry.offset_width,
        }
    }

    /// Splits `address` into tag and offset.
    ///
    /// Bits above the configured address width are ignored.
    #[inline]
    pub const fn decode(&self, address: u64) -> DecodedAddress {
        let address = address & self.address_mask;
        DecodedAddress {
            tag: (address >> self.offset_width) & self.tag_mask,
            offset: address & self.offset_mask,
        }
    }

    /// Reassembles an address from a tag and an offset.
    ///
    /// Inverse of [`decode`](Self::decode) for in-range fields.
    #[inline]
    pub const fn encode(&self, tag: u64, offset: u64) -> u64 {
        (((tag & self.tag_mask) << self.offset_width) | (offset & self.offset_mask))
            & self.address_mask
    }

    /// Width of the offset field in bits.
    #[inline]
    pub const fn offset_width(&self) -> u32 {
        self.offset_width
    }
}
