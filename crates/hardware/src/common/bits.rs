//! Bit-width helpers.
//!
//! Field widths in the controller are configured in bits (1..=64). Every value
//! crossing the request boundary is truncated to its field width with these
//! masks, the way a fixed-width hardware port would drop the upper bits.

/// Returns a mask with the low `width` bits set.
///
/// A width of 0 yields 0; widths of 64 or more yield `u64::MAX`.
///
/// # Arguments
///
/// * `width` - Number of low bits to set.
#[inline(always)]
pub const fn low_mask(width: u32) -> u64 {
    if width == 0 {
        0
    } else if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Computes `ceil(log2(value))` for a non-zero value.
///
/// `ceil_log2(1) == 0`, `ceil_log2(2) == 1`, `ceil_log2(3) == 2`, `ceil_log2(64) == 6`.
/// Returns 0 for 0 so callers never have to special-case it; configuration
/// validation rejects a zero block size before this matters.
#[inline]
pub const fn ceil_log2(value: u64) -> u32 {
    if value <= 1 {
        0
    } else {
        u64::BITS - (value - 1).leading_zeros()
    }
}
