//! # Power-of-Two Helpers
//!
//! Used to derive a chunk's shift amount and mask from its size.
//!
//! All helpers operate on `i32`. Non-positive input is not an error:
//! [`ceil_power_of_two`] returns 0 for it and [`is_power_of_two`] reports
//! `false`. Callers that would rather reject such input should go through
//! [`checked_ceil_power_of_two`] or [`exponent_of`].

use crate::error::{CodecError, CodecResult};

/// Largest power of two representable as a positive `i32`.
pub const MAX_POWER_OF_TWO: i32 = 1 << 30;

/// Returns the smallest power of two greater than or equal to `v`.
///
/// Computed by smearing the highest set bit of `v - 1` downward and adding
/// one.
///
/// # Quirks
///
/// - `v <= 0` returns `0`.
/// - `v > 2^30` has no representable result; the final increment wraps and
///   `i32::MIN` is returned.
///
/// # Example
///
/// ```
/// use chunkspace_math::power_of_two::ceil_power_of_two;
///
/// assert_eq!(ceil_power_of_two(5), 8);
/// assert_eq!(ceil_power_of_two(0), 0);
/// ```
#[inline]
#[must_use]
pub const fn ceil_power_of_two(v: i32) -> i32 {
    if v <= 0 {
        return 0;
    }
    let mut result = v - 1;
    result |= result >> 1;
    result |= result >> 2;
    result |= result >> 4;
    result |= result >> 8;
    result |= result >> 16;
    result.wrapping_add(1)
}

/// Like [`ceil_power_of_two`], but `None` where that function returns one
/// of its quirk values.
#[inline]
#[must_use]
pub const fn checked_ceil_power_of_two(v: i32) -> Option<i32> {
    if v <= 0 || v > MAX_POWER_OF_TWO {
        None
    } else {
        Some(ceil_power_of_two(v))
    }
}

/// Returns true if `v` is a power of two (1, 2, 4, ...).
///
/// Never true for `v <= 0`.
#[inline]
#[must_use]
pub const fn is_power_of_two(v: i32) -> bool {
    v == ceil_power_of_two(v)
}

/// Returns the exponent `e` with `2^e == v`.
///
/// Counts right shifts until the value drops to one. For a value that is not
/// a power of two this is the floor of its base-2 logarithm; `v <= 1`
/// yields 0.
#[inline]
#[must_use]
pub const fn size_of_power(v: i32) -> u32 {
    let mut power = 0;
    let mut val = v;
    while val > 1 {
        val >>= 1;
        power += 1;
    }
    power
}

/// Returns the exponent of `size`, rejecting anything that is not a power
/// of two.
///
/// # Errors
///
/// Returns `CodecError::NotPowerOfTwo` if `size` is not 1, 2, 4, ...
#[inline]
pub fn exponent_of(size: i32) -> CodecResult<u32> {
    if is_power_of_two(size) {
        Ok(size_of_power(size))
    } else {
        Err(CodecError::NotPowerOfTwo(size))
    }
}
