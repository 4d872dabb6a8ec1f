//! # Signed-Pair Codec
//!
//! Packs two signed coordinates into one non-negative 64-bit key and back.
//!
//! ## Pipeline
//!
//! 1. Zig-zag each `i32` into a `u32`: `0, -1, 1, -2, 2, ...` become
//!    `0, 1, 2, 3, 4, ...`
//! 2. Cantor-pair the two results: `((k1 + k2)(k1 + k2 + 1)) / 2 + k2`
//!
//! ## Widths
//!
//! | Stage      | Type  |
//! |------------|-------|
//! | coordinate | `i32` |
//! | zig-zag    | `u32` |
//! | key        | `u64` |
//!
//! Pairing two full-range `u32` values can exceed 64 bits. Any pair with
//! both components in `[-2^30, 2^30]` always fits (see
//! [`SAFE_COMPONENT_MAGNITUDE`]); outside that, use [`checked_encode`] or
//! [`try_encode`].

use crate::error::{CodecError, CodecResult};

/// Coordinates with magnitude up to this value always encode without
/// overflowing the key.
pub const SAFE_COMPONENT_MAGNITUDE: i32 = 1 << 30;

// =============================================================================
// Zig-zag
// =============================================================================

/// Maps a signed integer onto the non-negative integers.
///
/// `x >= 0` maps to `2x`, `x < 0` maps to `-2x - 1`. Total over `i32`.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn map_to_non_negative(x: i32) -> u32 {
    (x.wrapping_shl(1) ^ (x >> 31)) as u32
}

/// Inverse of [`map_to_non_negative`]. Total over `u32`.
///
/// Even `y` maps to `y / 2`, odd `y` maps to `-(y / 2) - 1`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn unmap_from_non_negative(y: u32) -> i32 {
    ((y >> 1) as i32) ^ -((y & 1) as i32)
}

// =============================================================================
// Cantor pairing
// =============================================================================

/// Exact pairing value, never overflows (both inputs are at most 64 bits).
#[inline]
const fn wide_pair(k1: u64, k2: u64) -> u128 {
    let sum = k1 as u128 + k2 as u128;
    sum * (sum + 1) / 2 + k2 as u128
}

/// Cantor pairing of two non-negative integers.
///
/// The result must fit in a `u64`; this is checked in debug builds only.
/// Release builds truncate. Use [`checked_pair`] or [`try_pair`] when the
/// inputs are not known to be in range.
///
/// # Example
///
/// ```
/// use chunkspace_math::pairing::pair;
///
/// assert_eq!(pair(3, 4), 32);
/// ```
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn pair(k1: u64, k2: u64) -> u64 {
    let wide = wide_pair(k1, k2);
    debug_assert!(wide <= u64::MAX as u128, "pairing overflows a 64-bit key");
    wide as u64
}

/// Cantor pairing. Returns `None` if the key does not fit in a `u64`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn checked_pair(k1: u64, k2: u64) -> Option<u64> {
    let wide = wide_pair(k1, k2);
    if wide <= u64::MAX as u128 {
        Some(wide as u64)
    } else {
        None
    }
}

/// Cantor pairing with an error on overflow.
///
/// # Errors
///
/// Returns `CodecError::PairOverflow` if the key does not fit in a `u64`.
#[inline]
pub fn try_pair(k1: u64, k2: u64) -> CodecResult<u64> {
    checked_pair(k1, k2).ok_or(CodecError::PairOverflow { k1, k2 })
}

/// Floor of the square root of `n`.
///
/// Float estimate, then corrected so the result is exact for every input
/// this module produces (`n < 2^68`).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn isqrt(n: u128) -> u128 {
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Inverts [`pair`], returning `(k1, k2)`.
///
/// Every `u64` is the pairing of exactly one `(k1, k2)`, so this is total.
/// The triangle index `j = floor(sqrt(0.25 + 2c) - 0.5)` is computed as
/// `(isqrt(8c + 1) - 1) / 2` in 128-bit integers, which stays exact where
/// the float form would round.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn unpair(c: u64) -> (u64, u64) {
    let c = u128::from(c);
    let j = (isqrt(8 * c + 1) - 1) / 2;
    let k2 = c - j * (j + 1) / 2;
    let k1 = j - k2;
    (k1 as u64, k2 as u64)
}

/// First component of [`unpair`].
#[inline]
#[must_use]
pub fn unpair_first(c: u64) -> u64 {
    unpair(c).0
}

/// Second component of [`unpair`].
#[inline]
#[must_use]
pub fn unpair_second(c: u64) -> u64 {
    unpair(c).1
}

// =============================================================================
// Signed pairs
// =============================================================================

/// Encodes a signed pair into one key.
///
/// Exact for `|x|, |y| <= SAFE_COMPONENT_MAGNITUDE`. Beyond that the key may
/// overflow; debug builds panic, release builds truncate.
///
/// # Example
///
/// ```
/// use chunkspace_math::pairing::{decode, encode};
///
/// let key = encode(-12, 7);
/// assert_eq!(decode(key), (-12, 7));
/// ```
#[inline]
#[must_use]
pub const fn encode(x: i32, y: i32) -> u64 {
    pair(
        map_to_non_negative(x) as u64,
        map_to_non_negative(y) as u64,
    )
}

/// Encodes a signed pair. Returns `None` if the key does not fit in a `u64`.
#[inline]
#[must_use]
pub const fn checked_encode(x: i32, y: i32) -> Option<u64> {
    checked_pair(
        map_to_non_negative(x) as u64,
        map_to_non_negative(y) as u64,
    )
}

/// Encodes a signed pair with an error on overflow.
///
/// # Errors
///
/// Returns `CodecError::EncodeOverflow` if the key does not fit in a `u64`.
pub fn try_encode(x: i32, y: i32) -> CodecResult<u64> {
    checked_encode(x, y).ok_or_else(|| {
        tracing::debug!(x, y, "signed pair overflows key");
        CodecError::EncodeOverflow { x, y }
    })
}

/// Decodes a key produced by [`encode`].
///
/// Keys that `encode` cannot produce have components wider than 32 bits;
/// debug builds panic on them, release builds truncate. Use [`try_decode`]
/// for keys from an untrusted source.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decode(c: u64) -> (i32, i32) {
    let (k1, k2) = unpair(c);
    debug_assert!(
        k1 <= u32::MAX as u64 && k2 <= u32::MAX as u64,
        "key was not produced by encode"
    );
    (
        unmap_from_non_negative(k1 as u32),
        unmap_from_non_negative(k2 as u32),
    )
}

/// Decodes a key, rejecting keys `encode` cannot produce.
///
/// # Errors
///
/// Returns `CodecError::KeyOutOfRange` if either component exceeds `u32`.
pub fn try_decode(c: u64) -> CodecResult<(i32, i32)> {
    let (k1, k2) = unpair(c);
    match (u32::try_from(k1), u32::try_from(k2)) {
        (Ok(a), Ok(b)) => Ok((unmap_from_non_negative(a), unmap_from_non_negative(b))),
        _ => {
            tracing::debug!(key = c, "key out of coordinate range");
            Err(CodecError::KeyOutOfRange(c))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_known_values() {
        assert_eq!(map_to_non_negative(0), 0);
        assert_eq!(map_to_non_negative(-1), 1);
        assert_eq!(map_to_non_negative(1), 2);
        assert_eq!(map_to_non_negative(-2), 3);
        assert_eq!(map_to_non_negative(2), 4);
        assert_eq!(map_to_non_negative(i32::MAX), u32::MAX - 1);
        assert_eq!(map_to_non_negative(i32::MIN), u32::MAX);
    }

    #[test]
    fn test_zigzag_formula() {
        for x in -1000..1000i32 {
            let expected = if x >= 0 { 2 * i64::from(x) } else { -2 * i64::from(x) - 1 };
            assert_eq!(i64::from(map_to_non_negative(x)), expected, "x={x}");
        }
    }

    #[test]
    fn test_zigzag_inverse() {
        for x in [i32::MIN, i32::MIN + 1, -65_536, -1, 0, 1, 65_536, i32::MAX - 1, i32::MAX] {
            assert_eq!(unmap_from_non_negative(map_to_non_negative(x)), x);
        }
        for y in [0u32, 1, 2, 3, u32::MAX - 1, u32::MAX] {
            assert_eq!(map_to_non_negative(unmap_from_non_negative(y)), y);
        }
    }

    #[test]
    fn test_pair_known_values() {
        assert_eq!(pair(0, 0), 0);
        assert_eq!(pair(1, 0), 1);
        assert_eq!(pair(0, 1), 2);
        assert_eq!(pair(2, 0), 3);
        assert_eq!(pair(3, 4), 32);
        assert_eq!(unpair_first(32), 3);
        assert_eq!(unpair_second(32), 4);
    }

    #[test]
    fn test_pair_is_bijective_on_prefix() {
        // Every key in the prefix is hit exactly once by unpair -> pair.
        for c in 0..50_000u64 {
            let (k1, k2) = unpair(c);
            assert_eq!(pair(k1, k2), c);
        }
    }

    #[test]
    fn test_unpair_top_of_range() {
        let (k1, k2) = unpair(u64::MAX);
        assert_eq!(checked_pair(k1, k2), Some(u64::MAX));
        let (k1, k2) = unpair(u64::MAX - 1);
        assert_eq!(checked_pair(k1, k2), Some(u64::MAX - 1));
    }

    #[test]
    fn test_checked_pair_overflow() {
        assert_eq!(checked_pair(u64::MAX, 0), None);
        assert_eq!(checked_pair(1 << 33, 1 << 33), None);
        assert_eq!(
            try_pair(u64::MAX, 1),
            Err(CodecError::PairOverflow { k1: u64::MAX, k2: 1 })
        );
        assert_eq!(try_pair(3, 4), Ok(32));
    }

    #[test]
    fn test_encode_small() {
        assert_eq!(encode(0, 0), 0);
        assert_eq!(encode(-1, 0), 1);
        assert_eq!(encode(0, -1), 2);
        assert_eq!(decode(encode(-12, 7)), (-12, 7));
    }

    #[test]
    fn test_encode_safe_corners() {
        let m = SAFE_COMPONENT_MAGNITUDE;
        for &(x, y) in &[(m, m), (-m, -m), (m, -m), (-m, m), (0, m), (-m, 0)] {
            let key = checked_encode(x, y).expect("safe magnitude must encode");
            assert_eq!(encode(x, y), key);
            assert_eq!(decode(key), (x, y));
        }
    }

    #[test]
    fn test_encode_overflow() {
        assert_eq!(checked_encode(i32::MIN, i32::MIN), None);
        assert_eq!(
            try_encode(i32::MAX, i32::MIN),
            Err(CodecError::EncodeOverflow { x: i32::MAX, y: i32::MIN })
        );
    }

    #[test]
    fn test_try_decode_rejects_wide_components() {
        let key = checked_pair(u64::from(u32::MAX) + 1, 0).unwrap();
        assert_eq!(try_decode(key), Err(CodecError::KeyOutOfRange(key)));
        assert_eq!(try_decode(encode(5, -6)), Ok((5, -6)));
    }

    #[test]
    fn test_isqrt_exact_around_squares() {
        for r in [0u128, 1, 2, 3, 1 << 20, (1 << 32) - 1, 1 << 32, (1 << 34) + 7] {
            assert_eq!(isqrt(r * r), r);
            if r > 0 {
                assert_eq!(isqrt(r * r - 1), r - 1);
            }
            assert_eq!(isqrt(r * r + 1), r.max(1));
        }
    }
}
