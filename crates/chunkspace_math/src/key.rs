//! # Chunk Column Keys
//!
//! A single `u64` naming a chunk column (its X and Z chunk indices), for use
//! as a hash-map key or a file-name stem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::ChunkPos;
use crate::error::{CodecError, CodecResult};
use crate::pairing::{try_decode, try_encode};

/// Number of hex digits in a key stem.
const STEM_LEN: usize = 16;

/// Pairing key of a chunk column's `(x, z)` index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ChunkKey(u64);

impl ChunkKey {
    /// Origin column.
    pub const ORIGIN: Self = Self(0);

    /// Creates the key for column `(x, z)`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::EncodeOverflow` if the pair does not fit a key.
    #[inline]
    pub fn new(x: i32, z: i32) -> CodecResult<Self> {
        try_encode(x, z).map(Self)
    }

    /// Key of the column containing `pos`. The Y index is dropped.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::EncodeOverflow` if the pair does not fit a key.
    #[inline]
    pub fn from_chunk_pos(pos: ChunkPos) -> CodecResult<Self> {
        Self::new(pos.x, pos.z)
    }

    /// Wraps a raw key value (no validation).
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw key value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the column's `(x, z)` chunk indices.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::KeyOutOfRange` for raw values no column maps to.
    #[inline]
    pub fn coords(self) -> CodecResult<(i32, i32)> {
        try_decode(self.0)
    }

    /// Fixed-width lower-case hex form, e.g. `00000000000001a4`.
    #[must_use]
    pub fn file_stem(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for ChunkKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == STEM_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !valid {
            return Err(CodecError::InvalidKeyStem(s.to_owned()));
        }
        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| CodecError::InvalidKeyStem(s.to_owned()))
    }
}

impl From<ChunkKey> for u64 {
    #[inline]
    fn from(key: ChunkKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_origin() {
        assert_eq!(ChunkKey::new(0, 0).unwrap(), ChunkKey::ORIGIN);
        assert_eq!(ChunkKey::ORIGIN.file_stem(), "0000000000000000");
    }

    #[test]
    fn test_coords_roundtrip() {
        let key = ChunkKey::new(-7, 12).unwrap();
        assert_eq!(key.coords(), Ok((-7, 12)));
    }

    #[test]
    fn test_from_chunk_pos_drops_y() {
        let a = ChunkKey::from_chunk_pos(ChunkPos::new(3, 0, -4)).unwrap();
        let b = ChunkKey::from_chunk_pos(ChunkPos::new(3, 9, -4)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.coords(), Ok((3, -4)));
    }

    #[test]
    fn test_keys_unique_in_neighbourhood() {
        let mut seen = HashSet::new();
        for z in -32..32 {
            for x in -32..32 {
                assert!(seen.insert(ChunkKey::new(x, z).unwrap()), "duplicate at ({x}, {z})");
            }
        }
        assert_eq!(seen.len(), 64 * 64);
    }

    #[test]
    fn test_file_stem_roundtrip() {
        let key = ChunkKey::new(3, 4).unwrap();
        let stem = key.file_stem();
        assert_eq!(stem.len(), 16);
        assert_eq!(stem.parse::<ChunkKey>(), Ok(key));
        assert_eq!(format!("{key}"), stem);
    }

    #[test]
    fn test_file_stem_rejects_garbage() {
        for bad in ["", "123", "+000000000000001", "000000000000000G", "00000000000000AB", "00000000000000001"] {
            assert_eq!(
                bad.parse::<ChunkKey>(),
                Err(CodecError::InvalidKeyStem(bad.to_owned())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_raw() {
        let key = ChunkKey::from_raw(32);
        assert_eq!(key.raw(), 32);
        assert_eq!(u64::from(key), 32);
        assert_eq!(key.coords(), Ok((-2, 2)));
    }
}
