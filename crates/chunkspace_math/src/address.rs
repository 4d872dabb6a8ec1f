//! # Chunk Address Splitting
//!
//! A world coordinate splits into a chunk index and a local offset:
//!
//! - chunk index = arithmetic right shift by the chunk exponent
//! - local offset = bitwise AND with `2^exponent - 1`
//!
//! Shift and mask give floor division and floor modulo for power-of-two
//! chunk sizes, so negative coordinates land in the right chunk. Plain `/`
//! and `%` truncate toward zero and would put `-1` in chunk 0.
//!
//! ## Vertical Axis
//!
//! The height axis is never masked: its local offset is the coordinate
//! itself (see [`vertical_offset`]). The chunk address still records which
//! row of chunks the height falls into.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::power_of_two::exponent_of;

/// Largest chunk exponent a [`ChunkLayout`] accepts (2^30 blocks per axis).
pub const MAX_CHUNK_EXPONENT: u32 = 30;

/// Returns the chunk index containing `world`.
///
/// Arithmetic right shift, i.e. `floor(world / 2^exponent)`.
///
/// # Example
///
/// ```
/// use chunkspace_math::address::chunk_index;
///
/// assert_eq!(chunk_index(-1, 4), -1);
/// assert_eq!(chunk_index(-33, 5), -2);
/// ```
///
/// # Panics
///
/// Debug builds panic if `exponent >= 32`.
#[inline]
#[must_use]
pub const fn chunk_index(world: i32, exponent: u32) -> i32 {
    debug_assert!(exponent < i32::BITS, "chunk exponent must be below 32");
    world >> exponent
}

/// Returns the mask selecting the low `exponent` bits.
///
/// # Panics
///
/// Debug builds panic if `exponent >= 32`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn chunk_mask(exponent: u32) -> i32 {
    debug_assert!(exponent < i32::BITS, "chunk exponent must be below 32");
    ((1u32 << exponent) - 1) as i32
}

/// Returns the offset of `world` inside its chunk.
///
/// With `mask = 2^e - 1` the result is always in `[0, 2^e)`, including for
/// negative coordinates.
#[inline]
#[must_use]
pub const fn local_offset(world: i32, mask: i32) -> i32 {
    world & mask
}

/// Local offset on the vertical axis: the coordinate itself.
#[inline]
#[must_use]
pub const fn vertical_offset(y: i32) -> i32 {
    y
}

/// Absolute block position in the world.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct WorldPos {
    /// X coordinate (blocks).
    pub x: i32,
    /// Y coordinate (blocks, height).
    pub y: i32,
    /// Z coordinate (blocks).
    pub z: i32,
}

/// Position of a chunk in the chunk grid.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct ChunkPos {
    /// X coordinate (chunks).
    pub x: i32,
    /// Y coordinate (chunks).
    pub y: i32,
    /// Z coordinate (chunks).
    pub z: i32,
}

/// Position of a block inside its chunk.
///
/// `x` and `z` are masked offsets; `y` is the unmasked height.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct LocalPos {
    /// X offset inside the chunk.
    pub x: i32,
    /// Height (not masked).
    pub y: i32,
    /// Z offset inside the chunk.
    pub z: i32,
}

macro_rules! impl_triple {
    ($ty:ident) => {
        impl $ty {
            /// Creates a new position.
            #[inline]
            #[must_use]
            pub const fn new(x: i32, y: i32, z: i32) -> Self {
                Self { x, y, z }
            }

            /// Converts to array.
            #[inline]
            #[must_use]
            pub const fn to_array(self) -> [i32; 3] {
                [self.x, self.y, self.z]
            }
        }

        impl From<[i32; 3]> for $ty {
            #[inline]
            fn from(arr: [i32; 3]) -> Self {
                Self::new(arr[0], arr[1], arr[2])
            }
        }
    };
}

impl_triple!(WorldPos);
impl_triple!(ChunkPos);
impl_triple!(LocalPos);

/// Chunk address of `world`, shifting each axis by its exponent.
#[inline]
#[must_use]
pub const fn chunk_address(world: WorldPos, exponents: [u32; 3]) -> ChunkPos {
    ChunkPos::new(
        chunk_index(world.x, exponents[0]),
        chunk_index(world.y, exponents[1]),
        chunk_index(world.z, exponents[2]),
    )
}

/// Block address of `world` inside its chunk.
///
/// X and Z are masked with `2^e - 1`; Y passes through unchanged, so
/// `exponents[1]` is not consulted.
#[inline]
#[must_use]
pub const fn block_address(world: WorldPos, exponents: [u32; 3]) -> LocalPos {
    LocalPos::new(
        local_offset(world.x, chunk_mask(exponents[0])),
        vertical_offset(world.y),
        local_offset(world.z, chunk_mask(exponents[2])),
    )
}

/// Chunk dimensions, stored as per-axis exponents and masks.
///
/// Pick one once, then split coordinates with it as often as needed.
///
/// # Example
///
/// ```
/// use chunkspace_math::{ChunkLayout, WorldPos};
///
/// let layout = ChunkLayout::from_sizes(32, 64, 32)?;
/// let (chunk, local) = layout.split(WorldPos::new(-33, 70, 5));
/// assert_eq!((chunk.x, local.x), (-2, 31));
/// # Ok::<(), chunkspace_math::CodecError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkLayout {
    exponents: [u32; 3],
    masks: [i32; 3],
}

impl ChunkLayout {
    /// 32 x 64 x 32 blocks.
    pub const DEFAULT: Self = Self::from_exponents_unchecked([5, 6, 5]);

    const fn from_exponents_unchecked(exponents: [u32; 3]) -> Self {
        Self {
            exponents,
            masks: [
                chunk_mask(exponents[0]),
                chunk_mask(exponents[1]),
                chunk_mask(exponents[2]),
            ],
        }
    }

    /// Creates a layout from per-axis exponents.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::ExponentOutOfRange` if any exponent exceeds
    /// [`MAX_CHUNK_EXPONENT`].
    pub fn from_exponents(x: u32, y: u32, z: u32) -> CodecResult<Self> {
        let exponents = [x, y, z];
        if let Some(&exponent) = exponents.iter().find(|&&e| e > MAX_CHUNK_EXPONENT) {
            tracing::warn!(exponent, "rejected chunk exponent");
            return Err(CodecError::ExponentOutOfRange {
                exponent,
                max: MAX_CHUNK_EXPONENT,
            });
        }

        let layout = Self::from_exponents_unchecked(exponents);
        tracing::debug!(?exponents, "chunk layout created");
        Ok(layout)
    }

    /// Creates a layout from per-axis chunk sizes in blocks.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::NotPowerOfTwo` if any size is not a positive
    /// power of two.
    pub fn from_sizes(x: i32, y: i32, z: i32) -> CodecResult<Self> {
        let exponents = [exponent_of(x), exponent_of(y), exponent_of(z)];
        match exponents {
            [Ok(ex), Ok(ey), Ok(ez)] => Self::from_exponents(ex, ey, ez),
            [Err(e), _, _] | [_, Err(e), _] | [_, _, Err(e)] => {
                tracing::warn!(error = %e, "rejected chunk size");
                Err(e)
            }
        }
    }

    /// Per-axis exponents (log2 of the chunk size).
    #[inline]
    #[must_use]
    pub const fn exponents(&self) -> [u32; 3] {
        self.exponents
    }

    /// Per-axis masks (`size - 1`).
    #[inline]
    #[must_use]
    pub const fn masks(&self) -> [i32; 3] {
        self.masks
    }

    /// Per-axis chunk size in blocks.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> [i32; 3] {
        [self.masks[0] + 1, self.masks[1] + 1, self.masks[2] + 1]
    }

    /// Chunk containing `world`.
    #[inline]
    #[must_use]
    pub const fn chunk_pos(&self, world: WorldPos) -> ChunkPos {
        chunk_address(world, self.exponents)
    }

    /// Position of `world` inside its chunk.
    #[inline]
    #[must_use]
    pub const fn local_pos(&self, world: WorldPos) -> LocalPos {
        LocalPos::new(
            local_offset(world.x, self.masks[0]),
            vertical_offset(world.y),
            local_offset(world.z, self.masks[2]),
        )
    }

    /// Splits `world` into its chunk and in-chunk position.
    #[inline]
    #[must_use]
    pub const fn split(&self, world: WorldPos) -> (ChunkPos, LocalPos) {
        (self.chunk_pos(world), self.local_pos(world))
    }

    /// World position of the chunk's minimum corner.
    #[inline]
    #[must_use]
    pub const fn chunk_origin(&self, chunk: ChunkPos) -> WorldPos {
        WorldPos::new(
            chunk.x.wrapping_shl(self.exponents[0]),
            chunk.y.wrapping_shl(self.exponents[1]),
            chunk.z.wrapping_shl(self.exponents[2]),
        )
    }

    /// Reassembles a world position from the output of [`Self::split`].
    #[inline]
    #[must_use]
    pub const fn world_pos(&self, chunk: ChunkPos, local: LocalPos) -> WorldPos {
        let origin = self.chunk_origin(chunk);
        WorldPos::new(
            origin.x.wrapping_add(local.x),
            local.y,
            origin.z.wrapping_add(local.z),
        )
    }
}

impl Default for ChunkLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
