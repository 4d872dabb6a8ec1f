//! # CHUNKSPACE Math
//!
//! Spatial addressing for an unbounded voxel world.
//!
//! ## Design Principles
//!
//! 1. **Pure** - Every function maps integers to integers, no shared state
//! 2. **Floor semantics** - Negative coordinates land in the chunk below,
//!    never in chunk 0
//! 3. **Fixed widths** - `i32` coordinates, `u64` keys, documented per module
//! 4. **Checked entry points** - `checked_*` / `try_*` variants for input
//!    that may be out of range
//!
//! ## Core Components
//!
//! - `power_of_two`: ceil / predicate / exponent helpers
//! - `address`: chunk index and local offset, `ChunkLayout`
//! - `pairing`: zig-zag + Cantor pairing of signed pairs
//! - `key`: `ChunkKey` for chunk columns
//! - `config`: TOML layout configuration
//!
//! ## Example
//!
//! ```
//! use chunkspace_math::{ChunkKey, ChunkLayout, WorldPos};
//!
//! let layout = ChunkLayout::DEFAULT; // 32 x 64 x 32
//! let (chunk, local) = layout.split(WorldPos::new(-1, 10, 40));
//! assert_eq!((chunk.x, chunk.z), (-1, 1));
//! assert_eq!((local.x, local.z), (31, 8));
//!
//! let key = ChunkKey::from_chunk_pos(chunk)?;
//! assert_eq!(key.coords()?, (-1, 1));
//! # Ok::<(), chunkspace_math::CodecError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod address;
pub mod config;
pub mod error;
pub mod key;
pub mod pairing;
pub mod power_of_two;

pub use address::{
    block_address, chunk_address, chunk_index, chunk_mask, local_offset, vertical_offset,
    ChunkLayout, ChunkPos, LocalPos, WorldPos, MAX_CHUNK_EXPONENT,
};
pub use config::{ChunkSizes, LayoutConfig};
pub use error::{CodecError, CodecResult};
pub use key::ChunkKey;
pub use pairing::{
    checked_encode, checked_pair, decode, encode, map_to_non_negative, pair, try_decode,
    try_encode, try_pair, unmap_from_non_negative, unpair, unpair_first, unpair_second,
    SAFE_COMPONENT_MAGNITUDE,
};
pub use power_of_two::{
    ceil_power_of_two, checked_ceil_power_of_two, exponent_of, is_power_of_two, size_of_power,
};
