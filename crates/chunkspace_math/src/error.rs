//! # Codec Error Types
//!
//! Errors returned by the validated entry points. The plain functions are
//! total and never produce these.

use thiserror::Error;

/// Errors that can occur in the addressing codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A chunk size was not a positive power of two.
    #[error("chunk size {0} is not a power of two")]
    NotPowerOfTwo(i32),

    /// A chunk exponent exceeds what an `i32` axis can hold.
    #[error("chunk exponent {exponent} out of range (max {max})")]
    ExponentOutOfRange {
        /// The rejected exponent.
        exponent: u32,
        /// The largest accepted exponent.
        max: u32,
    },

    /// Pairing two components would overflow the 64-bit key.
    #[error("pairing ({k1}, {k2}) overflows a 64-bit key")]
    PairOverflow {
        /// First component.
        k1: u64,
        /// Second component.
        k2: u64,
    },

    /// Encoding a signed pair would overflow the 64-bit key.
    #[error("encoding ({x}, {y}) overflows a 64-bit key")]
    EncodeOverflow {
        /// First coordinate.
        x: i32,
        /// Second coordinate.
        y: i32,
    },

    /// A key decodes to components that do not fit a signed 32-bit pair.
    #[error("key {0} does not decode to a 32-bit coordinate pair")]
    KeyOutOfRange(u64),

    /// A key stem was not 16 hexadecimal digits.
    #[error("invalid key stem: {0:?}")]
    InvalidKeyStem(String),

    /// Layout configuration could not be parsed.
    #[error("invalid layout configuration: {0}")]
    Config(String),

    /// Layout configuration file could not be read.
    #[error("failed to read layout configuration: {0}")]
    Io(String),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
