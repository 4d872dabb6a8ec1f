//! # Layout Configuration
//!
//! Chunk dimensions live in a TOML file, loaded once at startup:
//!
//! ```toml
//! [chunk]
//! size_x = 32
//! size_y = 64
//! size_z = 32
//! ```
//!
//! Missing fields fall back to [`ChunkLayout::DEFAULT`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::address::ChunkLayout;
use crate::error::{CodecError, CodecResult};

/// Chunk size section of the layout file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkSizes {
    /// Chunk width in blocks (power of two).
    pub size_x: i32,
    /// Chunk height in blocks (power of two).
    pub size_y: i32,
    /// Chunk depth in blocks (power of two).
    pub size_z: i32,
}

impl Default for ChunkSizes {
    fn default() -> Self {
        let [size_x, size_y, size_z] = ChunkLayout::DEFAULT.size();
        Self { size_x, size_y, size_z }
    }
}

/// Layout configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Chunk dimensions.
    pub chunk: ChunkSizes,
}

impl LayoutConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Config` if the text is not valid layout TOML.
    pub fn from_toml_str(raw: &str) -> CodecResult<Self> {
        toml::from_str(raw).map_err(|e| {
            tracing::warn!(error = %e, "failed to parse layout config");
            CodecError::Config(e.to_string())
        })
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Io` if the file cannot be read, or
    /// `CodecError::Config` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to read layout config");
            CodecError::Io(e.to_string())
        })?;

        let config = Self::from_toml_str(&raw)?;
        tracing::info!(path = %path.display(), chunk = ?config.chunk, "loaded layout config");
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Config` if serialization fails.
    pub fn to_toml_string(&self) -> CodecResult<String> {
        toml::to_string(self).map_err(|e| CodecError::Config(e.to_string()))
    }

    /// Validates the sizes into a [`ChunkLayout`].
    ///
    /// # Errors
    ///
    /// Returns `CodecError::NotPowerOfTwo` if any size is not a positive
    /// power of two.
    pub fn layout(&self) -> CodecResult<ChunkLayout> {
        ChunkLayout::from_sizes(self.chunk.size_x, self.chunk.size_y, self.chunk.size_z)
    }
}

impl From<ChunkLayout> for LayoutConfig {
    fn from(layout: ChunkLayout) -> Self {
        let [size_x, size_y, size_z] = layout.size();
        Self {
            chunk: ChunkSizes { size_x, size_y, size_z },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = LayoutConfig::from_toml_str(
            "[chunk]\nsize_x = 16\nsize_y = 256\nsize_z = 16\n",
        )
        .unwrap();
        let layout = config.layout().unwrap();
        assert_eq!(layout.exponents(), [4, 8, 4]);
    }

    #[test]
    fn test_missing_fields_use_default() {
        let config = LayoutConfig::from_toml_str("[chunk]\nsize_y = 128\n").unwrap();
        assert_eq!(config.chunk.size_x, 32);
        assert_eq!(config.chunk.size_y, 128);
        assert_eq!(config.chunk.size_z, 32);

        let empty = LayoutConfig::from_toml_str("").unwrap();
        assert_eq!(empty, LayoutConfig::default());
        assert_eq!(empty.layout().unwrap(), ChunkLayout::DEFAULT);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = LayoutConfig::from_toml_str("[chunk]\nsize_w = 8\n").unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn test_non_power_of_two_rejected_at_layout() {
        let config = LayoutConfig::from_toml_str("[chunk]\nsize_x = 24\n").unwrap();
        assert_eq!(config.layout(), Err(CodecError::NotPowerOfTwo(24)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LayoutConfig::from(ChunkLayout::from_exponents(3, 7, 4).unwrap());
        let text = config.to_toml_string().unwrap();
        assert_eq!(LayoutConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("chunkspace_missing_layout.toml");
        std::fs::remove_file(&path).ok();
        assert!(matches!(LayoutConfig::load(&path), Err(CodecError::Io(_))));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("chunkspace_layout_test.toml");
        std::fs::write(&path, "[chunk]\nsize_x = 8\nsize_y = 8\nsize_z = 8\n").unwrap();
        let config = LayoutConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.layout().unwrap().size(), [8, 8, 8]);
    }
}
