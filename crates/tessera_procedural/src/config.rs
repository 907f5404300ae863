//! # World Configuration
//!
//! The `[world]` section of the game configuration. Every field defaults to
//! the reference value, so an empty section reproduces the reference world.

use serde::{Deserialize, Serialize};
use tessera_shared::constants::{
    BLOCK_SIZE, CHUNK_SIZE, WORLD_BASE_HEIGHT, WORLD_HEIGHT_CHUNKS, WORLD_WIDTH_CHUNKS,
};

use crate::error::{WorldError, WorldResult};

/// Constants of the three-sine heightfield.
///
/// `h(x) = floor(total * (f1*sin(s1*x) + fe*sin(se*e*x) + fpi*sin(spi*pi*x))) + base`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightParams {
    /// Amplitude of the plain sine.
    pub factor_1: f64,
    /// Amplitude of the `e`-scaled sine.
    pub factor_e: f64,
    /// Amplitude of the `pi`-scaled sine.
    pub factor_pi: f64,
    /// Overall amplitude multiplier.
    pub factor_total: f64,
    /// Frequency of the plain sine.
    pub scale_1: f64,
    /// Frequency multiplier of the `e`-scaled sine.
    pub scale_e: f64,
    /// Frequency multiplier of the `pi`-scaled sine.
    pub scale_pi: f64,
}

impl HeightParams {
    /// The reference terrain profile.
    pub const REFERENCE: Self = Self {
        factor_1: -3.2,
        factor_e: -1.2,
        factor_pi: 1.9,
        factor_total: 0.3,
        scale_1: 0.1,
        scale_e: -1.1,
        scale_pi: 0.4,
    };
}

impl Default for HeightParams {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Chunk streaming around the camera view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// When false, the world is materialized once and never evicted.
    pub enabled: bool,
    /// Extra ring of chunks loaded around the view.
    pub load_margin_chunks: i32,
    /// Chunks farther than this from the loaded region are evicted.
    pub unload_distance_chunks: i32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            load_margin_chunks: 1,
            unload_distance_chunks: 2,
        }
    }
}

/// World dimensions and terrain constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Block edge in world units.
    pub block_size: f32,
    /// Chunk edge in blocks.
    pub chunk_size: i32,
    /// World width in chunks (chunk columns `0..width_chunks`).
    pub width_chunks: i32,
    /// World height in chunks (chunk rows `0..height_chunks`).
    pub height_chunks: i32,
    /// Row offset added to every heightfield sample.
    pub base_height: i32,
    /// Heightfield constants.
    pub height: HeightParams,
    /// Chunk streaming.
    pub streaming: StreamingConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            chunk_size: CHUNK_SIZE,
            width_chunks: WORLD_WIDTH_CHUNKS,
            height_chunks: WORLD_HEIGHT_CHUNKS,
            base_height: WORLD_BASE_HEIGHT,
            height: HeightParams::REFERENCE,
            streaming: StreamingConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Chunk edge in world units.
    #[inline]
    #[must_use]
    pub fn chunk_world_size(&self) -> f32 {
        self.block_size * self.chunk_size as f32
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> WorldResult<()> {
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(WorldError::InvalidConfig(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        if self.chunk_size <= 0 {
            return Err(WorldError::InvalidConfig(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        if self.width_chunks <= 0 || self.height_chunks <= 0 {
            return Err(WorldError::InvalidConfig(format!(
                "world extent must be positive, got {}x{} chunks",
                self.width_chunks, self.height_chunks
            )));
        }
        if self.streaming.load_margin_chunks < 0 || self.streaming.unload_distance_chunks < 0 {
            return Err(WorldError::InvalidConfig(
                "streaming distances must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_world() {
        let config = WorldConfig::default();
        assert_eq!(config.block_size, 8.0);
        assert_eq!(config.chunk_size, 30);
        assert_eq!(config.width_chunks, 10);
        assert_eq!(config.height_chunks, 2);
        assert_eq!(config.base_height, 10);
        assert_eq!(config.height, HeightParams::REFERENCE);
        assert_eq!(config.chunk_world_size(), 240.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let config = WorldConfig {
            chunk_size: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(config.validate(), Err(WorldError::InvalidConfig(_))));

        let config = WorldConfig {
            block_size: 0.0,
            ..WorldConfig::default()
        };
        assert!(matches!(config.validate(), Err(WorldError::InvalidConfig(_))));

        let config = WorldConfig {
            width_chunks: 0,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
