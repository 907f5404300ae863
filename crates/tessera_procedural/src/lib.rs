//! # TESSERA Procedural Generation
//!
//! Deterministic terrain for a 2D block world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the heightfield has no seed; column `x` always has
//!    the same height
//! 2. **Chunked**: the world is generated in fixed-size square chunks
//! 3. **Streamable**: chunks are generated on miss and evicted by distance,
//!    with block edits replayed on reload
//! 4. **Absence is not an error**: every query outside loaded chunks
//!    returns `None`
//!
//! ## Core Components
//!
//! - `HeightField`: column → surface row
//! - `ChunkGenerator`: produces chunks from the heightfield
//! - `WorldManager`: the chunk cache every other system queries
//! - `AutotileTable`: picks an atlas cell from four neighbor flags
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_procedural::{WorldConfig, WorldManager, BlockType};
//!
//! let mut world = WorldManager::new(WorldConfig::default())?;
//! world.materialize_all();
//!
//! assert_eq!(world.get_block(0, 10).map(|b| b.kind()), Some(BlockType::Grass));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod autotile;
pub mod block;
pub mod chunk;
pub mod config;
pub mod error;
pub mod heightfield;
pub mod world_manager;

pub use autotile::{
    neighbor_mask, AtlasCell, AutotileTable, NeighborMask, ATLAS_CELL_SIZE, ATLAS_CELL_STRIDE,
    REFERENCE_PATTERNS,
};
pub use block::{Block, BlockType};
pub use chunk::{Chunk, ChunkCoord, ChunkGenerator};
pub use config::{HeightParams, StreamingConfig, WorldConfig};
pub use error::{WorldError, WorldResult};
pub use heightfield::HeightField;
pub use world_manager::{ChunkModification, ChunkState, StreamingReport, WorldManager, WorldStats};
