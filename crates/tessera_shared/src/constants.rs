//! # Reference Constants
//!
//! Default terrain and world dimensions.
//!
//! **NOTE:** These are only defaults. Every value here can be overridden
//! through the `[world]` section of the game configuration.

// =============================================================================
// GRID
// =============================================================================

/// Edge length of one block in world units.
pub const BLOCK_SIZE: f32 = 8.0;

/// Edge length of one chunk in blocks.
pub const CHUNK_SIZE: i32 = 30;

// =============================================================================
// WORLD EXTENT
// =============================================================================

/// World width in chunks.
pub const WORLD_WIDTH_CHUNKS: i32 = 10;

/// World height in chunks.
pub const WORLD_HEIGHT_CHUNKS: i32 = 2;

/// Ground offset added to every heightfield sample (in blocks).
pub const WORLD_BASE_HEIGHT: i32 = 10;
