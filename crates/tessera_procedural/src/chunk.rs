//! # Chunk System
//!
//! World data is organized into fixed-size square chunks for:
//! - Memory efficiency (only chunks near the view are loaded)
//! - Fast streaming (generate/discard on demand)
//!
//! ## Chunk Format
//!
//! A chunk is `size x size` blocks, stored column-major: local `(x, y)` lives
//! at index `x * size + y`. Local `(x, y)` is absolute
//! `(chunk.x * size + x, chunk.y * size + y)`.

use crate::block::{Block, BlockType};
use crate::config::WorldConfig;
use crate::heightfield::HeightField;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Y coordinate (in chunks, not blocks).
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts absolute block coordinates to the containing chunk.
    ///
    /// Floors toward negative infinity, so block `-1` is in chunk `-1`.
    #[inline]
    #[must_use]
    pub const fn from_block_pos(block_x: i32, block_y: i32, chunk_size: i32) -> Self {
        Self {
            x: block_x.div_euclid(chunk_size),
            y: block_y.div_euclid(chunk_size),
        }
    }

    /// Absolute block coordinates of the chunk's top-left cell.
    #[inline]
    #[must_use]
    pub const fn origin(self, chunk_size: i32) -> (i32, i32) {
        (self.x * chunk_size, self.y * chunk_size)
    }

    /// Chessboard distance in chunks.
    #[inline]
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// A chunk of world data. Every cell is populated.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    size: i32,
    /// Block data (indexed as `[x][y]`, flattened).
    blocks: Vec<Block>,
    /// Whether a block changed since generation.
    pub modified: bool,
}

impl Chunk {
    /// Chunk position in the world.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Edge length in blocks.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    fn index(&self, local_x: i32, local_y: i32) -> Option<usize> {
        if (0..self.size).contains(&local_x) && (0..self.size).contains(&local_y) {
            Some((local_x * self.size + local_y) as usize)
        } else {
            None
        }
    }

    /// Gets a block at local coordinates, `None` outside `0..size`.
    #[inline]
    #[must_use]
    pub fn get_block(&self, local_x: i32, local_y: i32) -> Option<&Block> {
        self.index(local_x, local_y).map(|i| &self.blocks[i])
    }

    /// Sets the type of the block at local coordinates.
    ///
    /// Returns the previous type, or `None` outside the chunk.
    pub fn set_block_type(&mut self, local_x: i32, local_y: i32, kind: BlockType) -> Option<BlockType> {
        let index = self.index(local_x, local_y)?;
        let block = &mut self.blocks[index];
        let previous = block.kind();
        block.set_kind(kind);
        self.modified = true;
        Some(previous)
    }

    /// All blocks, column by column.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Number of non-empty blocks.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chunk {}: {}x{}", self.coord, self.size, self.size)
    }
}

/// Chunk generator driven by the heightfield.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    height_field: HeightField,
    chunk_size: i32,
    block_size: f32,
}

impl ChunkGenerator {
    /// Creates a generator for the given world.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            height_field: HeightField::from_config(config),
            chunk_size: config.chunk_size,
            block_size: config.block_size,
        }
    }

    /// The heightfield this generator samples.
    #[must_use]
    pub const fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    /// Generates a chunk at the given coordinates.
    ///
    /// Per column: rows above the surface are empty, the surface row is
    /// grass, rows below are dirt.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let size = self.chunk_size;
        let (origin_x, origin_y) = coord.origin(size);
        let mut blocks = Vec::with_capacity((size * size) as usize);

        for local_x in 0..size {
            let x = origin_x + local_x;
            let surface = self.height_field.height(x);

            for local_y in 0..size {
                let y = origin_y + local_y;
                let kind = match y.cmp(&surface) {
                    std::cmp::Ordering::Less => BlockType::Empty,
                    std::cmp::Ordering::Equal => BlockType::Grass,
                    std::cmp::Ordering::Greater => BlockType::Dirt,
                };
                blocks.push(Block::new(kind, x, y, self.block_size));
            }
        }

        Chunk {
            coord,
            size,
            blocks,
            modified: false,
        }
    }
}
