//! # World Manager
//!
//! The chunk cache. Owns every loaded chunk and answers all block queries
//! in absolute grid coordinates.
//!
//! ## Streaming
//!
//! - `materialize_all` generates the whole configured extent up front
//! - `update(view)` loads chunks overlapping the view (plus a margin) and
//!   evicts chunks too far from that region
//! - Edits are logged per chunk and replayed when an evicted chunk is
//!   generated again, so mined and placed blocks survive the round trip
//!
//! Chunks exist only inside `0..width_chunks` x `0..height_chunks`.

use std::collections::HashMap;

use tessera_shared::Collider;
use tracing::{debug, info};

use crate::block::{Block, BlockType};
use crate::chunk::{Chunk, ChunkCoord, ChunkGenerator};
use crate::config::WorldConfig;
use crate::error::WorldResult;

/// One recorded block edit, in chunk-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkModification {
    /// Local column.
    pub local_x: i32,
    /// Local row.
    pub local_y: i32,
    /// Type after the edit.
    pub kind: BlockType,
}

/// Residency of a chunk coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// Generated and queryable.
    Loaded,
    /// Inside the world extent but not in memory.
    Unloaded,
    /// Outside the world extent; never generated.
    OutOfBounds,
}

/// Session counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks currently in memory.
    pub loaded_chunks: usize,
    /// Chunks generated since construction (reloads included).
    pub generated_this_session: u64,
    /// Chunks evicted since construction.
    pub evicted_this_session: u64,
    /// Chunks with at least one recorded edit.
    pub modified_chunks: usize,
}

/// What one `update` call changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Chunks generated by this call.
    pub loaded: Vec<ChunkCoord>,
    /// Chunks evicted by this call.
    pub evicted: Vec<ChunkCoord>,
}

impl StreamingReport {
    /// True if nothing was loaded or evicted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.evicted.is_empty()
    }
}

/// Inclusive chunk rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ChunkRegion {
    min: ChunkCoord,
    max: ChunkCoord,
}

impl ChunkRegion {
    fn grown(self, margin: i32) -> Self {
        Self {
            min: ChunkCoord::new(self.min.x - margin, self.min.y - margin),
            max: ChunkCoord::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Chebyshev distance from `coord` to the nearest chunk of the region.
    fn distance_to(self, coord: ChunkCoord) -> i32 {
        let nearest = ChunkCoord::new(
            coord.x.max(self.min.x).min(self.max.x),
            coord.y.max(self.min.y).min(self.max.y),
        );
        coord.chebyshev_distance(nearest)
    }

    fn coords(self) -> impl Iterator<Item = ChunkCoord> {
        (self.min.x..=self.max.x)
            .flat_map(move |x| (self.min.y..=self.max.y).map(move |y| ChunkCoord::new(x, y)))
    }
}

/// Chunk cache and block query surface.
#[derive(Debug)]
pub struct WorldManager {
    config: WorldConfig,
    generator: ChunkGenerator,
    chunks: HashMap<ChunkCoord, Chunk>,
    modifications: HashMap<ChunkCoord, Vec<ChunkModification>>,
    generated: u64,
    evicted: u64,
}

impl WorldManager {
    /// Creates an empty world. No chunk is generated yet.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidConfig` if the configuration is unusable.
    pub fn new(config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        info!(
            width_chunks = config.width_chunks,
            height_chunks = config.height_chunks,
            chunk_size = config.chunk_size,
            streaming = config.streaming.enabled,
            "World created"
        );
        Ok(Self {
            generator: ChunkGenerator::new(&config),
            config,
            chunks: HashMap::new(),
            modifications: HashMap::new(),
            generated: 0,
            evicted: 0,
        })
    }

    /// The configuration this world was built from.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Block edge in world units.
    #[inline]
    #[must_use]
    pub fn block_size(&self) -> f32 {
        self.config.block_size
    }

    /// Surface row of column `x`, loaded or not.
    #[inline]
    #[must_use]
    pub fn surface_row(&self, x: i32) -> i32 {
        self.generator.height_field().height(x)
    }

    // =========================================================================
    // RESIDENCY
    // =========================================================================

    /// True if the coordinate lies inside the configured extent.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, coord: ChunkCoord) -> bool {
        (0..self.config.width_chunks).contains(&coord.x)
            && (0..self.config.height_chunks).contains(&coord.y)
    }

    /// Residency of a chunk coordinate.
    #[must_use]
    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        if !self.in_bounds(coord) {
            ChunkState::OutOfBounds
        } else if self.chunks.contains_key(&coord) {
            ChunkState::Loaded
        } else {
            ChunkState::Unloaded
        }
    }

    /// Generates a chunk and replays its recorded edits.
    ///
    /// Returns `false` if the chunk is already loaded or out of bounds.
    pub fn load_chunk(&mut self, coord: ChunkCoord) -> bool {
        if self.chunk_state(coord) != ChunkState::Unloaded {
            return false;
        }

        let mut chunk = self.generator.generate(coord);
        if let Some(edits) = self.modifications.get(&coord) {
            for edit in edits {
                chunk.set_block_type(edit.local_x, edit.local_y, edit.kind);
            }
            debug!(chunk = %coord, edits = edits.len(), "Replayed chunk edits");
        }

        self.chunks.insert(coord, chunk);
        self.generated += 1;
        debug!(chunk = %coord, "Chunk loaded");
        true
    }

    /// Drops a chunk from memory. Its edit log is kept.
    ///
    /// Returns `false` if the chunk was not loaded.
    pub fn unload_chunk(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.remove(&coord).is_some() {
            self.evicted += 1;
            debug!(chunk = %coord, "Chunk evicted");
            true
        } else {
            false
        }
    }

    /// Generates every chunk of the configured extent.
    ///
    /// Returns the number of chunks generated by this call.
    pub fn materialize_all(&mut self) -> usize {
        let region = ChunkRegion {
            min: ChunkCoord::new(0, 0),
            max: ChunkCoord::new(self.config.width_chunks - 1, self.config.height_chunks - 1),
        };
        let loaded = region.coords().filter(|&c| self.load_chunk(c)).count();
        info!(loaded, total = self.chunks.len(), "World materialized");
        loaded
    }

    /// Loads every chunk within `radius` chunks of the chunk containing the
    /// world point, clipped to the world extent.
    ///
    /// Returns the number of chunks generated by this call.
    pub fn ensure_loaded_around(&mut self, world_x: f32, world_y: f32, radius: i32) -> usize {
        let center = self.chunk_at_world_point(world_x, world_y);
        let region = ChunkRegion {
            min: center,
            max: center,
        }
        .grown(radius.max(0));
        region.coords().filter(|&c| self.load_chunk(c)).count()
    }

    /// Streams chunks around a view rectangle in world units.
    ///
    /// Does nothing when streaming is disabled.
    pub fn update(&mut self, view: &Collider) -> StreamingReport {
        let streaming = self.config.streaming;
        if !streaming.enabled {
            return StreamingReport::default();
        }

        let region = self.view_region(view).grown(streaming.load_margin_chunks);

        let loaded: Vec<ChunkCoord> = region.coords().filter(|&c| self.load_chunk(c)).collect();

        let mut evicted: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|&c| region.distance_to(c) > streaming.unload_distance_chunks)
            .collect();
        evicted.sort_unstable();
        for &coord in &evicted {
            self.unload_chunk(coord);
        }

        if !loaded.is_empty() || !evicted.is_empty() {
            debug!(
                loaded = loaded.len(),
                evicted = evicted.len(),
                resident = self.chunks.len(),
                "Streaming update"
            );
        }

        StreamingReport { loaded, evicted }
    }

    fn view_region(&self, view: &Collider) -> ChunkRegion {
        let size = self.config.chunk_world_size();
        let min = ChunkCoord::new(
            (view.x / size).floor() as i32,
            (view.y / size).floor() as i32,
        );
        let max = ChunkCoord::new(
            ((view.right() / size).ceil() as i32 - 1).max(min.x),
            ((view.bottom() / size).ceil() as i32 - 1).max(min.y),
        );
        ChunkRegion { min, max }
    }

    /// Number of chunks in memory.
    #[inline]
    #[must_use]
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// All chunks in memory, in no particular order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The chunk at a coordinate, if loaded.
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Session counters.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            loaded_chunks: self.chunks.len(),
            generated_this_session: self.generated,
            evicted_this_session: self.evicted,
            modified_chunks: self.modifications.len(),
        }
    }

    // =========================================================================
    // BLOCK QUERIES
    // =========================================================================

    /// Chunk containing a world-unit point.
    #[inline]
    #[must_use]
    pub fn chunk_at_world_point(&self, world_x: f32, world_y: f32) -> ChunkCoord {
        let (x, y) = self.grid_at_world_point(world_x, world_y);
        ChunkCoord::from_block_pos(x, y, self.config.chunk_size)
    }

    /// Grid cell containing a world-unit point.
    #[inline]
    #[must_use]
    pub fn grid_at_world_point(&self, world_x: f32, world_y: f32) -> (i32, i32) {
        let size = self.config.block_size;
        ((world_x / size).floor() as i32, (world_y / size).floor() as i32)
    }

    fn locate(&self, x: i32, y: i32) -> (ChunkCoord, i32, i32) {
        let size = self.config.chunk_size;
        let coord = ChunkCoord::from_block_pos(x, y, size);
        let (origin_x, origin_y) = coord.origin(size);
        (coord, x - origin_x, y - origin_y)
    }

    /// Block at absolute grid coordinates, `None` outside loaded chunks.
    #[must_use]
    pub fn get_block(&self, x: i32, y: i32) -> Option<&Block> {
        let (coord, local_x, local_y) = self.locate(x, y);
        self.chunks.get(&coord)?.get_block(local_x, local_y)
    }

    /// Block containing a world-unit point.
    #[must_use]
    pub fn block_at_world_point(&self, world_x: f32, world_y: f32) -> Option<&Block> {
        let (x, y) = self.grid_at_world_point(world_x, world_y);
        self.get_block(x, y)
    }

    /// True if the chunk containing a world-unit point is loaded.
    #[must_use]
    pub fn is_loaded_at_world_point(&self, world_x: f32, world_y: f32) -> bool {
        self.chunks
            .contains_key(&self.chunk_at_world_point(world_x, world_y))
    }

    /// True if a loaded, non-empty block occupies the cell.
    #[inline]
    #[must_use]
    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.get_block(x, y).is_some_and(Block::is_solid)
    }

    /// Every loaded block whose cell overlaps the half-open world rectangle
    /// `[x, x + width) x [y, y + height)`. Each block is yielded once.
    pub fn blocks_in_area(
        &self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> impl Iterator<Item = &Block> + '_ {
        let size = self.config.block_size;
        let x0 = (x / size).floor() as i32;
        let x1 = ((x + width) / size).ceil() as i32 - 1;
        let y0 = (y / size).floor() as i32;
        let y1 = ((y + height) / size).ceil() as i32 - 1;

        (x0..=x1).flat_map(move |gx| (y0..=y1).filter_map(move |gy| self.get_block(gx, gy)))
    }

    // =========================================================================
    // EDITS
    // =========================================================================

    /// Changes the type of a loaded block and records the edit.
    ///
    /// Returns the previous type, or `None` if the cell is not loaded.
    pub fn set_block_type(&mut self, x: i32, y: i32, kind: BlockType) -> Option<BlockType> {
        let (coord, local_x, local_y) = self.locate(x, y);
        let previous = self
            .chunks
            .get_mut(&coord)?
            .set_block_type(local_x, local_y, kind)?;

        let edits = self.modifications.entry(coord).or_default();
        edits.retain(|e| e.local_x != local_x || e.local_y != local_y);
        edits.push(ChunkModification {
            local_x,
            local_y,
            kind,
        });

        debug!(x, y, from = %previous, to = %kind, "Block changed");
        Some(previous)
    }

    /// Recorded edits of a chunk, oldest first.
    #[must_use]
    pub fn modifications(&self, coord: ChunkCoord) -> &[ChunkModification] {
        self.modifications.get(&coord).map_or(&[], Vec::as_slice)
    }
}
