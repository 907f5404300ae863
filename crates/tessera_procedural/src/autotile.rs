//! # Autotiling
//!
//! Picks a texture atlas cell for a block from the occupancy of its four
//! orthogonal neighbors.
//!
//! ## Neighbor Mask
//!
//! ```text
//! bit 3: above   bit 2: right   bit 1: below   bit 0: left
//! ```
//!
//! A neighbor is occupied if it is loaded and not `Empty`. Unloaded
//! neighbors count as unoccupied, so chunk borders at the world edge look
//! like open air.
//!
//! The mask indexes a 16-entry table directly. Masks without an entry fall
//! back to [`AtlasCell::DEFAULT`].

use crate::block::Block;
use crate::error::{WorldError, WorldResult};
use crate::world_manager::WorldManager;

/// 4-bit neighbor occupancy (above, right, below, left).
pub type NeighborMask = u8;

/// Pixel edge of one atlas cell.
pub const ATLAS_CELL_SIZE: u32 = 8;

/// Pixel distance between neighboring atlas cells (cell plus 1 pixel gutter).
pub const ATLAS_CELL_STRIDE: u32 = 9;

const MASK_COUNT: usize = 16;

/// Builds a neighbor mask from four occupancy flags.
#[inline]
#[must_use]
pub const fn neighbor_mask(above: bool, right: bool, below: bool, left: bool) -> NeighborMask {
    ((above as u8) << 3) | ((right as u8) << 2) | ((below as u8) << 1) | (left as u8)
}

/// Cell coordinates in the block atlas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtlasCell {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
}

impl AtlasCell {
    /// Fallback for masks the table does not list.
    pub const DEFAULT: Self = Self::new(0, 0);

    /// Cell used for a block with no neighbors (also drawn for items).
    pub const ISOLATED: Self = Self::new(9, 3);

    /// Creates a cell coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Source rectangle `(x, y, width, height)` in atlas pixels.
    #[inline]
    #[must_use]
    pub const fn source_rect(self) -> (u32, u32, u32, u32) {
        (
            self.x as u32 * ATLAS_CELL_STRIDE,
            self.y as u32 * ATLAS_CELL_STRIDE,
            ATLAS_CELL_SIZE,
            ATLAS_CELL_SIZE,
        )
    }
}

/// The reference patterns, one per neighbor mask.
pub const REFERENCE_PATTERNS: [(NeighborMask, AtlasCell); MASK_COUNT] = [
    (0b1110, AtlasCell::new(0, 0)),
    (0b0111, AtlasCell::new(1, 0)),
    (0b1011, AtlasCell::new(4, 0)),
    (0b1101, AtlasCell::new(1, 2)),
    (0b1111, AtlasCell::new(1, 1)),
    (0b0110, AtlasCell::new(0, 3)),
    (0b0011, AtlasCell::new(1, 3)),
    (0b1100, AtlasCell::new(0, 4)),
    (0b1010, AtlasCell::new(5, 0)),
    (0b0010, AtlasCell::new(6, 0)),
    (0b1000, AtlasCell::new(6, 3)),
    (0b0100, AtlasCell::new(9, 0)),
    (0b0000, AtlasCell::new(9, 3)),
    (0b0001, AtlasCell::new(12, 0)),
    (0b0101, AtlasCell::new(6, 4)),
    (0b1001, AtlasCell::new(1, 4)),
];

/// Neighbor mask → atlas cell lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutotileTable {
    cells: [Option<AtlasCell>; MASK_COUNT],
}

impl AutotileTable {
    /// Table built from [`REFERENCE_PATTERNS`]. Fails to compile if the
    /// pattern list has a duplicate or out-of-range mask.
    pub const REFERENCE: Self = Self::build(&REFERENCE_PATTERNS);

    const fn build(patterns: &[(NeighborMask, AtlasCell)]) -> Self {
        let mut cells = [None; MASK_COUNT];
        let mut i = 0;
        while i < patterns.len() {
            let (mask, cell) = patterns[i];
            assert!((mask as usize) < MASK_COUNT, "autotile mask out of range");
            assert!(cells[mask as usize].is_none(), "duplicate autotile mask");
            cells[mask as usize] = Some(cell);
            i += 1;
        }
        Self { cells }
    }

    /// Builds a table from an ordered pattern list.
    ///
    /// # Errors
    ///
    /// - `WorldError::PatternOutOfRange` if a mask uses bits above bit 3
    /// - `WorldError::DuplicatePattern` if a mask appears twice
    pub fn from_patterns(patterns: &[(NeighborMask, AtlasCell)]) -> WorldResult<Self> {
        let mut cells = [None; MASK_COUNT];
        for &(mask, cell) in patterns {
            let slot = cells
                .get_mut(mask as usize)
                .ok_or(WorldError::PatternOutOfRange { pattern: mask })?;
            if slot.is_some() {
                return Err(WorldError::DuplicatePattern { pattern: mask });
            }
            *slot = Some(cell);
        }
        Ok(Self { cells })
    }

    /// Number of masks with an explicit entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// True if no mask has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell for a neighbor mask, or the default cell if unlisted.
    #[inline]
    #[must_use]
    pub fn lookup(&self, mask: NeighborMask) -> AtlasCell {
        self.cells
            .get(mask as usize)
            .copied()
            .flatten()
            .unwrap_or(AtlasCell::DEFAULT)
    }

    /// Neighbor mask of the cell at `(x, y)`.
    #[must_use]
    pub fn mask_at(world: &WorldManager, x: i32, y: i32) -> NeighborMask {
        neighbor_mask(
            world.is_solid_at(x, y - 1),
            world.is_solid_at(x + 1, y),
            world.is_solid_at(x, y + 1),
            world.is_solid_at(x - 1, y),
        )
    }

    /// Cell for the block at `(x, y)`. `None` if absent or empty.
    #[must_use]
    pub fn resolve(&self, world: &WorldManager, x: i32, y: i32) -> Option<AtlasCell> {
        let block = world.get_block(x, y)?;
        self.resolve_block(world, block)
    }

    /// Cell for a block. `None` for empty blocks.
    #[must_use]
    pub fn resolve_block(&self, world: &WorldManager, block: &Block) -> Option<AtlasCell> {
        if !block.is_solid() {
            return None;
        }
        Some(self.lookup(Self::mask_at(world, block.grid_x(), block.grid_y())))
    }
}

impl Default for AutotileTable {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::config::WorldConfig;

    #[test]
    fn test_mask_bit_order() {
        assert_eq!(neighbor_mask(true, false, false, false), 0b1000);
        assert_eq!(neighbor_mask(false, true, false, false), 0b0100);
        assert_eq!(neighbor_mask(false, false, true, false), 0b0010);
        assert_eq!(neighbor_mask(false, false, false, true), 0b0001);
        assert_eq!(neighbor_mask(true, true, true, true), 0b1111);
    }

    #[test]
    fn test_reference_table_is_exhaustive() {
        let table = AutotileTable::REFERENCE;
        assert_eq!(table.len(), 16);
        assert_eq!(table.lookup(0b1111), AtlasCell::new(1, 1));
        assert_eq!(table.lookup(0b0000), AtlasCell::ISOLATED);
        assert_eq!(table.lookup(0b0001), AtlasCell::new(12, 0));
    }

    #[test]
    fn test_unlisted_mask_falls_back_to_default() {
        let table = AutotileTable::from_patterns(&[(0b1111, AtlasCell::new(1, 1))])
            .expect("single pattern");
        assert_eq!(table.lookup(0b1111), AtlasCell::new(1, 1));
        assert_eq!(table.lookup(0b0101), AtlasCell::DEFAULT);
        assert_eq!(table.lookup(0xFF), AtlasCell::DEFAULT);
    }

    #[test]
    fn test_from_patterns_rejects_duplicates() {
        let result = AutotileTable::from_patterns(&[
            (0b0011, AtlasCell::new(1, 3)),
            (0b0011, AtlasCell::new(2, 3)),
        ]);
        assert_eq!(result, Err(WorldError::DuplicatePattern { pattern: 0b0011 }));

        let result = AutotileTable::from_patterns(&[(0b1_0000, AtlasCell::new(0, 0))]);
        assert_eq!(result, Err(WorldError::PatternOutOfRange { pattern: 0b1_0000 }));
    }

    #[test]
    fn test_from_reference_patterns_matches_const_table() {
        let table = AutotileTable::from_patterns(&REFERENCE_PATTERNS).expect("reference is valid");
        assert_eq!(table, AutotileTable::REFERENCE);
    }

    #[test]
    fn test_source_rect_uses_stride() {
        assert_eq!(AtlasCell::new(0, 0).source_rect(), (0, 0, 8, 8));
        assert_eq!(AtlasCell::new(9, 3).source_rect(), (81, 27, 8, 8));
    }

    #[test]
    fn test_resolve_in_world() {
        let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
        world.materialize_all();
        let table = AutotileTable::REFERENCE;

        // Deep dirt is fully surrounded.
        assert_eq!(table.resolve(&world, 5, 40), Some(AtlasCell::new(1, 1)));
        // Empty sky has no drawable.
        assert_eq!(table.resolve(&world, 5, 0), None);
        // Outside the world.
        assert_eq!(table.resolve(&world, -5, 40), None);

        // Left world edge: the unloaded column counts as open.
        assert_eq!(AutotileTable::mask_at(&world, 0, 40), 0b1110);
        assert_eq!(table.resolve(&world, 0, 40), Some(AtlasCell::new(0, 0)));

        // Isolated block floating in the sky.
        world.set_block_type(5, 1, BlockType::Wood);
        assert_eq!(table.resolve(&world, 5, 1), Some(AtlasCell::ISOLATED));
    }
}
