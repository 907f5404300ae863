//! # Blocks
//!
//! One cell of the world grid. A block's grid position and collider are
//! fixed at construction; only its type changes (mining, placing).

use serde::{Deserialize, Serialize};
use tessera_shared::Collider;

/// Block type stored in every grid cell.
///
/// The discriminants are stable ids. Never renumber or reuse a retired id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    /// Nothing: no collision, no neighbor, no drawable.
    #[default]
    Empty = 0,
    /// Surface block, one per column.
    Grass = 1,
    /// Everything below the surface.
    Dirt = 2,
    /// Player-placed building material.
    Wood = 3,
}

impl BlockType {
    /// Every block type, in id order.
    pub const ALL: [Self; 4] = [Self::Empty, Self::Grass, Self::Dirt, Self::Wood];

    /// Stable numeric id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks a block type up by id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Empty),
            1 => Some(Self::Grass),
            2 => Some(Self::Dirt),
            3 => Some(Self::Wood),
            _ => None,
        }
    }

    /// True for [`BlockType::Empty`].
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True for every type that collides and counts as a neighbor.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !self.is_empty()
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Grass => "Grass",
            Self::Dirt => "Dirt",
            Self::Wood => "Wood",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    kind: BlockType,
    grid_x: i32,
    grid_y: i32,
    collider: Collider,
}

impl Block {
    /// Creates a block at absolute grid coordinates.
    ///
    /// The collider is `(grid_x * block_size, grid_y * block_size, block_size, block_size)`.
    #[must_use]
    pub fn new(kind: BlockType, grid_x: i32, grid_y: i32, block_size: f32) -> Self {
        Self {
            kind,
            grid_x,
            grid_y,
            collider: Collider::new(
                grid_x as f32 * block_size,
                grid_y as f32 * block_size,
                block_size,
                block_size,
            ),
        }
    }

    /// Current type.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> BlockType {
        self.kind
    }

    /// Absolute grid column.
    #[inline]
    #[must_use]
    pub const fn grid_x(&self) -> i32 {
        self.grid_x
    }

    /// Absolute grid row.
    #[inline]
    #[must_use]
    pub const fn grid_y(&self) -> i32 {
        self.grid_y
    }

    /// World-space rectangle of this cell.
    #[inline]
    #[must_use]
    pub const fn collider(&self) -> &Collider {
        &self.collider
    }

    /// True if this block collides.
    #[inline]
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }

    /// Changes the type. Position and collider never move.
    #[inline]
    pub(crate) fn set_kind(&mut self, kind: BlockType) {
        self.kind = kind;
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block: {} X: {} Y: {}", self.kind, self.grid_x, self.grid_y)
    }
}
