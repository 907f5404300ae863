//! # Item Kinds
//!
//! Everything that can sit in an inventory: placeable blocks and tools.
//!
//! ## Id Rules
//!
//! Ids are persistent identifiers. When adding a kind, append a new id;
//! never renumber and never fill the gap a retired id left behind.
//!
//! | id | kind | key |
//! |----|------|-----|
//! | 0 | Empty | `B_Empty` |
//! | 1 | Grass | `B_Grass` |
//! | 2 | Dirt | `B_Dirt` |
//! | 3 | Wood | `B_Wood` |
//! | 4 | Wooden Pickaxe | `T_WoodenPickaxe` |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessera_procedural::BlockType;

use crate::error::{EconomyError, EconomyResult};

/// Tools. Ids continue after the block types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ToolKind {
    /// Starter tool.
    WoodenPickaxe = 4,
}

impl ToolKind {
    /// Every tool, in id order.
    pub const ALL: [Self; 1] = [Self::WoodenPickaxe];
}

/// An inventory item kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// A block that can be placed back into the world.
    Block(BlockType),
    /// A tool.
    Tool(ToolKind),
}

impl ItemKind {
    /// Every item kind, in id order.
    pub const ALL: [Self; 5] = [
        Self::Block(BlockType::Empty),
        Self::Block(BlockType::Grass),
        Self::Block(BlockType::Dirt),
        Self::Block(BlockType::Wood),
        Self::Tool(ToolKind::WoodenPickaxe),
    ];

    /// Stable numeric id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Block(block) => block.id(),
            Self::Tool(tool) => tool as u8,
        }
    }

    /// Looks an item kind up by id.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::UnknownItemId` for ids no kind uses.
    pub fn from_id(id: u8) -> EconomyResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or(EconomyError::UnknownItemId(id))
    }

    /// Human readable name ("Wooden Pickaxe").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Block(block) => block.name(),
            Self::Tool(ToolKind::WoodenPickaxe) => "Wooden Pickaxe",
        }
    }

    /// Identifier key ("`T_WoodenPickaxe`").
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Block(BlockType::Empty) => "B_Empty",
            Self::Block(BlockType::Grass) => "B_Grass",
            Self::Block(BlockType::Dirt) => "B_Dirt",
            Self::Block(BlockType::Wood) => "B_Wood",
            Self::Tool(ToolKind::WoodenPickaxe) => "T_WoodenPickaxe",
        }
    }

    /// True for `Block(Empty)`, which is never stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Block(BlockType::Empty))
    }

    /// The block this item places, if any.
    #[inline]
    #[must_use]
    pub const fn placeable_block(self) -> Option<BlockType> {
        match self {
            Self::Block(BlockType::Empty) | Self::Tool(_) => None,
            Self::Block(block) => Some(block),
        }
    }
}

impl From<BlockType> for ItemKind {
    fn from(block: BlockType) -> Self {
        Self::Block(block)
    }
}

impl From<ToolKind> for ItemKind {
    fn from(tool: ToolKind) -> Self {
        Self::Tool(tool)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemKind {
    type Err = EconomyError;

    /// Accepts the display name or the key, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || kind.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| EconomyError::UnknownItemName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        let ids: Vec<u8> = ItemKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(ItemKind::Tool(ToolKind::WoodenPickaxe).id(), 4);
    }

    #[test]
    fn test_from_id() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::from_id(kind.id()), Ok(kind));
        }
        assert_eq!(ItemKind::from_id(5), Err(EconomyError::UnknownItemId(5)));
    }

    #[test]
    fn test_names() {
        assert_eq!(ItemKind::Block(BlockType::Grass).name(), "Grass");
        assert_eq!(ItemKind::Tool(ToolKind::WoodenPickaxe).name(), "Wooden Pickaxe");
        assert_eq!(ItemKind::Tool(ToolKind::WoodenPickaxe).to_string(), "Wooden Pickaxe");
    }

    #[test]
    fn test_parse_name_or_key() {
        assert_eq!("dirt".parse(), Ok(ItemKind::Block(BlockType::Dirt)));
        assert_eq!("B_Wood".parse(), Ok(ItemKind::Block(BlockType::Wood)));
        assert_eq!(
            "Wooden Pickaxe".parse(),
            Ok(ItemKind::Tool(ToolKind::WoodenPickaxe))
        );
        assert!(matches!(
            "Diamond".parse::<ItemKind>(),
            Err(EconomyError::UnknownItemName(_))
        ));
    }

    #[test]
    fn test_order_matches_ids() {
        let mut sorted = ItemKind::ALL;
        sorted.sort();
        assert_eq!(sorted, ItemKind::ALL);
    }

    #[test]
    fn test_placeable_block() {
        assert_eq!(ItemKind::Block(BlockType::Wood).placeable_block(), Some(BlockType::Wood));
        assert_eq!(ItemKind::Block(BlockType::Empty).placeable_block(), None);
        assert_eq!(ItemKind::Tool(ToolKind::WoodenPickaxe).placeable_block(), None);
    }
}
