//! # TESSERA Economy
//!
//! Item kinds and the player inventory.
//!
//! ## Design Principles
//!
//! 1. **Stable ids** - every item kind has a numeric id that never changes
//! 2. **No zero counts** - a kind whose count reaches zero leaves the inventory
//! 3. **All-or-nothing removal** - removing more than present changes nothing
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_economy::{Inventory, ItemKind};
//! use tessera_procedural::BlockType;
//!
//! let mut inventory = Inventory::new();
//! inventory.add(ItemKind::Block(BlockType::Dirt), 2);
//! assert!(inventory.remove(ItemKind::Block(BlockType::Dirt), 1));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod inventory;
pub mod item;

pub use error::{EconomyError, EconomyResult};
pub use inventory::Inventory;
pub use item::{ItemKind, ToolKind};
