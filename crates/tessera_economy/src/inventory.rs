//! # Inventory System
//!
//! Item kind → count. A kind is present only while its count is positive.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{EconomyError, EconomyResult};
use crate::item::ItemKind;

/// A player inventory.
///
/// Iteration order is id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory holding the given stacks.
    #[must_use]
    pub fn with_contents(stacks: impl IntoIterator<Item = (ItemKind, u32)>) -> Self {
        let mut inventory = Self::new();
        for (kind, count) in stacks {
            inventory.add(kind, count);
        }
        inventory
    }

    /// Adds items.
    ///
    /// Zero counts and `Block(Empty)` are ignored. Counts saturate at `u32::MAX`.
    ///
    /// Returns `true` if the contents changed.
    pub fn add(&mut self, kind: ItemKind, count: u32) -> bool {
        if count == 0 || kind.is_empty() {
            return false;
        }
        let slot = self.items.entry(kind).or_insert(0);
        *slot = slot.saturating_add(count);
        debug!(item = %kind, count, total = *slot, "Inventory add");
        true
    }

    /// Removes exactly `count` items.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InsufficientItems` if fewer than `count` are
    /// held. The inventory is unchanged on error.
    pub fn take(&mut self, kind: ItemKind, count: u32) -> EconomyResult<()> {
        let available = self.count(kind);
        if available < count {
            return Err(EconomyError::InsufficientItems {
                item: kind.name().to_string(),
                required: count,
                available,
            });
        }
        if count == 0 {
            return Ok(());
        }

        let remaining = available - count;
        if remaining == 0 {
            self.items.remove(&kind);
        } else {
            self.items.insert(kind, remaining);
        }
        debug!(item = %kind, count, total = remaining, "Inventory remove");
        Ok(())
    }

    /// Removes exactly `count` items.
    ///
    /// Returns `false` and changes nothing if fewer are held.
    pub fn remove(&mut self, kind: ItemKind, count: u32) -> bool {
        self.take(kind, count).is_ok()
    }

    /// Count of a kind, zero if absent.
    #[inline]
    #[must_use]
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    /// True if at least `count` items of the kind are held.
    #[inline]
    #[must_use]
    pub fn has(&self, kind: ItemKind, count: u32) -> bool {
        self.count(kind) >= count
    }

    /// Full kind → count mapping.
    #[must_use]
    pub const fn contents(&self) -> &BTreeMap<ItemKind, u32> {
        &self.items
    }

    /// Stacks in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.items.iter().map(|(&kind, &count)| (kind, count))
    }

    /// Number of distinct kinds held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count across kinds.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.values().map(|&c| u64::from(c)).sum()
    }
}
