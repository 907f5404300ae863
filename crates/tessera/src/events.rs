//! # Event Bus
//!
//! One-way notifications from the simulation to its collaborators.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────────────┐
//! │ Simulation  │─────>│   bounded   │─────>│ HUD / audio / render │
//! │   step()    │      │   channel   │      │   drain per frame    │
//! └─────────────┘      └─────────────┘      └──────────────────────┘
//! ```
//!
//! Sending never blocks. A full channel drops the event and logs a warning
//! so a stalled consumer cannot stall the simulation.

use std::collections::BTreeMap;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tessera_economy::ItemKind;
use tessera_procedural::{BlockType, ChunkCoord};
use tracing::warn;

/// Things that happened during a step.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    // =========================================================================
    // Blocks
    // =========================================================================
    /// A block was mined.
    BlockMined {
        /// Grid column.
        x: i32,
        /// Grid row.
        y: i32,
        /// Type before mining.
        kind: BlockType,
    },

    /// A block was placed.
    BlockPlaced {
        /// Grid column.
        x: i32,
        /// Grid row.
        y: i32,
        /// Type placed.
        kind: BlockType,
    },

    // =========================================================================
    // Items
    // =========================================================================
    /// A dropped item appeared.
    ItemSpawned {
        /// Item kind.
        kind: ItemKind,
        /// Centre, world units.
        x: f32,
        /// Centre, world units.
        y: f32,
    },

    /// A dropped item was picked up.
    ItemCollected {
        /// Item kind.
        kind: ItemKind,
        /// Centre at pickup, world units.
        x: f32,
        /// Centre at pickup, world units.
        y: f32,
    },

    /// Inventory contents changed. Carries the full mapping.
    InventoryChanged {
        /// Kind → count, zero counts absent.
        contents: BTreeMap<ItemKind, u32>,
    },

    // =========================================================================
    // World & view
    // =========================================================================
    /// A chunk was generated by streaming.
    ChunkLoaded {
        /// Chunk coordinate.
        coord: ChunkCoord,
    },

    /// A chunk was evicted by streaming.
    ChunkEvicted {
        /// Chunk coordinate.
        coord: ChunkCoord,
    },

    /// Camera zoom changed.
    ZoomChanged {
        /// New zoom.
        zoom: f32,
    },
}

/// Bounded event channel.
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle (clone for multiple consumers).
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(?event, capacity = ?self.sender.capacity(), "Event bus full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Takes every pending event, oldest first.
    #[inline]
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event, `None` if nothing is pending.
    #[inline]
    pub fn try_recv(&self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// True if at least one event is pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
