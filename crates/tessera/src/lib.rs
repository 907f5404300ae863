//! # TESSERA
//!
//! A 2D block sandbox core: heightfield terrain, a streamed chunk cache,
//! autotiling, an axis-separated movement resolver, dropped items and a
//! camera. No window, no canvas, no device: collaborators plug in through
//! [`tessera_ui::InputSource`], the event bus and the draw list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              GameLoop                                   │
//! │   FixedTimestep ──> Simulation::step(dt) × n ──> FrameStatsAccumulator  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                             Simulation                                  │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────┐  │
//! │  │ WorldManager │<──│    Player    │   │    Items     │   │  Camera  │  │
//! │  │ (procedural) │   │  physics.rs  │──>│ (economy)    │   │          │  │
//! │  └──────┬───────┘   └──────────────┘   └──────────────┘   └────┬─────┘  │
//! │         │                                                      │        │
//! │         └──────────> AutotileTable ──> render::build_draw_list <┘       │
//! │                                                                         │
//! │  EventBus ──> HUD / inventory listener / audio                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration with reference defaults
//! - `physics`: per-axis movement resolution against the block grid
//! - `player`, `item`, `camera`: the entities
//! - `simulation`: the explicit game context
//! - `game_loop`: fixed-timestep driver and frame statistics
//! - `events`: bounded notification channel
//! - `render`: draw command list

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod item;
pub mod physics;
pub mod player;
pub mod render;
pub mod simulation;

// Re-export the member crates
pub use tessera_economy as economy;
pub use tessera_procedural as procedural;
pub use tessera_shared as shared;
pub use tessera_ui as ui;

// Re-export commonly used types
pub use camera::Camera;
pub use config::{CameraConfig, GameConfig, ItemConfig, PlayerConfig, RenderConfig, SimulationConfig};
pub use error::{ConfigError, ConfigResult, GameError, GameResult};
pub use events::{EventBus, EventReceiver, EventSender, GameEvent};
pub use game_loop::{FixedTimestep, FrameStats, FrameStatsAccumulator, GameLoop, TARGET_FRAME_TIME};
pub use item::{Item, ItemState};
pub use physics::{resolve_axis_move, Axis, AxisMove};
pub use player::{MoveIntent, Player, StepReport};
pub use render::{build_draw_list, DrawCommand};
pub use simulation::{InventoryListener, Simulation};
