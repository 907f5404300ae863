//! # Game Configuration
//!
//! One TOML document, one section per subsystem. Every field has the
//! reference value as its default, so an empty file reproduces the
//! reference game.
//!
//! ```toml
//! [world]
//! chunk_size = 30
//!
//! [player]
//! spawn_x = 1000.0
//!
//! [player.starting_inventory]
//! Wood = 10
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tessera_economy::{Inventory, ItemKind};
use tessera_procedural::WorldConfig;

use crate::error::{ConfigError, ConfigResult};

/// Player body and force model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position, world units.
    pub spawn_x: f32,
    /// Spawn position, world units. Negative is above the world.
    pub spawn_y: f32,
    /// Body width.
    pub width: f32,
    /// Body height.
    pub height: f32,
    /// Horizontal force added per step while a move key is held.
    pub acceleration: f32,
    /// Horizontal force cap.
    pub max_speed: f32,
    /// Vertical force set by a jump (negative is up).
    pub jump_force: f32,
    /// Vertical force gravity pulls toward.
    pub terminal_force: f32,
    /// Gravity interpolation rate per second.
    pub gravity_rate: f32,
    /// Horizontal force multiplier applied once per step.
    pub drag: f32,
    /// Interaction reach from the body midpoint.
    pub reach: f32,
    /// Item name → count given at spawn.
    pub starting_inventory: BTreeMap<String, u32>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_x: 1000.0,
            spawn_y: -10.0,
            width: 16.0,
            height: 32.0,
            acceleration: 10.0,
            max_speed: 50.0,
            jump_force: -150.0,
            terminal_force: 60.0,
            gravity_rate: 2.0,
            drag: 0.9,
            reach: 56.0,
            starting_inventory: BTreeMap::new(),
        }
    }
}

impl PlayerConfig {
    /// Builds the starting inventory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Item` if a name matches no item kind.
    pub fn starting_inventory(&self) -> ConfigResult<Inventory> {
        let stacks = self
            .starting_inventory
            .iter()
            .map(|(name, &count)| Ok((name.parse::<ItemKind>()?, count)))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Inventory::with_contents(stacks))
    }
}

/// Dropped item behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Item edge as a fraction of the block size.
    pub size_factor: f32,
    /// Fall speed in world units per second.
    pub fall_speed: f32,
    /// Player distance below which an item is pulled in.
    pub attract_radius: f32,
    /// Player distance below which an item is collected.
    pub collect_radius: f32,
    /// Pull interpolation rate per second.
    pub attract_rate: f32,
    /// Horizontal spawn jitter half-width.
    pub spawn_jitter: f32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            size_factor: 0.7,
            fall_speed: 40.0,
            attract_radius: 100.0,
            collect_radius: 6.0,
            attract_rate: 10.0,
            spawn_jitter: 1.0,
        }
    }
}

/// Viewport and zoom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Viewport width in screen pixels.
    pub viewport_width: f32,
    /// Viewport height in screen pixels.
    pub viewport_height: f32,
    /// Initial zoom.
    pub zoom: f32,
    /// Smallest zoom.
    pub min_zoom: f32,
    /// Largest zoom.
    pub max_zoom: f32,
    /// Zoom change per wheel notch or key press.
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            zoom: 2.0,
            min_zoom: 2.0,
            max_zoom: 5.0,
            zoom_step: 0.25,
        }
    }
}

/// Stepping and determinism.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed steps per second.
    pub tick_rate: u32,
    /// Step cap per frame; the remainder is dropped.
    pub max_steps_per_frame: u32,
    /// Frame delta clamp, milliseconds.
    pub max_frame_delta_ms: u32,
    /// Seed for mining jitter.
    pub seed: u64,
    /// Event bus capacity.
    pub event_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_steps_per_frame: 5,
            max_frame_delta_ms: 100,
            seed: 0x7E55_E8A0,
            event_capacity: 1024,
        }
    }
}

impl SimulationConfig {
    /// Seconds per fixed step.
    #[inline]
    #[must_use]
    pub fn step_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Frame delta clamp in seconds.
    #[inline]
    #[must_use]
    pub fn max_frame_delta(&self) -> f32 {
        self.max_frame_delta_ms as f32 / 1000.0
    }
}

/// Draw list options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rotation of dropped items, degrees.
    pub item_rotation_degrees: f32,
    /// Extra blocks drawn around the view edge.
    pub cull_margin_blocks: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            item_rotation_degrees: 45.0,
            cull_margin_blocks: 1,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Terrain and chunk streaming.
    pub world: WorldConfig,
    /// Player body and forces.
    pub player: PlayerConfig,
    /// Dropped items.
    pub items: ItemConfig,
    /// Viewport and zoom.
    pub camera: CameraConfig,
    /// Stepping.
    pub simulation: SimulationConfig,
    /// Draw list.
    pub render: RenderConfig,
}

impl GameConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, otherwise whatever
    /// [`GameConfig::validate`] reports.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise
    /// whatever [`GameConfig::from_toml_str`] reports.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// - `ConfigError::World` for an unusable `[world]` section
    /// - `ConfigError::Item` for an unknown starting inventory name
    /// - `ConfigError::Invalid` naming the first other bad value
    pub fn validate(&self) -> ConfigResult<()> {
        self.world.validate()?;
        self.player.starting_inventory()?;

        let player = &self.player;
        if !(player.width > 0.0 && player.height > 0.0) {
            return Err(invalid("player size must be positive"));
        }
        if !(0.0..=1.0).contains(&player.drag) {
            return Err(invalid("player.drag must be within 0..=1"));
        }

        let camera = &self.camera;
        if !(camera.min_zoom > 0.0 && camera.min_zoom <= camera.max_zoom) {
            return Err(invalid(format!(
                "zoom range {}..={} is empty or not positive",
                camera.min_zoom, camera.max_zoom
            )));
        }
        if !(camera.min_zoom..=camera.max_zoom).contains(&camera.zoom) {
            return Err(invalid("camera.zoom is outside min_zoom..=max_zoom"));
        }
        if camera.zoom_step <= 0.0 {
            return Err(invalid("camera.zoom_step must be positive"));
        }
        if !(camera.viewport_width > 0.0 && camera.viewport_height > 0.0) {
            return Err(invalid("viewport must be positive"));
        }

        let items = &self.items;
        if !(items.size_factor > 0.0 && items.collect_radius <= items.attract_radius) {
            return Err(invalid(
                "items.size_factor must be positive and collect_radius <= attract_radius",
            ));
        }

        let sim = &self.simulation;
        if sim.tick_rate == 0 || sim.max_steps_per_frame == 0 {
            return Err(invalid("tick_rate and max_steps_per_frame must be positive"));
        }
        if sim.event_capacity == 0 {
            return Err(invalid("simulation.event_capacity must be positive"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
