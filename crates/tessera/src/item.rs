//! # Dropped Items
//!
//! Loose item entities spawned by mining.
//!
//! ```text
//! Falling ──(player within attract radius)──> Attracted ──(within collect radius)──> Collected
//! ```
//!
//! Distances are measured from the item's top-left corner to the player
//! midpoint, and attraction pulls that corner toward the midpoint.
//! `Collected` is terminal: the owner adds the item to the inventory once
//! and drops the entity.

use tessera_economy::ItemKind;
use tessera_procedural::WorldManager;
use tessera_shared::{Collider, Vec2};

use crate::config::ItemConfig;

/// Lifecycle state of a dropped item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ItemState {
    /// Falls at a constant speed and rests on solid ground.
    #[default]
    Falling,
    /// Pulled toward the player.
    Attracted,
    /// Picked up. Terminal.
    Collected,
}

/// A dropped item.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    kind: ItemKind,
    collider: Collider,
    state: ItemState,
}

impl Item {
    /// Spawns a square item of edge `size` centred on `center`.
    #[must_use]
    pub fn new(kind: ItemKind, center: Vec2, size: f32) -> Self {
        Self {
            kind,
            collider: Collider::centered(center, size),
            state: ItemState::Falling,
        }
    }

    /// Item kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Current rectangle.
    #[inline]
    #[must_use]
    pub const fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ItemState {
        self.state
    }

    /// True once picked up.
    #[inline]
    #[must_use]
    pub fn is_collected(&self) -> bool {
        self.state == ItemState::Collected
    }

    /// Advances one step toward `target` (the player midpoint).
    ///
    /// Returns the new state. A collected item never moves again.
    pub fn update(
        &mut self,
        world: &WorldManager,
        target: Vec2,
        config: &ItemConfig,
        dt: f32,
    ) -> ItemState {
        if self.is_collected() {
            return self.state;
        }

        let corner = self.collider.position();
        let distance = corner.distance(target);
        if distance < config.collect_radius {
            self.state = ItemState::Collected;
            return self.state;
        }

        if distance < config.attract_radius {
            self.state = ItemState::Attracted;
            let t = (config.attract_rate * dt).min(1.0);
            let pulled = corner.lerp(target, t);
            self.collider.x = pulled.x;
            self.collider.y = pulled.y;
            return self.state;
        }

        self.state = ItemState::Falling;
        self.collider.y += config.fall_speed * dt;
        self.rest_on_ground(world);
        self.state
    }

    fn rest_on_ground(&mut self, world: &WorldManager) {
        let probe_x = self.collider.x + self.collider.width / 2.0;
        let probe_y = self.collider.bottom() + 1.0;
        if let Some(block) = world
            .block_at_world_point(probe_x, probe_y)
            .filter(|block| block.is_solid())
        {
            self.collider.y = block.collider().y - self.collider.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_procedural::{BlockType, WorldConfig};

    fn world() -> WorldManager {
        let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
        world.materialize_all();
        world
    }

    fn grass() -> ItemKind {
        ItemKind::Block(BlockType::Grass)
    }

    #[test]
    fn test_spawn_is_centred() {
        let item = Item::new(grass(), Vec2::new(100.0, 50.0), 5.6);
        assert!((item.collider().x - 97.2).abs() < 1e-4);
        assert!((item.collider().y - 47.2).abs() < 1e-4);
        assert!(item.collider().center().distance(Vec2::new(100.0, 50.0)) < 1e-4);
        assert_eq!(item.state(), ItemState::Falling);
    }

    #[test]
    fn test_falls_and_rests_on_ground() {
        let world = world();
        let config = ItemConfig::default();
        let surface = world.surface_row(20);
        let top = surface as f32 * world.block_size();

        let mut item = Item::new(grass(), Vec2::new(164.0, top - 20.0), 5.6);
        let far = Vec2::new(5000.0, 0.0);
        for _ in 0..120 {
            assert_eq!(item.update(&world, far, &config, 1.0 / 60.0), ItemState::Falling);
        }
        assert!((item.collider().bottom() - top).abs() < 1e-3);
    }

    #[test]
    fn test_attracted_then_collected() {
        let world = world();
        let config = ItemConfig::default();
        let player = Vec2::new(200.0, 0.0);

        // Top-left corner at (247.2, -2.8).
        let mut item = Item::new(grass(), Vec2::new(250.0, 0.0), 5.6);
        assert_eq!(item.update(&world, player, &config, 0.05), ItemState::Attracted);
        // The corner covers half the remaining distance at t = 0.5.
        assert!((item.collider().x - 223.6).abs() < 1e-3);
        assert!((item.collider().y + 1.4).abs() < 1e-3);

        let mut state = item.state();
        for _ in 0..20 {
            state = item.update(&world, player, &config, 0.05);
            if state == ItemState::Collected {
                break;
            }
        }
        assert_eq!(state, ItemState::Collected);

        let before = *item.collider();
        assert_eq!(item.update(&world, player, &config, 0.05), ItemState::Collected);
        assert_eq!(*item.collider(), before);
    }

    #[test]
    fn test_close_item_collected_immediately() {
        let world = world();
        let config = ItemConfig::default();
        let player = Vec2::new(300.0, 10.0);
        let mut item = Item::new(grass(), Vec2::new(303.0, 10.0), 5.6);
        assert_eq!(item.update(&world, player, &config, 1.0 / 60.0), ItemState::Collected);
    }

    #[test]
    fn test_collect_radius_measured_from_corner() {
        let world = world();
        let config = ItemConfig::default();
        let player = Vec2::new(300.0, 10.0);

        // Centre 6.5 away, top-left corner (303.7, 7.2) about 4.64 away.
        let mut item = Item::new(grass(), Vec2::new(306.5, 10.0), 5.6);
        assert!(item.collider().center().distance(player) >= config.collect_radius);
        assert!(item.collider().position().distance(player) < config.collect_radius);
        assert_eq!(item.update(&world, player, &config, 1.0 / 60.0), ItemState::Collected);
    }

    #[test]
    fn test_attract_radius_measured_from_corner() {
        let world = world();
        let config = ItemConfig::default();
        let player = Vec2::new(300.0, 10.0);

        // Centre 101 away, corner 98.2 away.
        let mut item = Item::new(grass(), Vec2::new(401.0, 10.0), 5.6);
        assert!(item.collider().center().distance(player) >= config.attract_radius);
        assert_eq!(item.update(&world, player, &config, 1.0 / 60.0), ItemState::Attracted);
    }
}
