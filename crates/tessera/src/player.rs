//! # Player
//!
//! Force-driven body resolved against the block grid, plus the inventory and
//! the block kind selected for placing.
//!
//! One step:
//!
//! ```text
//! intent → forceX/forceY → horizontal pass → vertical pass → gravity → drag
//! ```

use tessera_economy::Inventory;
use tessera_procedural::{BlockType, WorldManager};
use tessera_shared::{Collider, Vec2};

use crate::config::PlayerConfig;
use crate::physics::{resolve_axis_move, Axis, AxisMove};

/// What the player wants to do during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    /// Accelerate left.
    pub left: bool,
    /// Accelerate right. Wins over `left` when both are held.
    pub right: bool,
    /// Jump edge for this step.
    pub jump: bool,
}

/// Axis results of one player step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Horizontal pass.
    pub horizontal: AxisMove,
    /// Vertical pass.
    pub vertical: AxisMove,
}

impl StepReport {
    /// The vertical pass stopped on the ground.
    #[inline]
    #[must_use]
    pub fn landed(&self) -> bool {
        self.vertical.blocked_positive()
    }
}

/// The player entity.
#[derive(Clone, Debug)]
pub struct Player {
    collider: Collider,
    /// Horizontal force, world units per second.
    pub force_x: f32,
    /// Vertical force, world units per second. Negative is up.
    pub force_y: f32,
    inventory: Inventory,
    selected: BlockType,
    tuning: PlayerConfig,
}

impl Player {
    /// Spawns a player at the configured position.
    #[must_use]
    pub fn new(config: &PlayerConfig, inventory: Inventory) -> Self {
        Self {
            collider: Collider::new(config.spawn_x, config.spawn_y, config.width, config.height),
            force_x: 0.0,
            force_y: 0.0,
            inventory,
            selected: BlockType::Grass,
            tuning: config.clone(),
        }
    }

    // =========================================================================
    // BODY
    // =========================================================================

    /// Current body rectangle.
    #[inline]
    #[must_use]
    pub const fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.collider.position()
    }

    /// Body midpoint, the origin of reach and item attraction.
    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> Vec2 {
        self.collider.center()
    }

    /// Teleports the body. Forces are kept.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.collider.x = x;
        self.collider.y = y;
    }

    /// Applies movement intent to the forces.
    pub fn apply_intent(&mut self, intent: MoveIntent) {
        let t = &self.tuning;
        if intent.right {
            self.force_x = (self.force_x + t.acceleration).min(t.max_speed);
        } else if intent.left {
            self.force_x = (self.force_x - t.acceleration).max(-t.max_speed);
        }
        if intent.jump {
            self.jump();
        }
    }

    /// Sets the vertical force to the jump force. Works mid-air.
    pub fn jump(&mut self) {
        self.force_y = self.tuning.jump_force;
    }

    /// Advances the body by one fixed step.
    pub fn step(&mut self, world: &WorldManager, intent: MoveIntent, dt: f32) -> StepReport {
        self.apply_intent(intent);

        let horizontal =
            resolve_axis_move(world, &mut self.collider, &mut self.force_x, Axis::Horizontal, dt);
        let vertical =
            resolve_axis_move(world, &mut self.collider, &mut self.force_y, Axis::Vertical, dt);

        if !vertical.blocked_positive() {
            let t = (self.tuning.gravity_rate * dt).min(1.0);
            self.force_y += (self.tuning.terminal_force - self.force_y) * t;
        }

        self.force_x *= self.tuning.drag;

        StepReport {
            horizontal,
            vertical,
        }
    }

    // =========================================================================
    // INTERACTION
    // =========================================================================

    /// True if a world point is strictly within reach of the midpoint.
    #[must_use]
    pub fn within_reach(&self, point: Vec2) -> bool {
        self.midpoint().distance(point) < self.tuning.reach
    }

    /// Block kind used for placing.
    #[inline]
    #[must_use]
    pub const fn selected_block(&self) -> BlockType {
        self.selected
    }

    /// Selects the block kind used for placing. `Empty` is ignored.
    pub fn select_block(&mut self, kind: BlockType) -> bool {
        if kind.is_empty() {
            return false;
        }
        self.selected = kind;
        true
    }

    /// Carried items.
    #[inline]
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Carried items, mutable.
    #[inline]
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_procedural::WorldConfig;

    fn empty_world() -> WorldManager {
        WorldManager::new(WorldConfig::default()).expect("valid")
    }

    #[test]
    fn test_acceleration_is_capped() {
        let mut player = Player::new(&PlayerConfig::default(), Inventory::new());
        for _ in 0..10 {
            player.apply_intent(MoveIntent {
                right: true,
                ..MoveIntent::default()
            });
        }
        assert_eq!(player.force_x, 50.0);

        for _ in 0..20 {
            player.apply_intent(MoveIntent {
                left: true,
                ..MoveIntent::default()
            });
        }
        assert_eq!(player.force_x, -50.0);
    }

    #[test]
    fn test_right_wins_over_left() {
        let mut player = Player::new(&PlayerConfig::default(), Inventory::new());
        player.apply_intent(MoveIntent {
            left: true,
            right: true,
            jump: false,
        });
        assert_eq!(player.force_x, 10.0);
    }

    #[test]
    fn test_jump_is_unconditional() {
        let mut player = Player::new(&PlayerConfig::default(), Inventory::new());
        player.force_y = 42.0;
        player.jump();
        assert_eq!(player.force_y, -150.0);
    }

    #[test]
    fn test_free_fall_gravity_and_drag() {
        let world = empty_world();
        let mut player = Player::new(&PlayerConfig::default(), Inventory::new());
        player.force_x = 10.0;

        let dt = 0.1;
        let report = player.step(&world, MoveIntent::default(), dt);

        assert!(!report.vertical.blocked);
        // Zero vertical force: no displacement, then gravity pulls toward 60.
        assert_eq!(player.position().y, -10.0);
        assert!((player.force_y - 12.0).abs() < 1e-4);
        assert!((player.position().x - 1001.0).abs() < 1e-4);
        assert!((player.force_x - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_lands_on_surface() {
        let mut world = empty_world();
        world.materialize_all();
        let mut player = Player::new(&PlayerConfig::default(), Inventory::new());

        let mut landed = false;
        for _ in 0..600 {
            if player.step(&world, MoveIntent::default(), 1.0 / 60.0).landed() {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(player.force_y, 0.0);
        assert_eq!(player.collider().bottom() % world.block_size(), 0.0);

        let column = (player.midpoint().x / world.block_size()).floor() as i32;
        let row = (player.collider().bottom() / world.block_size()) as i32;
        assert!(row <= world.surface_row(column) + 1);
    }

    #[test]
    fn test_reach_is_strict() {
        let player = Player::new(&PlayerConfig::default(), Inventory::new());
        let mid = player.midpoint();
        assert!(player.within_reach(Vec2::new(mid.x + 55.9, mid.y)));
        assert!(!player.within_reach(Vec2::new(mid.x + 56.0, mid.y)));
    }

    #[test]
    fn test_select_block() {
        let mut player = Player::new(&PlayerConfig::default(), Inventory::new());
        assert_eq!(player.selected_block(), BlockType::Grass);
        assert!(player.select_block(BlockType::Wood));
        assert!(!player.select_block(BlockType::Empty));
        assert_eq!(player.selected_block(), BlockType::Wood);
    }
}
