//! # Movement Resolver
//!
//! Axis-separated AABB movement against the block grid.
//!
//! Each axis is resolved on its own, horizontal first:
//!
//! ```text
//! 1. move the collider by force * dt
//! 2. probe a 2-unit strip around the rounded leading edge
//! 3. any solid block in the strip overlapping the collider?
//!      yes → revert, snap to the block grid, zero the force
//!      no  → keep the move
//! ```
//!
//! The snap is skipped when the snapped collider would itself overlap a
//! solid block, so a blocked axis never ends inside terrain.

use tessera_procedural::WorldManager;
use tessera_shared::Collider;
use tracing::trace;

/// Half the thickness of the leading-edge probe.
pub const PROBE_HALF_THICKNESS: f32 = 1.0;

// ============================================================================
// AXIS
// ============================================================================

/// Movement axis. `Vertical` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X.
    Horizontal,
    /// Y.
    Vertical,
}

impl Axis {
    /// Both axes in resolution order.
    pub const ORDER: [Self; 2] = [Self::Horizontal, Self::Vertical];

    fn position(self, collider: &Collider) -> f32 {
        match self {
            Self::Horizontal => collider.x,
            Self::Vertical => collider.y,
        }
    }

    fn set_position(self, collider: &mut Collider, value: f32) {
        match self {
            Self::Horizontal => collider.x = value,
            Self::Vertical => collider.y = value,
        }
    }

    fn extent(self, collider: &Collider) -> f32 {
        match self {
            Self::Horizontal => collider.width,
            Self::Vertical => collider.height,
        }
    }
}

/// Outcome of one axis pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisMove {
    /// Displacement requested by the force.
    pub attempted: f32,
    /// Displacement actually applied (includes any snap).
    pub applied: f32,
    /// A solid block stopped the move.
    pub blocked: bool,
}

impl AxisMove {
    /// Blocked while moving toward positive coordinates (right, or down).
    #[inline]
    #[must_use]
    pub fn blocked_positive(&self) -> bool {
        self.blocked && self.attempted > 0.0
    }

    /// Blocked while moving toward negative coordinates (left, or up).
    #[inline]
    #[must_use]
    pub fn blocked_negative(&self) -> bool {
        self.blocked && self.attempted < 0.0
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Probe strip around the leading edge of `collider` on `axis`.
///
/// The leading edge is the rounded position plus the extent when moving
/// positive, the rounded position otherwise. The strip spans the full
/// extent of the collider on the other axis.
#[must_use]
pub fn leading_edge_probe(collider: &Collider, axis: Axis, delta: f32) -> Collider {
    let rounded = axis.position(collider).round();
    let edge = if delta > 0.0 {
        rounded + axis.extent(collider)
    } else {
        rounded
    };
    let thickness = PROBE_HALF_THICKNESS * 2.0;
    match axis {
        Axis::Horizontal => Collider::new(
            edge - PROBE_HALF_THICKNESS,
            collider.y,
            thickness,
            collider.height,
        ),
        Axis::Vertical => Collider::new(
            collider.x,
            edge - PROBE_HALF_THICKNESS,
            collider.width,
            thickness,
        ),
    }
}

/// True if any solid block inside `area` overlaps `collider`.
#[must_use]
pub fn overlaps_solid(world: &WorldManager, area: &Collider, collider: &Collider) -> bool {
    world
        .blocks_in_area(area.x, area.y, area.width, area.height)
        .any(|block| block.is_solid() && block.collider().intersects(collider))
}

/// Moves `collider` along one axis by `force * dt` and resolves collisions.
///
/// On a hit the move is reverted, the position is snapped to the nearest
/// multiple of the block size (unless that overlaps a solid block) and
/// `force` is zeroed. A zero displacement is never blocked.
pub fn resolve_axis_move(
    world: &WorldManager,
    collider: &mut Collider,
    force: &mut f32,
    axis: Axis,
    dt: f32,
) -> AxisMove {
    let delta = *force * dt;
    if delta == 0.0 {
        return AxisMove::default();
    }

    let start = axis.position(collider);
    axis.set_position(collider, start + delta);

    let probe = leading_edge_probe(collider, axis, delta);
    if !overlaps_solid(world, &probe, collider) {
        return AxisMove {
            attempted: delta,
            applied: delta,
            blocked: false,
        };
    }

    let block_size = world.block_size();
    let mut snapped = *collider;
    axis.set_position(&mut snapped, (start / block_size).round() * block_size);

    let resolved = if overlaps_solid(world, &snapped, &snapped) {
        start
    } else {
        axis.position(&snapped)
    };
    axis.set_position(collider, resolved);
    trace!(?axis, from = start, to = resolved, "Move blocked");
    *force = 0.0;

    AxisMove {
        attempted: delta,
        applied: resolved - start,
        blocked: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_procedural::{BlockType, WorldConfig};

    fn world_with_wall(column: i32, rows: std::ops::Range<i32>) -> WorldManager {
        let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
        world.materialize_all();
        for row in rows {
            world.set_block_type(column, row, BlockType::Wood);
        }
        world
    }

    #[test]
    fn test_probe_positions() {
        let collider = Collider::new(63.4, 0.0, 16.0, 32.0);
        let right = leading_edge_probe(&collider, Axis::Horizontal, 1.0);
        assert_eq!(right, Collider::new(78.0, 0.0, 2.0, 32.0));

        let left = leading_edge_probe(&collider, Axis::Horizontal, -1.0);
        assert_eq!(left, Collider::new(62.0, 0.0, 2.0, 32.0));

        let down = leading_edge_probe(&collider, Axis::Vertical, 1.0);
        assert_eq!(down, Collider::new(63.4, 31.0, 16.0, 2.0));
    }

    #[test]
    fn test_free_move_is_applied() {
        let world = world_with_wall(20, 0..4);
        let mut collider = Collider::new(63.0, 0.0, 16.0, 32.0);
        let mut force = 30.0;

        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Horizontal, 0.1);
        assert!(!result.blocked);
        assert!((collider.x - 66.0).abs() < 1e-4);
        assert_eq!(force, 30.0);
    }

    #[test]
    fn test_blocked_move_snaps_and_zeroes_force() {
        // Wall occupies x 80..88 on the player's rows.
        let world = world_with_wall(10, 0..4);
        let mut collider = Collider::new(63.0, 0.0, 16.0, 32.0);
        let mut force = 50.0;

        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Horizontal, 0.1);
        assert!(result.blocked);
        assert!(result.blocked_positive());
        assert_eq!(collider.x, 64.0);
        assert_eq!(force, 0.0);
        assert!(!overlaps_solid(&world, &collider, &collider));
    }

    #[test]
    fn test_snap_moving_left() {
        // Wall at x 64..72, player pushed left against it from 72.4.
        let world = world_with_wall(8, 0..4);
        let mut collider = Collider::new(72.4, 0.0, 16.0, 32.0);
        let mut force = -20.0;
        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Horizontal, 0.1);
        assert!(result.blocked_negative());
        assert_eq!(collider.x, 72.0);
        assert_eq!(force, 0.0);
    }

    #[test]
    fn test_snap_into_terrain_keeps_reverted_position() {
        // Wall at x 80..88. A 12-wide body at 68 touches it; the nearest
        // multiple (72) would push it into the wall.
        let world = world_with_wall(10, 0..4);
        let mut collider = Collider::new(68.0, 0.0, 12.0, 32.0);
        let mut force = 10.0;
        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Horizontal, 0.1);
        assert!(result.blocked);
        assert_eq!(collider.x, 68.0);
        assert_eq!(result.applied, 0.0);
        assert_eq!(force, 0.0);
    }

    #[test]
    fn test_zero_delta_is_not_blocked() {
        let world = world_with_wall(10, 0..4);
        let mut collider = Collider::new(70.0, 0.0, 16.0, 32.0);
        let mut force = 0.0;
        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Horizontal, 0.1);
        assert_eq!(result, AxisMove::default());
        assert_eq!(collider.x, 70.0);
    }

    #[test]
    fn test_falling_onto_ground() {
        let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
        world.materialize_all();
        let surface = world.surface_row(130).min(world.surface_row(131));
        let ground_top = surface as f32 * world.block_size();

        let mut collider = Collider::new(1040.0, ground_top - 32.5, 16.0, 32.0);
        let mut force = 60.0;
        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Vertical, 0.1);

        assert!(result.blocked_positive());
        assert_eq!(collider.bottom(), ground_top);
        assert_eq!(force, 0.0);
    }

    /// Room with interior columns 21..=29 and rows 2..=6 (x 168..240,
    /// y 16..56), closed by a ceiling, a floor and two walls.
    fn walled_room() -> WorldManager {
        let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
        world.materialize_all();
        for column in 20..=30 {
            world.set_block_type(column, 1, BlockType::Wood);
            world.set_block_type(column, 7, BlockType::Wood);
        }
        for row in 1..=7 {
            world.set_block_type(20, row, BlockType::Wood);
            world.set_block_type(30, row, BlockType::Wood);
        }
        world
    }

    fn solid_overlap(world: &WorldManager, collider: &Collider) -> bool {
        world
            .blocks_in_area(collider.x, collider.y, collider.width, collider.height)
            .any(|block| block.is_solid() && block.collider().intersects(collider))
    }

    #[test]
    fn test_blocked_axis_never_ends_inside_terrain() {
        let world = walled_room();
        // Deltas of 1, 5 and 15 units at dt = 0.1.
        let forces = [10.0_f32, 50.0, 150.0];
        // right, left, down, up
        let mut blocked = [0_u32; 4];

        for axis in Axis::ORDER {
            let (lanes, start, steps) = match axis {
                Axis::Horizontal => ([16.0_f32, 21.3, 36.0], 168.0_f32, 171),
                Axis::Vertical => ([168.0_f32, 190.6, 228.0], 16.0_f32, 57),
            };
            for lane in lanes {
                for i in 0..=steps {
                    let along = start + i as f32 * 0.35;
                    for sign in [1.0_f32, -1.0] {
                        for magnitude in forces {
                            let mut collider = match axis {
                                Axis::Horizontal => Collider::new(along, lane, 12.0, 20.0),
                                Axis::Vertical => Collider::new(lane, along, 12.0, 20.0),
                            };
                            assert!(!solid_overlap(&world, &collider), "start {collider:?}");

                            let mut force = sign * magnitude;
                            let result =
                                resolve_axis_move(&world, &mut collider, &mut force, axis, 0.1);
                            if !result.blocked {
                                continue;
                            }

                            let slot = match (axis, sign > 0.0) {
                                (Axis::Horizontal, true) => 0,
                                (Axis::Horizontal, false) => 1,
                                (Axis::Vertical, true) => 2,
                                (Axis::Vertical, false) => 3,
                            };
                            blocked[slot] += 1;
                            assert_eq!(force, 0.0);
                            assert!(
                                !solid_overlap(&world, &collider),
                                "{axis:?} from {along} with force {} ended at {collider:?}",
                                sign * magnitude
                            );
                        }
                    }
                }
            }
        }

        assert!(blocked.iter().all(|&count| count > 0), "{blocked:?}");
    }

    #[test]
    fn test_outside_world_is_open() {
        let world = WorldManager::new(WorldConfig::default()).expect("valid");
        let mut collider = Collider::new(1000.0, -100.0, 16.0, 32.0);
        let mut force = 60.0;
        let result = resolve_axis_move(&world, &mut collider, &mut force, Axis::Vertical, 0.5);
        assert!(!result.blocked);
        assert_eq!(collider.y, -70.0);
    }
}
