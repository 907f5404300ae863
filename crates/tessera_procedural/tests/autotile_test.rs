//! # Autotile Integration Test
//!
//! Every neighbor tuple against the reference table, on a real world.

use tessera_procedural::{
    neighbor_mask, AtlasCell, AutotileTable, BlockType, WorldConfig, WorldManager,
};

const EXPECTED: [((bool, bool, bool, bool), (u8, u8)); 16] = [
    ((true, true, true, false), (0, 0)),
    ((false, true, true, true), (1, 0)),
    ((true, false, true, true), (4, 0)),
    ((true, true, false, true), (1, 2)),
    ((true, true, true, true), (1, 1)),
    ((false, true, true, false), (0, 3)),
    ((false, false, true, true), (1, 3)),
    ((true, true, false, false), (0, 4)),
    ((true, false, true, false), (5, 0)),
    ((false, false, true, false), (6, 0)),
    ((true, false, false, false), (6, 3)),
    ((false, true, false, false), (9, 0)),
    ((false, false, false, false), (9, 3)),
    ((false, false, false, true), (12, 0)),
    ((false, true, false, true), (6, 4)),
    ((true, false, false, true), (1, 4)),
];

/// Test: all 16 tuples via the mask.
#[test]
fn test_all_tuples_resolve_per_table() {
    let table = AutotileTable::REFERENCE;
    for ((above, right, below, left), (cx, cy)) in EXPECTED {
        let mask = neighbor_mask(above, right, below, left);
        assert_eq!(
            table.lookup(mask),
            AtlasCell::new(cx, cy),
            "tuple ({above}, {right}, {below}, {left})"
        );
    }
}

/// Test: all 16 tuples built in the sky of a real world.
#[test]
fn test_all_tuples_resolve_in_world() {
    let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
    world.materialize_all();
    let table = AutotileTable::REFERENCE;

    for (i, ((above, right, below, left), (cx, cy))) in EXPECTED.into_iter().enumerate() {
        // Each probe gets its own 3x3 patch high above the terrain.
        let x = 2 + i as i32 * 4;
        let y = 2;
        for dx in -1..=1 {
            for dy in -1..=1 {
                world.set_block_type(x + dx, y + dy, BlockType::Empty);
            }
        }
        world.set_block_type(x, y, BlockType::Dirt);
        let neighbors = [(above, 0, -1), (right, 1, 0), (below, 0, 1), (left, -1, 0)];
        for (occupied, dx, dy) in neighbors {
            if occupied {
                world.set_block_type(x + dx, y + dy, BlockType::Wood);
            }
        }

        assert_eq!(
            table.resolve(&world, x, y),
            Some(AtlasCell::new(cx, cy)),
            "tuple ({above}, {right}, {below}, {left}) at ({x}, {y})"
        );
    }
}

/// Test: a block buried in dirt uses the fully surrounded cell.
#[test]
fn test_fully_surrounded_block() {
    let mut world = WorldManager::new(WorldConfig::default()).expect("valid");
    world.materialize_all();
    assert_eq!(AutotileTable::REFERENCE.resolve(&world, 100, 30), Some(AtlasCell::new(1, 1)));
}
