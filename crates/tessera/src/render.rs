//! # Render Bridge
//!
//! Turns simulation state into a flat list of draw commands in screen
//! pixels. The core never touches a canvas; whatever owns one replays the
//! list in order:
//!
//! 1. solid blocks in view, autotiled, at floored screen coordinates
//! 2. the player as a solid rectangle
//! 3. dropped items, rotated about their centre
//! 4. floating texts

use tessera_economy::ItemKind;
use tessera_procedural::AtlasCell;
use tessera_ui::Color;

use crate::simulation::Simulation;

/// One primitive for the drawing collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Atlas cell from the texture of `texture`.
    Tile {
        /// Whose texture atlas to sample.
        texture: ItemKind,
        /// Cell in that atlas.
        cell: AtlasCell,
        /// Screen left.
        x: f32,
        /// Screen top.
        y: f32,
        /// Screen width.
        width: f32,
        /// Screen height.
        height: f32,
        /// Clockwise rotation about the centre, degrees.
        rotation: f32,
    },
    /// Filled rectangle.
    Rect {
        /// Screen left.
        x: f32,
        /// Screen top.
        y: f32,
        /// Screen width.
        width: f32,
        /// Screen height.
        height: f32,
        /// Fill.
        color: Color,
    },
    /// HUD text.
    Text {
        /// Content.
        text: String,
        /// Screen left.
        x: f32,
        /// Screen top.
        y: f32,
        /// Fill, alpha included.
        color: Color,
    },
}

/// Builds this frame's draw list.
#[must_use]
pub fn build_draw_list(sim: &Simulation) -> Vec<DrawCommand> {
    let world = sim.world();
    let camera = sim.camera();
    let autotile = sim.autotile();
    let block_size = world.block_size();
    let tile_size = camera.scale(block_size);

    let margin = sim.config().render.cull_margin_blocks as f32 * block_size;
    let view = camera.view_rect();

    let mut commands = Vec::new();

    let visible = world.blocks_in_area(
        view.x - margin,
        view.y - margin,
        view.width + margin * 2.0,
        view.height + margin * 2.0,
    );
    for block in visible {
        let Some(cell) = autotile.resolve_block(world, block) else {
            continue;
        };
        let screen = camera.world_to_screen(block.collider().position());
        commands.push(DrawCommand::Tile {
            texture: ItemKind::Block(block.kind()),
            cell,
            x: screen.x.floor(),
            y: screen.y.floor(),
            width: tile_size,
            height: tile_size,
            rotation: 0.0,
        });
    }

    let body = sim.player().collider();
    let screen = camera.world_to_screen(body.position());
    commands.push(DrawCommand::Rect {
        x: screen.x,
        y: screen.y,
        width: camera.scale(body.width),
        height: camera.scale(body.height),
        color: Color::BLACK,
    });

    let rotation = sim.config().render.item_rotation_degrees;
    for item in sim.items() {
        let collider = item.collider();
        let screen = camera.world_to_screen(collider.position());
        commands.push(DrawCommand::Tile {
            texture: item.kind(),
            cell: AtlasCell::ISOLATED,
            x: screen.x,
            y: screen.y,
            width: camera.scale(collider.width),
            height: camera.scale(collider.height),
            rotation,
        });
    }

    for text in sim.floating_texts().iter() {
        commands.push(DrawCommand::Text {
            text: text.text.clone(),
            x: text.x,
            y: text.y,
            color: text.current_color(),
        });
    }

    commands
}
