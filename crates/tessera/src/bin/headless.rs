//! Headless session runner.
//!
//! Plays a scripted session without a window: fall to the ground, walk
//! right, jump, mine the block under the feet, pick it up and put it back.
//!
//! ```text
//! tessera_headless [config.toml]
//! RUST_LOG=debug tessera_headless
//! ```

use tessera::ui::{inventory_lines, InputEvent, Key, MouseButton, ScriptedInput};
use tessera::{build_draw_list, GameConfig, GameEvent, GameLoop, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_DELTA: f32 = 1.0 / 60.0;

fn key_down(key: Key) -> InputEvent {
    InputEvent::KeyDown { key, repeat: false }
}

fn script(config: &GameConfig) -> ScriptedInput {
    // The camera keeps the player's midpoint at the horizontal centre and
    // its top edge at the vertical centre of the viewport.
    let zoom = config.camera.zoom;
    let feet_x = config.camera.viewport_width / 2.0;
    let feet_y = config.camera.viewport_height / 2.0
        + (config.player.height + config.world.block_size / 2.0) * zoom;

    ScriptedInput::new()
        .idle(180)
        .then([key_down(Key::D)])
        .idle(45)
        .then([key_down(Key::Space)])
        .idle(15)
        .then([InputEvent::KeyUp(Key::D)])
        .idle(120)
        .then([
            InputEvent::MouseMove {
                x: feet_x,
                y: feet_y,
            },
            InputEvent::ButtonDown(MouseButton::Left),
        ])
        .then([InputEvent::ButtonUp(MouseButton::Left)])
        .idle(60)
        .then([key_down(Key::Num1)])
        .then([InputEvent::ButtonDown(MouseButton::Right)])
        .then([InputEvent::ButtonUp(MouseButton::Right)])
        .idle(10)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "Loading config");
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    let mut input = script(&config);
    let mut simulation = Simulation::new(config)?;
    simulation.on_inventory_change(|contents| {
        info!(inventory = ?inventory_lines(contents), "Inventory changed");
    });
    let events = simulation.events();

    let mut game = GameLoop::new(simulation);
    game.start()?;
    while input.remaining() > 0 {
        game.frame(&mut input, FRAME_DELTA)?;

        for event in events.drain() {
            match event {
                GameEvent::BlockMined { x, y, kind } => info!(x, y, %kind, "Mined"),
                GameEvent::BlockPlaced { x, y, kind } => info!(x, y, %kind, "Placed"),
                GameEvent::ItemCollected { kind, .. } => info!(%kind, "Collected"),
                GameEvent::ChunkLoaded { coord } => info!(%coord, "Chunk loaded"),
                GameEvent::ChunkEvicted { coord } => info!(%coord, "Chunk evicted"),
                _ => {}
            }
        }
    }
    game.stop()?;

    let simulation = game.simulation();
    let player = simulation.player().position();
    info!(
        x = player.x,
        y = player.y,
        steps = simulation.step_count(),
        chunks = simulation.world().loaded_chunk_count(),
        draw_commands = build_draw_list(simulation).len(),
        "Session finished"
    );
    Ok(())
}
