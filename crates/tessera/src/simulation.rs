//! # Simulation
//!
//! The explicit game context. Owns the world, the player, dropped items,
//! the camera and the input state; nothing is global.
//!
//! ## Frame Contract
//!
//! ```text
//! handle_input(source)   once per frame: poll, zoom, selections, mine/place edges
//! step(dt)               zero or more fixed steps: player, camera, streaming, items
//! ```
//!
//! Press edges (jump, mine, place) fire once per physical press. A jump
//! pressed during a frame with no fixed step is kept for the next step.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera_economy::ItemKind;
use tessera_procedural::{AutotileTable, BlockType, WorldManager};
use tessera_shared::Vec2;
use tessera_ui::{Action, FloatingText, FloatingTexts, InputBindings, InputSource, InputState};
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{EventBus, EventReceiver, EventSender, GameEvent};
use crate::item::{Item, ItemState};
use crate::player::{MoveIntent, Player, StepReport};

/// Callback receiving the full inventory after every change.
pub type InventoryListener = Box<dyn FnMut(&BTreeMap<ItemKind, u32>)>;

/// The game context.
pub struct Simulation {
    config: GameConfig,
    world: WorldManager,
    autotile: AutotileTable,
    player: Player,
    items: Vec<Item>,
    camera: Camera,
    input: InputState,
    bindings: InputBindings,
    rng: ChaCha8Rng,
    bus: EventBus,
    sender: EventSender,
    floating_texts: FloatingTexts,
    inventory_listener: Option<InventoryListener>,
    pending_jump: bool,
    steps: u64,
}

impl Simulation {
    /// Builds a simulation from a configuration.
    ///
    /// With streaming enabled only the chunks around the spawn view are
    /// generated; otherwise the whole world is materialized.
    ///
    /// # Errors
    ///
    /// - `GameError::Config` if the configuration fails validation
    /// - `GameError::World` if the world cannot be built
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;

        let world = WorldManager::new(config.world.clone())?;
        let inventory = config.player.starting_inventory()?;
        let player = Player::new(&config.player, inventory);
        let mut camera = Camera::new(&config.camera);
        camera.follow(player.collider());

        let bus = EventBus::new(config.simulation.event_capacity);
        let sender = bus.sender();

        let mut simulation = Self {
            rng: ChaCha8Rng::seed_from_u64(config.simulation.seed),
            world,
            autotile: AutotileTable::REFERENCE,
            player,
            items: Vec::new(),
            camera,
            input: InputState::new(),
            bindings: InputBindings::standard(),
            bus,
            sender,
            floating_texts: FloatingTexts::new(),
            inventory_listener: None,
            pending_jump: false,
            steps: 0,
            config,
        };

        if simulation.config.world.streaming.enabled {
            simulation.stream();
        } else {
            simulation.world.materialize_all();
        }

        info!(
            chunks = simulation.world.loaded_chunk_count(),
            seed = simulation.config.simulation.seed,
            "Simulation ready"
        );
        Ok(simulation)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The chunk cache.
    #[must_use]
    pub const fn world(&self) -> &WorldManager {
        &self.world
    }

    /// The chunk cache, mutable.
    pub fn world_mut(&mut self) -> &mut WorldManager {
        &mut self.world
    }

    /// Autotile lookup used by the draw list.
    #[must_use]
    pub const fn autotile(&self) -> &AutotileTable {
        &self.autotile
    }

    /// Replaces the autotile lookup.
    pub fn set_autotile(&mut self, table: AutotileTable) {
        self.autotile = table;
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutable.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Active dropped items.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The camera, mutable.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Input state of the current frame.
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// Key and button bindings.
    pub fn bindings_mut(&mut self) -> &mut InputBindings {
        &mut self.bindings
    }

    /// New receiver on the event bus.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.bus.receiver()
    }

    /// Live floating texts.
    #[must_use]
    pub const fn floating_texts(&self) -> &FloatingTexts {
        &self.floating_texts
    }

    /// Fixed steps run so far.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.steps
    }

    /// Registers the inventory callback, replacing any previous one.
    pub fn on_inventory_change(&mut self, listener: impl FnMut(&BTreeMap<ItemKind, u32>) + 'static) {
        self.inventory_listener = Some(Box::new(listener));
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Polls the input source and applies this frame's press edges.
    pub fn handle_input(&mut self, source: &mut dyn InputSource) {
        self.input.begin_frame();
        source.poll(&mut self.input);

        let wheel = self.input.scroll_delta();
        if self.camera.on_wheel(wheel) {
            self.zoom_changed();
        }

        for action in self.bindings.pressed(&self.input) {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Jump => self.pending_jump = true,
            Action::SelectGrass => {
                self.player.select_block(BlockType::Grass);
            }
            Action::SelectDirt => {
                self.player.select_block(BlockType::Dirt);
            }
            Action::SelectWood => {
                self.player.select_block(BlockType::Wood);
            }
            Action::ZoomIn => {
                if self.camera.zoom_in() {
                    self.zoom_changed();
                }
            }
            Action::ZoomOut => {
                if self.camera.zoom_out() {
                    self.zoom_changed();
                }
            }
            Action::Mine => {
                self.mine_at(self.cursor_world());
            }
            Action::Place => {
                self.place_at(self.cursor_world());
            }
            Action::MoveLeft | Action::MoveRight => {}
        }
    }

    fn zoom_changed(&mut self) {
        let zoom = self.camera.zoom();
        debug!(zoom, "Zoom changed");
        self.emit(GameEvent::ZoomChanged { zoom });
    }

    /// World point under the cursor.
    #[must_use]
    pub fn cursor_world(&self) -> Vec2 {
        self.camera
            .screen_to_world(Vec2::new(self.input.mouse_x, self.input.mouse_y))
    }

    // =========================================================================
    // STEP
    // =========================================================================

    /// Runs one fixed step.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let intent = MoveIntent {
            left: self.bindings.held(&self.input, Action::MoveLeft),
            right: self.bindings.held(&self.input, Action::MoveRight),
            jump: std::mem::take(&mut self.pending_jump),
        };

        let report = self.player.step(&self.world, intent, dt);
        self.camera.follow(self.player.collider());
        self.stream();
        self.update_items(dt);
        self.floating_texts.update(dt);
        self.steps += 1;
        report
    }

    fn stream(&mut self) {
        let report = self.world.update(&self.camera.view_rect());
        for coord in report.loaded {
            self.emit(GameEvent::ChunkLoaded { coord });
        }
        for coord in report.evicted {
            self.emit(GameEvent::ChunkEvicted { coord });
        }
    }

    fn update_items(&mut self, dt: f32) {
        let world = &self.world;
        let tuning = &self.config.items;
        let target = self.player.midpoint();

        let mut collected = Vec::new();
        self.items.retain_mut(|item| {
            let center = item.collider().center();
            if !world.is_loaded_at_world_point(center.x, center.y) {
                return true;
            }
            if item.update(world, target, tuning, dt) == ItemState::Collected {
                collected.push(item.clone());
                return false;
            }
            true
        });

        for item in collected {
            self.collect(&item);
        }
    }

    fn collect(&mut self, item: &Item) {
        let kind = item.kind();
        self.player.inventory_mut().add(kind, 1);

        let position = item.collider().position();
        let screen = self.camera.world_to_screen(position);
        self.floating_texts
            .spawn(FloatingText::new(format!("+1 {}", kind.name()), screen.x, screen.y));

        let center = item.collider().center();
        debug!(%kind, x = center.x, y = center.y, "Item collected");
        self.emit(GameEvent::ItemCollected {
            kind,
            x: center.x,
            y: center.y,
        });
        self.inventory_changed();
    }

    fn inventory_changed(&mut self) {
        let contents = self.player.inventory().contents().clone();
        if let Some(listener) = self.inventory_listener.as_mut() {
            listener(&contents);
        }
        self.emit(GameEvent::InventoryChanged { contents });
    }

    fn emit(&self, event: GameEvent) {
        self.sender.send(event);
    }

    // =========================================================================
    // INTERACTION
    // =========================================================================

    /// Adds a dropped item centred on `center`.
    pub fn spawn_item(&mut self, kind: ItemKind, center: Vec2) {
        let size = self.world.block_size() * self.config.items.size_factor;
        self.items.push(Item::new(kind, center, size));
        self.emit(GameEvent::ItemSpawned {
            kind,
            x: center.x,
            y: center.y,
        });
    }

    /// True if a click at `point` would mine a block.
    #[must_use]
    pub fn can_mine_at(&self, point: Vec2) -> bool {
        self.world
            .block_at_world_point(point.x, point.y)
            .is_some_and(|block| block.is_solid())
            && self.player.within_reach(point)
    }

    /// Mines the block under `point`.
    ///
    /// Returns the mined type, or `None` if the point is out of reach or
    /// over an empty or unloaded cell.
    pub fn mine_at(&mut self, point: Vec2) -> Option<BlockType> {
        if !self.can_mine_at(point) {
            return None;
        }
        let block = *self.world.block_at_world_point(point.x, point.y)?;
        let kind = block.kind();

        let jitter = self.config.items.spawn_jitter;
        let offset = if jitter > 0.0 {
            self.rng.gen_range(-jitter..jitter)
        } else {
            0.0
        };
        let center = block.collider().center();

        self.world
            .set_block_type(block.grid_x(), block.grid_y(), BlockType::Empty)?;
        debug!(x = block.grid_x(), y = block.grid_y(), %kind, "Block mined");
        self.emit(GameEvent::BlockMined {
            x: block.grid_x(),
            y: block.grid_y(),
            kind,
        });
        self.spawn_item(ItemKind::Block(kind), Vec2::new(center.x + offset, center.y));
        Some(kind)
    }

    /// Places the selected block under `point`.
    ///
    /// The cell must be loaded, empty, in reach and clear of the player,
    /// and the inventory must give up one unit before the world changes.
    pub fn place_at(&mut self, point: Vec2) -> bool {
        let Some(block) = self.world.block_at_world_point(point.x, point.y).copied() else {
            return false;
        };
        if block.is_solid()
            || !self.player.within_reach(point)
            || block.collider().intersects(self.player.collider())
        {
            return false;
        }

        let kind = self.player.selected_block();
        if !self.player.inventory_mut().remove(ItemKind::Block(kind), 1) {
            debug!(%kind, "Placement rejected: none in inventory");
            return false;
        }

        if self
            .world
            .set_block_type(block.grid_x(), block.grid_y(), kind)
            .is_none()
        {
            self.player.inventory_mut().add(ItemKind::Block(kind), 1);
            warn!(x = block.grid_x(), y = block.grid_y(), %kind, "Placement target not loaded");
            return false;
        }
        debug!(x = block.grid_x(), y = block.grid_y(), %kind, "Block placed");
        self.emit(GameEvent::BlockPlaced {
            x: block.grid_x(),
            y: block.grid_y(),
            kind,
        });
        self.inventory_changed();
        true
    }
}
