use grove_engine::glam::Vec2;
use grove_engine::systems::draw_order::{sort_for_draw, split_around};
use grove_engine::{
    build_draw_list, move_with_collision, Camera, DrawList, EngineConfig, Entity, EntityId,
    EntityKind, MoveOutcome, RenderOptions, Rect, Scene, SceneError,
};

/// Handle reserved for the player. Scene ids start at 1.
pub const PLAYER_ID: EntityId = EntityId(0);

/// Owns the world state behind the wasm exports.
///
/// The browser drives it once per animation frame: move the player, `tick`,
/// then `build_draw_list` and read the command buffer out of wasm memory.
/// The player lives outside the scene so it never collides with itself.
pub struct WorldRunner {
    config: EngineConfig,
    scene: Scene,
    player: Option<Entity>,
    camera: Camera,
    draw_list: DrawList,
    /// Tree currently being chopped.
    chopping: Option<EntityId>,
    /// One per felled tree.
    wood: u32,
}

impl WorldRunner {
    pub fn new(config: EngineConfig) -> Self {
        let camera = Camera::for_map(&config.map, &config.viewport);
        Self {
            config,
            scene: Scene::new(),
            player: None,
            camera,
            draw_list: DrawList::new(),
            chopping: None,
            wood: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Replace the scene with a saved map. Returns the number of objects loaded.
    pub fn load_map(&mut self, json: &str) -> Result<usize, SceneError> {
        let loaded = self.scene.load_from_json(json, &self.config.objects)?;
        self.chopping = None;
        Ok(loaded)
    }

    pub fn save_map(&self) -> Result<String, SceneError> {
        self.scene.save_to_json(&self.config.map)
    }

    /// Place (or replace) the player and centre the camera on it.
    pub fn spawn_player(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let bounds = Rect::new(x, y, width.max(0.0), height.max(0.0));
        let player = Entity::player(PLAYER_ID, bounds, self.config.objects.player_z_index);
        let center = player.bounds.center();
        self.camera.look_at(center.x, center.y);
        self.player = Some(player);
        log::info!("player spawned at ({}, {})", x, y);
    }

    /// Step the player by `(dx, dy)` against the scene's collidable objects.
    /// Returns `None` when no player has been spawned.
    pub fn move_player(&mut self, dx: f32, dy: f32) -> Option<MoveOutcome> {
        let player = self.player.as_mut()?;
        let world = self.config.map.world_bounds();
        let outcome = move_with_collision(
            &player.bounds,
            Vec2::new(dx, dy),
            self.scene.entities(),
            &self.config.collision,
            Some(&world),
        );
        player.set_pos(outcome.position);
        Some(outcome)
    }

    pub fn player_pos(&self) -> Option<Vec2> {
        self.player.as_ref().map(Entity::pos)
    }

    pub fn wood(&self) -> u32 {
        self.wood
    }

    /// Start chopping the nearest unchopped tree in reach of the player.
    /// Returns false when there is none.
    pub fn start_chop(&mut self) -> bool {
        let Some(player) = &self.player else {
            return false;
        };
        let target = self
            .scene
            .interactable_near(&player.bounds, self.config.objects.interaction_range)
            .into_iter()
            .filter(|e| matches!(&e.kind, EntityKind::Tree(tree) if !tree.chopped))
            .min_by(|a, b| {
                let da = a.bounds.distance_between_centers(&player.bounds);
                let db = b.bounds.distance_between_centers(&player.bounds);
                da.total_cmp(&db)
            })
            .map(|e| e.id);
        let Some(id) = target else {
            return false;
        };

        if self.chopping != Some(id) {
            self.stop_chop();
        }
        if let Some(EntityKind::Tree(tree)) = self.scene.get_mut(id).map(|e| &mut e.kind) {
            tree.start_chopping();
        }
        self.chopping = Some(id);
        log::debug!("chopping tree {}", id);
        true
    }

    /// Release the chop button.
    pub fn stop_chop(&mut self) {
        let Some(id) = self.chopping.take() else {
            return;
        };
        if let Some(EntityKind::Tree(tree)) = self.scene.get_mut(id).map(|e| &mut e.kind) {
            tree.stop_chopping();
        }
    }

    /// Whether a gate is in reach and enough wood has been gathered to pass.
    pub fn gate_ready(&self) -> bool {
        let Some(player) = &self.player else {
            return false;
        };
        self.scene
            .interactable_near(&player.bounds, self.config.objects.interaction_range)
            .into_iter()
            .any(|e| matches!(&e.kind, EntityKind::Gate(gate) if gate.can_pass(self.wood)))
    }

    /// Advance animations and chopping, then let the camera follow the player.
    pub fn tick(&mut self, dt_ms: f32) {
        let felled = self.scene.update(dt_ms);
        if felled > 0 {
            self.wood += felled as u32;
            log::info!("wood: {}", self.wood);
        }
        if let Some(id) = self.chopping {
            let done = !matches!(
                self.scene.get(id).map(|e| &e.kind),
                Some(EntityKind::Tree(tree)) if tree.chopping
            );
            if done {
                self.chopping = None;
            }
        }
        if let Some(player) = &self.player {
            let center = player.bounds.center();
            self.camera.follow(center.x, center.y, dt_ms);
        }
    }

    /// Rebuild the draw list for the current frame.
    pub fn build_draw_list(&mut self, options: RenderOptions) {
        let entities = self.scene.entities();
        match &self.player {
            Some(player) => {
                let plan = split_around(entities, player);
                build_draw_list(plan.iter(), &self.camera, options, &mut self.draw_list);
            }
            None => {
                build_draw_list(sort_for_draw(entities), &self.camera, options, &mut self.draw_list);
            }
        }
    }

    /// Interactable objects within reach of the player.
    pub fn interactable_count(&self) -> u32 {
        match &self.player {
            Some(player) => self
                .scene
                .interactable_near(&player.bounds, self.config.objects.interaction_range)
                .len() as u32,
            None => 0,
        }
    }

    // ---- Pointer accessors for wasm memory reads ----

    pub fn draw_commands_ptr(&self) -> *const u32 {
        self.draw_list.commands_ptr()
    }

    pub fn draw_command_count(&self) -> u32 {
        self.draw_list.len() as u32
    }
}

impl Default for WorldRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
