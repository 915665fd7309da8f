use std::collections::BTreeMap;

use glam::Vec2;

use crate::api::config::{CollisionConfig, MapConfig, ObjectConfig};
use crate::api::error::SceneError;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::kind::EntityKind;
use crate::core::geometry::Rect;
use crate::core::map_file::{MapFile, ObjectRecord};
use crate::systems::collision::check_aabb;
use crate::systems::movement::{move_with_grid, MoveOutcome};
use crate::systems::spatial_grid::SpatialGrid;
use crate::util::rng::Rng;

const FIRST_ID: u32 = 1;
const TAG_SEED: u64 = 42;

/// Summary counts over the scene, for the editor status bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub collidable: usize,
    pub interactable: usize,
    /// Lowest and highest z-index, or `None` for an empty scene.
    pub z_range: Option<(i32, i32)>,
}

/// Entity storage using a flat Vec in insertion order.
/// Designed for small-to-medium entity counts (hundreds, not millions).
///
/// Ids and non-empty tags are unique. Iteration order is insertion order and
/// survives removals, so draw-order ties stay stable across frames.
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u32,
    tag_rng: Rng,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            next_id: FIRST_ID,
            tag_rng: Rng::new(TAG_SEED),
        }
    }

    /// Reserve a fresh entity id.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity. Fails if its id, or its non-empty tag, is already taken.
    pub fn add(&mut self, entity: Entity) -> Result<EntityId, SceneError> {
        if self.get(entity.id).is_some() {
            log::warn!("rejected entity {}: id already in scene", entity.id);
            return Err(SceneError::DuplicateId(entity.id));
        }
        if !entity.tag.is_empty() && self.find_by_tag(&entity.tag).is_some() {
            log::warn!("rejected entity {}: tag `{}` already in scene", entity.id, entity.tag);
            return Err(SceneError::DuplicateTag(entity.tag));
        }
        let id = entity.id;
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.entities.push(entity);
        Ok(id)
    }

    /// Remove an entity by id, keeping the order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity, SceneError> {
        match self.entities.iter().position(|e| e.id == id) {
            Some(idx) => Ok(self.entities.remove(idx)),
            None => {
                log::warn!("cannot remove entity {}: not found", id);
                Err(SceneError::NotFound(id))
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// All entities of the given object type.
    pub fn by_type(&self, type_name: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.type_name == type_name).collect()
    }

    /// Entities under a world point (edges inclusive), e.g. for clicks.
    pub fn at_position(&self, x: f32, y: f32) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.contains_point(x, y)).collect()
    }

    /// Entities touching `area` (edges inclusive), e.g. for box selection.
    pub fn in_area(&self, area: &Rect) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.bounds.touches(area)).collect()
    }

    /// Collidable entities strictly overlapping `bounds`.
    pub fn check_collisions(&self, bounds: &Rect) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.collidable && check_aabb(bounds, &e.bounds))
            .collect()
    }

    /// Interactable entities within reach of `bounds`.
    /// `range` applies to kinds without their own reach.
    pub fn interactable_near(&self, bounds: &Rect, range: f32) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.interactable && e.in_interaction_range(bounds, range))
            .collect()
    }

    /// Broad-phase grid over the collidable entities, valid until the next mutation.
    pub fn collision_grid(&self, cell_size: f32) -> SpatialGrid<'_, Entity> {
        SpatialGrid::build_filtered(&self.entities, cell_size, |e| e.collidable)
    }

    /// Move a stored entity by `delta` against the other collidable entities.
    pub fn move_entity(
        &mut self,
        id: EntityId,
        delta: Vec2,
        config: &CollisionConfig,
        world: Option<&Rect>,
    ) -> Result<MoveOutcome, SceneError> {
        let mover = self.get(id).ok_or(SceneError::NotFound(id))?.bounds;
        let outcome = {
            let grid = SpatialGrid::build_filtered(&self.entities, config.cell_size, |e| {
                e.collidable && e.id != id
            });
            move_with_grid(&mover, delta, &grid, config, world)
        };
        if let Some(entity) = self.get_mut(id) {
            entity.set_pos(outcome.position);
        }
        Ok(outcome)
    }

    /// Advance every entity by `dt_ms`. Returns the number of trees that fell.
    pub fn update(&mut self, dt_ms: f32) -> usize {
        let mut felled = 0;
        for entity in &mut self.entities {
            felled += entity.update(dt_ms) as usize;
        }
        felled
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// The entities as a slice, in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity and restart id and tag generation.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = FIRST_ID;
        self.tag_rng = Rng::new(TAG_SEED);
    }

    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats {
            total: self.entities.len(),
            ..SceneStats::default()
        };
        for entity in &self.entities {
            *stats.by_type.entry(entity.type_name.clone()).or_default() += 1;
            stats.collidable += entity.collidable as usize;
            stats.interactable += entity.interactable as usize;
            let z = entity.z_index;
            stats.z_range = Some(match stats.z_range {
                Some((min, max)) => (min.min(z), max.max(z)),
                None => (z, z),
            });
        }
        stats
    }

    /// Replace the scene contents with a saved map. Returns the number of
    /// entities loaded.
    ///
    /// Records without an id get a generated `obj_` tag; records repeating a
    /// tag already loaded are skipped. On a parse error the scene is left
    /// untouched.
    pub fn load_from_json(&mut self, json: &str, defaults: &ObjectConfig) -> Result<usize, SceneError> {
        let file = MapFile::from_json(json)?;
        self.clear();

        let mut trees = 0;
        for record in &file.objects {
            let id = self.next_id();
            let mut entity = record.to_entity(id, defaults);
            if entity.tag.is_empty() {
                entity.tag = self.generate_tag();
            }
            if matches!(entity.kind, EntityKind::Tree(_)) {
                trees += 1;
            }
            match self.add(entity) {
                Ok(_) => {}
                // logged by add()
                Err(SceneError::DuplicateTag(_)) => {}
                Err(err) => return Err(err),
            }
        }

        log::info!(
            "loaded {} objects from map v{} ({} interactive trees)",
            self.entities.len(),
            file.version,
            trees
        );
        Ok(self.entities.len())
    }

    pub fn to_map_file(&self, map: &MapConfig) -> MapFile {
        MapFile::new(map, self.entities.iter().map(ObjectRecord::from_entity).collect())
    }

    /// Serialize the scene in the editor's map format.
    pub fn save_to_json(&self, map: &MapConfig) -> Result<String, SceneError> {
        let json = self.to_map_file(map).to_json()?;
        log::info!("saved {} objects", self.entities.len());
        Ok(json)
    }

    fn generate_tag(&mut self) -> String {
        loop {
            let tag = format!("obj_{:08x}{:08x}", self.tag_rng.next_u32(), self.tag_rng.next_u32());
            if self.find_by_tag(&tag).is_none() {
                return tag;
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
