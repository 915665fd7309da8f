use glam::Vec2;
use serde_json::{Map, Value};

use crate::api::types::EntityId;
use crate::components::bounds::{Drawable, HasBounds};
use crate::components::kind::{EntityKind, LARGE_INTERACTION_RANGE};
use crate::core::geometry::Rect;

/// Default z-index for placed objects (the player's layer).
pub const DEFAULT_Z_INDEX: i32 = 50;

/// Fat Entity: one struct for every placed object, with variant state in `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Runtime identifier, unique within a scene.
    pub id: EntityId,
    /// String id from the map file. Empty if the entity was never saved.
    pub tag: String,
    /// Object type name (e.g. "house", "tree0", "npc_elder").
    pub type_name: String,
    pub kind: EntityKind,
    /// Position and size in world space.
    pub bounds: Rect,
    /// Layer ordering: lower draws first.
    pub z_index: i32,
    /// Blocks movement.
    pub collidable: bool,
    /// Can be interacted with when in range.
    pub interactable: bool,
    pub sprite_path: String,
    /// Free-form data carried through map files (names, dialog, ...).
    pub metadata: Map<String, Value>,
}

impl Entity {
    /// Create a 32x32 prop at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            type_name: "object".to_string(),
            kind: EntityKind::Prop,
            bounds: Rect::new(0.0, 0.0, 32.0, 32.0),
            z_index: DEFAULT_Z_INDEX,
            collidable: false,
            interactable: false,
            sprite_path: String::new(),
            metadata: Map::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        debug_assert!(bounds.is_valid(), "negative entity size: {:?}", bounds);
        self.bounds = bounds;
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.bounds = self.bounds.with_pos(pos);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    pub fn with_interactable(mut self, interactable: bool) -> Self {
        self.interactable = interactable;
        self
    }

    pub fn with_sprite(mut self, path: impl Into<String>) -> Self {
        self.sprite_path = path.into();
        self
    }

    /// The player character: drawn on its own layer, never stored as scenery.
    pub fn player(id: EntityId, bounds: Rect, z_index: i32) -> Self {
        Self::new(id)
            .with_type("player")
            .with_kind(EntityKind::Player)
            .with_bounds(bounds)
            .with_z_index(z_index)
    }

    pub fn pos(&self) -> Vec2 {
        self.bounds.pos()
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.bounds = self.bounds.with_pos(pos);
    }

    /// Inclusive point hit-test, for clicks and placement.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Whether `other` is close enough to interact with this entity.
    ///
    /// Trees and gates have their own, larger reach; everything else uses
    /// `default_range`. A chopped tree can no longer be reached.
    pub fn in_interaction_range(&self, other: &Rect, default_range: f32) -> bool {
        let distance = self.bounds.distance_between_centers(other);
        match &self.kind {
            EntityKind::Tree(tree) => !tree.chopped && distance <= LARGE_INTERACTION_RANGE,
            EntityKind::Gate(_) => distance < LARGE_INTERACTION_RANGE,
            _ => distance <= default_range,
        }
    }

    /// Per-frame update, dispatched on the entity kind.
    /// Returns true on the frame a tree is chopped down.
    pub fn update(&mut self, dt_ms: f32) -> bool {
        match &mut self.kind {
            EntityKind::Npc(npc) => npc.update(dt_ms),
            EntityKind::Gate(gate) => gate.update(dt_ms),
            EntityKind::Tree(tree) => {
                if tree.update(dt_ms) {
                    self.collidable = false;
                    self.interactable = false;
                    log::info!("tree {} chopped", self.id);
                    return true;
                }
            }
            EntityKind::Prop | EntityKind::Player => {}
        }
        false
    }
}

impl HasBounds for Entity {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Drawable for Entity {
    fn z_index(&self) -> i32 {
        self.z_index
    }
}
