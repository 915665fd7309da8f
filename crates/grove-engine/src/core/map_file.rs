//! Saved map format, shared with the map editor.
//!
//! ```json
//! { "version": "1.0", "mapSize": { "width": 100, "height": 70 },
//!   "objectCount": 1,
//!   "objects": [{ "id": "house_1", "type": "house", "spritePath": "...",
//!                 "x": 96, "y": 64, "width": 128, "height": 96,
//!                 "zIndex": 60, "collidable": true, "interactable": false,
//!                 "metadata": {} }] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::config::{MapConfig, ObjectConfig};
use crate::api::error::SceneError;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::kind::{EntityKind, GateState, NpcState, TreeState};
use crate::core::geometry::Rect;

pub const MAP_VERSION: &str = "1.0";

const DEFAULT_SIZE: f32 = 32.0;

/// A whole saved map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub map_size: MapSize,
    #[serde(default)]
    pub object_count: usize,
    pub objects: Vec<ObjectRecord>,
}

/// Map dimensions in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl Default for MapSize {
    fn default() -> Self {
        let map = MapConfig::default();
        Self {
            width: map.width_tiles,
            height: map.height_tiles,
        }
    }
}

/// One placed object. Missing fields take the editor's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "default_type")]
    pub type_name: String,
    #[serde(default)]
    pub sprite_path: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_size")]
    pub width: f32,
    #[serde(default = "default_size")]
    pub height: f32,
    /// Falls back to `ObjectConfig::default_z_index` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub collidable: bool,
    #[serde(default)]
    pub interactable: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Only written for interactive trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stump_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_chopped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chop_progress: Option<f32>,
}

fn default_version() -> String {
    MAP_VERSION.to_string()
}

fn default_type() -> String {
    "object".to_string()
}

fn default_size() -> f32 {
    DEFAULT_SIZE
}

// Zero, negative and NaN sizes from hand-edited files become the default.
fn sanitize_size(value: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        DEFAULT_SIZE
    }
}

impl MapFile {
    /// Parse and version-check a map document.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let file: MapFile = serde_json::from_str(json).map_err(SceneError::InvalidMap)?;
        if !file.version.starts_with("1.") {
            return Err(SceneError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(SceneError::InvalidMap)
    }

    /// A map document for `objects`, with `objectCount` filled in.
    pub fn new(map: &MapConfig, objects: Vec<ObjectRecord>) -> Self {
        Self {
            version: default_version(),
            map_size: MapSize {
                width: map.width_tiles,
                height: map.height_tiles,
            },
            object_count: objects.len(),
            objects,
        }
    }
}

impl ObjectRecord {
    /// Whether this record loads as a choppable tree.
    pub fn is_interactive_tree(&self) -> bool {
        self.type_name == "tree0" && self.stump_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    fn kind(&self) -> EntityKind {
        if self.type_name.starts_with("npc") {
            let animation = self.metadata.get("animation");
            let field = |name: &str| animation.and_then(|a| a.get(name)).and_then(Value::as_f64);
            let frame_count = field("frameCount").filter(|n| *n >= 1.0).unwrap_or(8.0) as u32;
            let frame_time = field("frameTime").filter(|t| *t > 0.0).unwrap_or(100.0) as f32;
            EntityKind::Npc(NpcState::new(frame_count, frame_time))
        } else if self.is_interactive_tree() {
            let mut tree = TreeState::new(self.stump_path.clone().unwrap_or_default());
            if self.is_chopped.unwrap_or(false) {
                tree.chopped = true;
                tree.progress = 1.0;
            } else if let Some(progress) = self.chop_progress.filter(|p| p.is_finite()) {
                tree.progress = progress.clamp(0.0, 1.0);
            }
            EntityKind::Tree(tree)
        } else if self.type_name == "gate" {
            let required_wood = self
                .metadata
                .get("requiredWood")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32;
            EntityKind::Gate(GateState::new(required_wood))
        } else {
            EntityKind::Prop
        }
    }

    /// Build the runtime entity for this record.
    pub fn to_entity(&self, id: EntityId, defaults: &ObjectConfig) -> Entity {
        let bounds = Rect::new(
            self.x,
            self.y,
            sanitize_size(self.width),
            sanitize_size(self.height),
        );
        let mut entity = Entity::new(id)
            .with_tag(self.id.clone())
            .with_type(self.type_name.clone())
            .with_kind(self.kind())
            .with_bounds(bounds)
            .with_z_index(self.z_index.unwrap_or(defaults.default_z_index))
            .with_collidable(self.collidable)
            .with_interactable(self.interactable)
            .with_sprite(self.sprite_path.clone());
        entity.metadata = self.metadata.clone();
        if matches!(&entity.kind, EntityKind::Tree(tree) if tree.chopped) {
            // stumps never block or offer interaction
            entity.collidable = false;
            entity.interactable = false;
        }
        entity
    }

    pub fn from_entity(entity: &Entity) -> Self {
        let (stump_path, is_chopped, chop_progress) = match &entity.kind {
            EntityKind::Tree(tree) => (
                Some(tree.stump_path.clone()),
                Some(tree.chopped),
                Some(tree.progress),
            ),
            _ => (None, None, None),
        };
        Self {
            id: entity.tag.clone(),
            type_name: entity.type_name.clone(),
            sprite_path: entity.sprite_path.clone(),
            x: entity.bounds.x,
            y: entity.bounds.y,
            width: entity.bounds.width,
            height: entity.bounds.height,
            z_index: Some(entity.z_index),
            collidable: entity.collidable,
            interactable: entity.interactable,
            metadata: entity.metadata.clone(),
            stump_path,
            is_chopped,
            chop_progress,
        }
    }
}
