use serde::{Deserialize, Serialize};

use crate::api::error::SceneError;
use crate::core::geometry::Rect;

/// Engine configuration, provided by the host page as JSON.
/// Every field has a default, so partial documents are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub map: MapConfig,
    pub objects: ObjectConfig,
    pub collision: CollisionConfig,
    pub viewport: ViewportConfig,
}

impl EngineConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(SceneError::InvalidConfig)
    }
}

/// Tile map dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// World units per tile (default: 16).
    pub tile_size: f32,
    /// Map width in tiles (default: 100).
    pub width_tiles: u32,
    /// Map height in tiles (default: 70).
    pub height_tiles: u32,
}

impl MapConfig {
    /// The whole map as a world-space rectangle.
    pub fn world_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width_tiles as f32 * self.tile_size,
            self.height_tiles as f32 * self.tile_size,
        )
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size: 16.0,
            width_tiles: 100,
            height_tiles: 70,
        }
    }
}

/// Defaults applied to placed objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    /// z-index for objects that don't specify one (default: 50).
    pub default_z_index: i32,
    /// z-index of the player (default: 50).
    pub player_z_index: i32,
    /// Interaction distance between centers (default: 32).
    pub interaction_range: f32,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            default_z_index: 50,
            player_z_index: 50,
            interaction_range: 32.0,
        }
    }
}

/// Collision behaviour for movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// When false, movement is only clamped to the world.
    pub enabled: bool,
    /// Spatial grid cell size in world units (default: 64).
    pub cell_size: f32,
    /// Resolve the mover out of obstacles instead of rejecting the move.
    pub push_out: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: 64.0,
            push_out: true,
        }
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}
