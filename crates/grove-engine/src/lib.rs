pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod util;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::config::{CollisionConfig, EngineConfig, MapConfig, ObjectConfig, ViewportConfig};
pub use api::error::SceneError;
pub use api::types::{EntityId, RenderOptions};
pub use components::bounds::{Drawable, HasBounds};
pub use components::entity::Entity;
pub use components::kind::{EntityKind, GateState, NpcState, TreeState};
pub use components::layer::DrawLayer;
pub use core::geometry::{Circle, Rect};
pub use core::map_file::{MapFile, ObjectRecord};
pub use core::scene::{Scene, SceneStats};
pub use renderer::camera::{Camera, TileRange};
pub use renderer::instance::{DrawCommand, DrawList};
pub use systems::collision::{
    check_aabb, check_movement_collision, check_multiple, clamp_to_bounds, collision_side,
    get_overlap, resolve_collision, CollisionSide,
};
pub use systems::draw_order::{
    organize_layers, sort_for_draw, sort_for_draw_range, split_around, visible_in, DrawPlan,
};
pub use systems::movement::{move_with_collision, move_with_grid, MoveOutcome};
pub use systems::render::build_draw_list;
pub use systems::spatial_grid::{CellKey, SpatialGrid};
