//! Frame-step movement against collidable scenery.
//!
//! Broad phase through a [`SpatialGrid`], narrow phase with strict AABB, then
//! either push the mover out or reject the move, and keep it inside the world.

use glam::Vec2;

use crate::api::config::CollisionConfig;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::geometry::Rect;
use crate::systems::collision::{check_aabb, clamp_to_bounds, resolve_collision};
use crate::systems::spatial_grid::SpatialGrid;

/// Result of one movement step.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    /// Final top-left position of the mover.
    pub position: Vec2,
    /// The requested move was altered or rejected by a collision.
    pub blocked: bool,
    /// Obstacles the requested position overlapped, in scene order.
    pub contacts: Vec<EntityId>,
}

/// Move `mover` by `delta`, building a grid over the collidable obstacles.
///
/// Prefer [`move_with_grid`] when several movers step against the same scene
/// in one frame.
pub fn move_with_collision(
    mover: &Rect,
    delta: Vec2,
    obstacles: &[Entity],
    config: &CollisionConfig,
    world: Option<&Rect>,
) -> MoveOutcome {
    let grid = SpatialGrid::build_filtered(obstacles, config.cell_size, |e| e.collidable);
    move_with_grid(mover, delta, &grid, config, world)
}

/// Move `mover` by `delta` against a grid built this frame.
///
/// With `push_out` the mover is resolved out of each contact in turn; if that
/// still leaves it inside an obstacle it stays where it was. Without
/// `push_out` any contact rejects the move. The result is always clamped to
/// `world` when given.
pub fn move_with_grid(
    mover: &Rect,
    delta: Vec2,
    grid: &SpatialGrid<'_, Entity>,
    config: &CollisionConfig,
    world: Option<&Rect>,
) -> MoveOutcome {
    let clamp = |rect: Rect| match world {
        Some(bounds) => clamp_to_bounds(&rect, bounds),
        None => rect.pos(),
    };

    if delta == Vec2::ZERO {
        return MoveOutcome {
            position: clamp(*mover),
            blocked: false,
            contacts: Vec::new(),
        };
    }

    let target = mover.translated(delta);
    if !config.enabled {
        return MoveOutcome {
            position: clamp(target),
            blocked: false,
            contacts: Vec::new(),
        };
    }

    let hits: Vec<&Entity> = grid
        .query(&target)
        .into_iter()
        .filter(|e| e.collidable && check_aabb(&target, &e.bounds))
        .collect();

    if hits.is_empty() {
        return MoveOutcome {
            position: clamp(target),
            blocked: false,
            contacts: Vec::new(),
        };
    }

    let contacts: Vec<EntityId> = hits.iter().map(|e| e.id).collect();
    log::debug!("move {:?} by {:?} hit {:?}", mover.pos(), delta, contacts);

    let resolved = if config.push_out {
        let mut rect = target;
        for hit in &hits {
            rect = rect.with_pos(resolve_collision(&rect, &hit.bounds));
        }
        let still_inside = grid
            .query(&rect)
            .into_iter()
            .any(|e| e.collidable && check_aabb(&rect, &e.bounds));
        if still_inside {
            *mover
        } else {
            rect
        }
    } else {
        *mover
    };

    MoveOutcome {
        position: clamp(resolved),
        blocked: true,
        contacts,
    }
}
