//! Narrow-phase AABB collision.
//!
//! Pure functions of the current rectangles, with no per-call state.
//! Push-out and side classification share one shallow-axis rule: resolve
//! along the axis of least penetration, preferring X on exact ties.

use glam::Vec2;

use crate::components::bounds::HasBounds;
use crate::core::geometry::Rect;

/// Face of the moving rectangle that made contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Top,
    Bottom,
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

fn shallow_axis(overlap: Vec2) -> Axis {
    if overlap.x <= overlap.y {
        Axis::X
    } else {
        Axis::Y
    }
}

fn well_formed(a: &Rect, b: &Rect) -> bool {
    debug_assert!(a.is_valid(), "negative rect size: {:?}", a);
    debug_assert!(b.is_valid(), "negative rect size: {:?}", b);
    a.is_valid() && b.is_valid()
}

/// Strict AABB overlap; edge contact is not a collision.
pub fn check_aabb(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Penetration depth along each axis, or zero when the rectangles don't overlap.
/// Both components are non-negative.
pub fn get_overlap(a: &Rect, b: &Rect) -> Vec2 {
    if !well_formed(a, b) || !check_aabb(a, b) {
        return Vec2::ZERO;
    }
    Vec2::new(
        (a.right() - b.x).min(b.right() - a.x),
        (a.bottom() - b.y).min(b.bottom() - a.y),
    )
}

/// New top-left position for `moving` after pushing it out of `fixed`.
///
/// The push runs along the shallow axis, toward whichever side of `fixed`
/// the moving rectangle's origin lies on. Non-overlapping input comes back
/// unchanged.
pub fn resolve_collision(moving: &Rect, fixed: &Rect) -> Vec2 {
    let overlap = get_overlap(moving, fixed);
    let mut pos = moving.pos();
    if overlap == Vec2::ZERO {
        return pos;
    }
    match shallow_axis(overlap) {
        Axis::X => {
            pos.x = if moving.x < fixed.x {
                fixed.x - moving.width
            } else {
                fixed.right()
            };
        }
        Axis::Y => {
            pos.y = if moving.y < fixed.y {
                fixed.y - moving.height
            } else {
                fixed.bottom()
            };
        }
    }
    pos
}

/// Which face of `moving` struck `fixed`, using the same rule as
/// [`resolve_collision`].
pub fn collision_side(moving: &Rect, fixed: &Rect) -> CollisionSide {
    let overlap = get_overlap(moving, fixed);
    if overlap == Vec2::ZERO {
        return CollisionSide::None;
    }
    match shallow_axis(overlap) {
        Axis::X if moving.x < fixed.x => CollisionSide::Right,
        Axis::X => CollisionSide::Left,
        Axis::Y if moving.y < fixed.y => CollisionSide::Bottom,
        Axis::Y => CollisionSide::Top,
    }
}

/// Top-left position that keeps `rect` inside `bounds`.
/// On an axis where `rect` is larger than `bounds`, it snaps to the bounds origin.
pub fn clamp_to_bounds(rect: &Rect, bounds: &Rect) -> Vec2 {
    Vec2::new(
        rect.x.min(bounds.right() - rect.width).max(bounds.x),
        rect.y.min(bounds.bottom() - rect.height).max(bounds.y),
    )
}

/// Whether moving from `from` to `to` would pass through `obstacle`.
/// Tests the bounding box of both positions, so it can report false positives
/// on long diagonal moves.
pub fn check_movement_collision(from: &Rect, to: &Rect, obstacle: &Rect) -> bool {
    check_aabb(&Rect::swept(from, to), obstacle)
}

/// Every entity whose bounds strictly overlap `rect`, in input order.
pub fn check_multiple<'a, T, I>(rect: &Rect, entities: I) -> Vec<&'a T>
where
    T: HasBounds + 'a,
    I: IntoIterator<Item = &'a T>,
{
    entities
        .into_iter()
        .filter(|e| check_aabb(rect, &e.bounds()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::rng::Rng;

    #[test]
    fn overlap_depth() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(check_aabb(&a, &b));
        assert_eq!(get_overlap(&a, &b), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn no_overlap_is_zero() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!check_aabb(&a, &b));
        assert_eq!(get_overlap(&a, &b), Vec2::ZERO);
    }

    #[test]
    fn push_out_along_shallow_axis() {
        let moving = Rect::new(8.0, 0.0, 10.0, 10.0);
        let fixed = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(resolve_collision(&moving, &fixed), Vec2::new(10.0, 0.0));
        assert_eq!(collision_side(&moving, &fixed), CollisionSide::Left);
    }

    #[test]
    fn push_out_vertically() {
        // Mover is above the obstacle, sunk 3 units in.
        let moving = Rect::new(2.0, -7.0, 10.0, 10.0);
        let fixed = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert_eq!(resolve_collision(&moving, &fixed), Vec2::new(2.0, -10.0));
        assert_eq!(collision_side(&moving, &fixed), CollisionSide::Bottom);
    }

    #[test]
    fn exact_tie_prefers_x() {
        let moving = Rect::new(-5.0, -5.0, 10.0, 10.0);
        let fixed = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(get_overlap(&moving, &fixed), Vec2::new(5.0, 5.0));
        assert_eq!(resolve_collision(&moving, &fixed), Vec2::new(-10.0, -5.0));
        assert_eq!(collision_side(&moving, &fixed), CollisionSide::Right);
    }

    #[test]
    fn side_is_none_without_contact() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(50.0, 50.0, 5.0, 5.0);
        assert_eq!(collision_side(&a, &b), CollisionSide::None);
        assert_eq!(resolve_collision(&a, &b), a.pos());
    }

    #[test]
    fn single_resolution_separates() {
        let mut rng = Rng::new(21);
        let fixed = Rect::new(0.0, 0.0, 40.0, 30.0);
        for _ in 0..500 {
            let moving = Rect::new(
                rng.next_range(-20.0, 50.0),
                rng.next_range(-20.0, 40.0),
                rng.next_range(1.0, 25.0),
                rng.next_range(1.0, 25.0),
            );
            let resolved = moving.with_pos(resolve_collision(&moving, &fixed));
            assert_eq!(get_overlap(&resolved, &fixed), Vec2::ZERO, "moving={:?}", moving);
            // and resolving again is a no-op
            assert_eq!(resolve_collision(&resolved, &fixed), resolved.pos());
        }
    }

    #[test]
    fn side_agrees_with_push_direction() {
        let mut rng = Rng::new(5);
        let fixed = Rect::new(0.0, 0.0, 30.0, 30.0);
        for _ in 0..300 {
            let moving = Rect::new(
                rng.next_range(-15.0, 40.0),
                rng.next_range(-15.0, 40.0),
                rng.next_range(1.0, 20.0),
                rng.next_range(1.0, 20.0),
            );
            let delta = resolve_collision(&moving, &fixed) - moving.pos();
            let expected = if delta.x > 0.0 {
                CollisionSide::Left
            } else if delta.x < 0.0 {
                CollisionSide::Right
            } else if delta.y > 0.0 {
                CollisionSide::Top
            } else if delta.y < 0.0 {
                CollisionSide::Bottom
            } else {
                continue;
            };
            assert_eq!(collision_side(&moving, &fixed), expected, "moving={:?}", moving);
        }
    }

    #[test]
    fn clamp_inside_bounds() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = Rect::new(95.0, -5.0, 10.0, 10.0);
        assert_eq!(clamp_to_bounds(&rect, &bounds), Vec2::new(90.0, 0.0));
    }

    #[test]
    fn clamp_oversized_rect_to_origin() {
        let bounds = Rect::new(10.0, 10.0, 50.0, 50.0);
        let rect = Rect::new(30.0, 20.0, 80.0, 10.0);
        assert_eq!(clamp_to_bounds(&rect, &bounds), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn movement_through_thin_wall() {
        let from = Rect::new(0.0, 0.0, 10.0, 10.0);
        let to = Rect::new(40.0, 0.0, 10.0, 10.0);
        let wall = Rect::new(25.0, -50.0, 2.0, 100.0);
        assert!(!check_aabb(&to, &wall));
        assert!(check_movement_collision(&from, &to, &wall));
    }

    #[test]
    fn multiple_keeps_input_order() {
        let rects = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(100.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
        ];
        let hits = check_multiple(&Rect::new(4.0, 4.0, 2.0, 2.0), &rects);
        assert_eq!(hits, vec![&rects[0], &rects[2]]);
    }
}
