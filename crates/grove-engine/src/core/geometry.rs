//! Axis-aligned world geometry.
//!
//! All rectangles live in one world coordinate space with the origin at the
//! top-left and Y growing downward. There is no rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle: top-left corner plus size.
///
/// `width` and `height` must be non-negative. Rectangles are recomputed from
/// an entity's position every frame and are never stored on their own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from a top-left position and a size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved to a new top-left position.
    pub fn with_pos(self, pos: Vec2) -> Self {
        Self { x: pos.x, y: pos.y, ..self }
    }

    /// Same size, shifted by `delta`.
    pub fn translated(self, delta: Vec2) -> Self {
        self.with_pos(self.pos() + delta)
    }

    /// Non-negative, non-NaN dimensions.
    pub fn is_valid(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Strict overlap: the open intervals intersect on both axes.
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || self.x >= other.right()
            || self.bottom() <= other.y
            || self.y >= other.bottom())
    }

    /// Inclusive overlap: edge contact counts.
    /// Used for area selection and viewport culling.
    pub fn touches(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Point hit-test, inclusive of the boundary.
    ///
    /// Deliberately asymmetric with [`Rect::overlaps`]: clicks on an edge hit,
    /// while exactly aligned movement does not collide.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Whether this rectangle lies entirely within `bounds` (edges inclusive).
    pub fn is_inside(&self, bounds: &Rect) -> bool {
        self.x >= bounds.x
            && self.y >= bounds.y
            && self.right() <= bounds.right()
            && self.bottom() <= bounds.bottom()
    }

    /// The strict overlap region, or `None` if the rectangles do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Bounding box covering both `from` and `to`.
    /// A cheap stand-in for the volume swept by a move between them.
    pub fn swept(from: &Rect, to: &Rect) -> Rect {
        let x = from.x.min(to.x);
        let y = from.y.min(to.y);
        let right = from.right().max(to.right());
        let bottom = from.bottom().max(to.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Euclidean distance between the two centers.
    /// Used for interaction range, never for collision.
    pub fn distance_between_centers(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }
}

/// Circle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Circles overlap when their centers are closer than the sum of radii.
    pub fn overlaps(&self, other: &Circle) -> bool {
        distance(self.x, self.y, other.x, other.y) < self.radius + other.radius
    }
}

/// Distance between two points.
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    Vec2::new(x1, y1).distance(Vec2::new(x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::rng::Rng;

    fn random_rect(rng: &mut Rng) -> Rect {
        Rect::new(
            rng.next_range(-100.0, 100.0),
            rng.next_range(-100.0, 100.0),
            rng.next_range(0.0, 60.0),
            rng.next_range(0.0, 60.0),
        )
    }

    #[test]
    fn overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn edge_touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        // ...but they do touch
        assert!(a.touches(&b));
    }

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(5.0, 10.0));
        assert!(!r.contains(10.01, 5.0));
        assert!(!r.contains(-0.01, 5.0));
    }

    #[test]
    fn overlap_is_symmetric() {
        let mut rng = Rng::new(7);
        for _ in 0..500 {
            let a = random_rect(&mut rng);
            let b = random_rect(&mut rng);
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "a={:?} b={:?}", a, b);
        }
    }

    #[test]
    fn intersection_center_is_inside_both() {
        let mut rng = Rng::new(11);
        let mut checked = 0;
        for _ in 0..500 {
            let a = random_rect(&mut rng);
            let b = random_rect(&mut rng);
            if let Some(region) = a.intersection(&b) {
                let c = region.center();
                assert!(a.contains(c.x, c.y));
                assert!(b.contains(c.x, c.y));
                checked += 1;
            }
        }
        assert!(checked > 0, "sweep produced no overlapping pairs");
    }

    #[test]
    fn intersection_none_when_apart() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn distance_between_centers() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(30.0, 40.0, 10.0, 10.0);
        assert!((a.distance_between_centers(&b) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn swept_covers_both_positions() {
        let from = Rect::new(0.0, 0.0, 10.0, 10.0);
        let to = Rect::new(25.0, -5.0, 10.0, 10.0);
        let swept = Rect::swept(&from, &to);
        assert_eq!(swept, Rect::new(0.0, -5.0, 35.0, 15.0));
        assert!(from.is_inside(&swept));
        assert!(to.is_inside(&swept));
    }

    #[test]
    fn is_inside_bounds() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(Rect::new(0.0, 0.0, 100.0, 100.0).is_inside(&bounds));
        assert!(!Rect::new(95.0, 0.0, 10.0, 10.0).is_inside(&bounds));
    }

    #[test]
    fn circles() {
        let a = Circle::new(0.0, 0.0, 5.0);
        assert!(a.overlaps(&Circle::new(9.0, 0.0, 5.0)));
        // exactly touching is not an overlap
        assert!(!a.overlaps(&Circle::new(10.0, 0.0, 5.0)));
    }
}
