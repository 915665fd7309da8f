//! Deterministic draw ordering for overlapping sprites.
//!
//! Order is (z-index, y, x), all ascending: lower layers first, and within a
//! layer objects further down the screen draw later, in front. The sort is
//! stable, so entities sharing all three keys keep their input order from
//! frame to frame.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::components::bounds::Drawable;
use crate::core::geometry::Rect;

/// Comparator for the (z-index, y, x) draw key.
pub fn draw_order<T: Drawable + ?Sized>(a: &T, b: &T) -> Ordering {
    let (ra, rb) = (a.bounds(), b.bounds());
    a.z_index()
        .cmp(&b.z_index())
        .then(ra.y.total_cmp(&rb.y))
        .then(ra.x.total_cmp(&rb.x))
}

/// All entities in draw order.
pub fn sort_for_draw<'a, T, I>(entities: I) -> Vec<&'a T>
where
    T: Drawable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&'a T> = entities.into_iter().collect();
    sorted.sort_by(|a, b| draw_order(*a, *b));
    sorted
}

/// Entities with `min_z <= z_index <= max_z`, in draw order.
pub fn sort_for_draw_range<'a, T, I>(entities: I, min_z: i32, max_z: i32) -> Vec<&'a T>
where
    T: Drawable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    sort_for_draw(
        entities
            .into_iter()
            .filter(|e| (min_z..=max_z).contains(&e.z_index())),
    )
}

/// Group entities by z-index. Each group keeps input order.
pub fn organize_layers<'a, T, I>(entities: I) -> BTreeMap<i32, Vec<&'a T>>
where
    T: Drawable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut layers: BTreeMap<i32, Vec<&'a T>> = BTreeMap::new();
    for entity in entities {
        layers.entry(entity.z_index()).or_default().push(entity);
    }
    layers
}

/// Entities touching the camera view (edges inclusive), in input order.
pub fn visible_in<'a, T, I>(entities: I, view: &Rect) -> Vec<&'a T>
where
    T: Drawable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    entities
        .into_iter()
        .filter(|e| e.bounds().touches(view))
        .collect()
}

/// Draw sequence split around a focus entity (normally the player).
#[derive(Debug)]
pub struct DrawPlan<'a, T> {
    /// Entities on layers below the focus.
    pub behind: Vec<&'a T>,
    /// The focus merged with entities on its own layer, by (y, x).
    pub level: Vec<&'a T>,
    /// Entities on layers above the focus.
    pub front: Vec<&'a T>,
}

impl<'a, T> DrawPlan<'a, T> {
    /// The full sequence: behind, level, front.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.behind
            .iter()
            .chain(self.level.iter())
            .chain(self.front.iter())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.behind.len() + self.level.len() + self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plan a frame around `focus`.
///
/// `entities` must not contain the focus itself. Entities on the focus's
/// layer are interleaved with it by position instead of being dropped, and
/// on a full key tie the focus draws last.
pub fn split_around<'a, T>(entities: &'a [T], focus: &'a T) -> DrawPlan<'a, T>
where
    T: Drawable,
{
    let z = focus.z_index();
    let behind = if z == i32::MIN {
        Vec::new()
    } else {
        sort_for_draw_range(entities, i32::MIN, z - 1)
    };
    let front = if z == i32::MAX {
        Vec::new()
    } else {
        sort_for_draw_range(entities, z + 1, i32::MAX)
    };
    let level = sort_for_draw(
        entities
            .iter()
            .filter(|e| e.z_index() == z)
            .chain(std::iter::once(focus)),
    );
    DrawPlan { behind, level, front }
}
