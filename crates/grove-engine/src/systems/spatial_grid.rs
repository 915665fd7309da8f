//! Broad-phase uniform grid.
//!
//! The grid borrows the entity slice it was built from, so it cannot outlive
//! the frame's entity list. Rebuild it whenever positions change.

use std::collections::HashMap;

use crate::components::bounds::HasBounds;
use crate::core::geometry::Rect;

/// Default cell size in world units.
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Integer cell coordinate. Uses floor division, so cell -1 is distinct from cell 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub fn of(x: f32, y: f32, cell_size: f32) -> Self {
        Self {
            x: (x / cell_size).floor() as i32,
            y: (y / cell_size).floor() as i32,
        }
    }
}

/// Inclusive range of cells covered by `rect`.
/// A zero-area rect covers exactly one cell.
fn cell_span(rect: &Rect, cell_size: f32) -> (CellKey, CellKey) {
    let min = CellKey::of(rect.x, rect.y, cell_size);
    let max = CellKey::of(rect.right(), rect.bottom(), cell_size);
    (min, max)
}

/// Buckets entity indices by every cell their bounds overlap.
///
/// Queries return a superset of the true collisions (narrow phase filters
/// them) and never miss an entity whose bounds overlap the query rect.
#[derive(Debug)]
pub struct SpatialGrid<'a, T> {
    items: &'a [T],
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    indexed: usize,
}

impl<'a, T: HasBounds> SpatialGrid<'a, T> {
    /// Index every entity in `items`.
    pub fn build(items: &'a [T], cell_size: f32) -> Self {
        Self::build_filtered(items, cell_size, |_| true)
    }

    /// Index only the entities accepted by `keep` (e.g. collidable ones).
    pub fn build_filtered(items: &'a [T], cell_size: f32, keep: impl Fn(&T) -> bool) -> Self {
        let cell_size = sanitize_cell_size(cell_size);
        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        let mut indexed = 0;

        for (index, item) in items.iter().enumerate() {
            if !keep(item) {
                continue;
            }
            let bounds = item.bounds();
            debug_assert!(bounds.is_valid(), "negative entity size: {:?}", bounds);
            let (min, max) = cell_span(&bounds, cell_size);
            for cx in min.x..=max.x {
                for cy in min.y..=max.y {
                    cells.entry(CellKey { x: cx, y: cy }).or_default().push(index);
                }
            }
            indexed += 1;
        }

        log::debug!(
            "spatial grid: {} entities in {} cells (cell size {})",
            indexed,
            cells.len(),
            cell_size
        );

        Self {
            items,
            cell_size,
            cells,
            indexed,
        }
    }

    /// Indices (into the build slice) of every candidate near `rect`,
    /// de-duplicated and in ascending order.
    pub fn query_indices(&self, rect: &Rect) -> Vec<usize> {
        let (min, max) = cell_span(rect, self.cell_size);
        let mut found = Vec::new();
        for cx in min.x..=max.x {
            for cy in min.y..=max.y {
                if let Some(bucket) = self.cells.get(&CellKey { x: cx, y: cy }) {
                    found.extend_from_slice(bucket);
                }
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Candidate entities near `rect`, each listed once, in build order.
    pub fn query(&self, rect: &Rect) -> Vec<&'a T> {
        let items = self.items;
        self.query_indices(rect)
            .into_iter()
            .map(|index| &items[index])
            .collect()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of entities that were indexed.
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }

    /// Indices stored in a single cell.
    pub fn cell(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn sanitize_cell_size(cell_size: f32) -> f32 {
    debug_assert!(
        cell_size.is_finite() && cell_size > 0.0,
        "cell size must be positive, got {}",
        cell_size
    );
    if cell_size.is_finite() && cell_size > 0.0 {
        cell_size
    } else {
        log::warn!("invalid cell size {}, using {}", cell_size, DEFAULT_CELL_SIZE);
        DEFAULT_CELL_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::collision::check_aabb;
    use crate::util::rng::Rng;

    #[test]
    fn finds_entity_in_neighbouring_cell() {
        let items = vec![Rect::new(70.0, 70.0, 10.0, 10.0)];
        let grid = SpatialGrid::build(&items, 64.0);
        let found = grid.query(&Rect::new(60.0, 60.0, 20.0, 20.0));
        assert_eq!(found, vec![&items[0]]);
    }

    #[test]
    fn spanning_entity_appears_in_each_cell_once_per_query() {
        let items = vec![Rect::new(0.0, 0.0, 200.0, 10.0)];
        let grid = SpatialGrid::build(&items, 64.0);
        // cells 0..=3 along x
        assert_eq!(grid.cell_count(), 4);
        assert_eq!(grid.cell(CellKey { x: 2, y: 0 }), &[0]);
        let found = grid.query(&Rect::new(0.0, 0.0, 200.0, 10.0));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn negative_coordinates_use_floor() {
        assert_eq!(CellKey::of(-1.0, -1.0, 64.0), CellKey { x: -1, y: -1 });
        assert_eq!(CellKey::of(-64.0, 0.0, 64.0), CellKey { x: -1, y: 0 });
        assert_eq!(CellKey::of(-64.5, 63.9, 64.0), CellKey { x: -2, y: 0 });

        let items = vec![Rect::new(-30.0, -30.0, 10.0, 10.0), Rect::new(10.0, 10.0, 10.0, 10.0)];
        let grid = SpatialGrid::build(&items, 64.0);
        assert_eq!(grid.query_indices(&Rect::new(-25.0, -25.0, 1.0, 1.0)), vec![0]);
    }

    #[test]
    fn zero_area_query_hits_single_cell() {
        let items = vec![Rect::new(10.0, 10.0, 5.0, 5.0), Rect::new(70.0, 10.0, 5.0, 5.0)];
        let grid = SpatialGrid::build(&items, 64.0);
        assert_eq!(grid.query_indices(&Rect::new(32.0, 32.0, 0.0, 0.0)), vec![0]);
    }

    #[test]
    fn filtered_build_skips_rejected() {
        let items = vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 0.0, 50.0, 50.0)];
        let grid = SpatialGrid::build_filtered(&items, 64.0, |r| r.width > 20.0);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.query_indices(&Rect::new(0.0, 0.0, 5.0, 5.0)), vec![1]);
    }

    #[test]
    fn no_false_negatives() {
        let mut rng = Rng::new(99);
        let items: Vec<Rect> = (0..200)
            .map(|_| {
                Rect::new(
                    rng.next_range(-500.0, 500.0),
                    rng.next_range(-500.0, 500.0),
                    rng.next_range(0.0, 150.0),
                    rng.next_range(0.0, 150.0),
                )
            })
            .collect();

        for &cell_size in &[16.0, 64.0, 100.0] {
            let grid = SpatialGrid::build(&items, cell_size);
            for _ in 0..200 {
                let query = Rect::new(
                    rng.next_range(-550.0, 550.0),
                    rng.next_range(-550.0, 550.0),
                    rng.next_range(0.0, 120.0),
                    rng.next_range(0.0, 120.0),
                );
                let candidates = grid.query_indices(&query);
                for (index, item) in items.iter().enumerate() {
                    if check_aabb(item, &query) {
                        assert!(
                            candidates.binary_search(&index).is_ok(),
                            "missed {:?} for query {:?} (cell {})",
                            item,
                            query,
                            cell_size
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn release_fallback_for_bad_cell_size() {
        // Debug builds assert; only exercise the fallback in release.
        if cfg!(debug_assertions) {
            return;
        }
        let items = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];
        let grid = SpatialGrid::build(&items, 0.0);
        assert_eq!(grid.cell_size(), DEFAULT_CELL_SIZE);
    }
}
