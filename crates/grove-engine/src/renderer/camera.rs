use glam::Vec2;

use crate::api::config::{MapConfig, ViewportConfig};
use crate::core::geometry::Rect;

/// Inclusive-exclusive range of map tiles under the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub start_col: i32,
    pub start_row: i32,
    /// One past the last visible column.
    pub end_col: i32,
    /// One past the last visible row.
    pub end_row: i32,
}

impl TileRange {
    /// Restrict to a `cols` x `rows` map.
    pub fn clamped(self, cols: i32, rows: i32) -> Self {
        Self {
            start_col: self.start_col.max(0),
            start_row: self.start_row.max(0),
            end_col: self.end_col.min(cols),
            end_row: self.end_row.min(rows),
        }
    }
}

/// Scrolling camera for the top-down world.
/// `x`/`y` is the world position of the screen's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// World area the viewport stays inside, if any.
    pub world: Option<Rect>,
    /// Smoothing factor for `follow` (0.0 = instant, 0.99 = very slow).
    pub smoothing: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            world: None,
            smoothing: 0.0,
        }
    }

    /// Camera sized to the viewport and bounded by the map.
    pub fn for_map(map: &MapConfig, viewport: &ViewportConfig) -> Self {
        let mut camera = Self::new(viewport.width, viewport.height);
        camera.world = Some(map.world_bounds());
        camera
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Centre the viewport on a world point, then clamp to the world.
    pub fn look_at(&mut self, cx: f32, cy: f32) {
        self.x = cx - self.width / 2.0;
        self.y = cy - self.height / 2.0;
        self.clamp_to_world();
    }

    /// Move toward centring on a world point. Call once per frame.
    pub fn follow(&mut self, cx: f32, cy: f32, dt_ms: f32) {
        if self.smoothing <= 0.0 {
            self.look_at(cx, cy);
            return;
        }
        // 60 fps reference frame
        let lerp_factor = 1.0 - self.smoothing.powf(dt_ms * 0.06);
        let target_x = cx - self.width / 2.0;
        let target_y = cy - self.height / 2.0;
        self.x += (target_x - self.x) * lerp_factor;
        self.y += (target_y - self.y) * lerp_factor;
        self.clamp_to_world();
    }

    // A viewport larger than the world pins to the world origin.
    fn clamp_to_world(&mut self) {
        if let Some(world) = self.world {
            self.x = self.x.min(world.right() - self.width).max(world.x);
            self.y = self.y.min(world.bottom() - self.height).max(world.y);
        }
    }

    /// The visible world rectangle.
    pub fn view(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y - self.y)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x + self.x, screen.y + self.y)
    }

    /// Tiles touched by the viewport, unclamped.
    pub fn visible_tiles(&self, tile_size: f32) -> TileRange {
        TileRange {
            start_col: (self.x / tile_size).floor() as i32,
            start_row: (self.y / tile_size).floor() as i32,
            end_col: ((self.x + self.width) / tile_size).ceil() as i32,
            end_row: ((self.y + self.height) / tile_size).ceil() as i32,
        }
    }

    /// Whether any part of `rect` is on screen (edges inclusive).
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.touches(&self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(width: f32, height: f32) -> Camera {
        let mut cam = Camera::new(width, height);
        cam.world = Some(Rect::new(0.0, 0.0, 500.0, 400.0));
        cam
    }

    #[test]
    fn look_at_centres_on_target() {
        let mut cam = bounded(100.0, 100.0);
        cam.look_at(200.0, 150.0);
        assert_eq!((cam.x, cam.y), (150.0, 100.0));
    }

    #[test]
    fn clamps_at_world_edges() {
        let mut cam = bounded(100.0, 100.0);
        cam.look_at(0.0, 0.0);
        assert_eq!((cam.x, cam.y), (0.0, 0.0));
        cam.look_at(1000.0, 1000.0);
        assert_eq!((cam.x, cam.y), (400.0, 300.0));
    }

    #[test]
    fn oversized_viewport_pins_to_origin() {
        let mut cam = bounded(800.0, 100.0);
        cam.look_at(250.0, 200.0);
        assert_eq!(cam.x, 0.0);
        assert_eq!(cam.y, 150.0);
    }

    #[test]
    fn unbounded_moves_freely() {
        let mut cam = Camera::new(100.0, 100.0);
        cam.look_at(-500.0, -500.0);
        assert_eq!((cam.x, cam.y), (-550.0, -550.0));
    }

    #[test]
    fn follow_with_smoothing_moves_partway() {
        let mut cam = Camera::new(100.0, 100.0);
        cam.set_smoothing(0.9);
        cam.follow(150.0, 150.0, 16.0);
        assert!(cam.x > 0.0 && cam.x < 100.0);
        assert!(cam.y > 0.0 && cam.y < 100.0);
    }

    #[test]
    fn screen_world_round_trip() {
        let mut cam = bounded(100.0, 100.0);
        cam.look_at(250.0, 250.0);
        let world = Vec2::new(260.0, 240.0);
        let screen = cam.world_to_screen(world);
        assert_eq!(screen, Vec2::new(60.0, 40.0));
        assert_eq!(cam.screen_to_world(screen), world);
    }

    #[test]
    fn visible_tile_range() {
        let mut cam = Camera::new(100.0, 50.0);
        cam.x = 20.0;
        cam.y = 0.0;
        let tiles = cam.visible_tiles(16.0);
        assert_eq!(
            tiles,
            TileRange {
                start_col: 1,
                start_row: 0,
                end_col: 8,
                end_row: 4
            }
        );
        assert_eq!(tiles.clamped(5, 100).end_col, 5);
    }

    #[test]
    fn for_map_uses_config() {
        let cam = Camera::for_map(&MapConfig::default(), &ViewportConfig::default());
        assert_eq!(cam.world, Some(Rect::new(0.0, 0.0, 1600.0, 1120.0)));
        assert_eq!((cam.width, cam.height), (1280.0, 720.0));
    }

    #[test]
    fn visibility_counts_edges() {
        let cam = Camera::new(100.0, 100.0);
        assert!(cam.is_visible(&Rect::new(100.0, 0.0, 10.0, 10.0)));
        assert!(!cam.is_visible(&Rect::new(101.0, 0.0, 10.0, 10.0)));
    }
}
