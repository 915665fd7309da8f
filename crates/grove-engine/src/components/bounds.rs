use crate::core::geometry::Rect;

/// Anything with a world-space bounding box.
pub trait HasBounds {
    fn bounds(&self) -> Rect;
}

/// Anything that can be placed in draw order.
pub trait Drawable: HasBounds {
    /// Layer ordering: lower values draw first (behind).
    fn z_index(&self) -> i32;
}

impl HasBounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Bare rectangles sit on layer 0.
impl Drawable for Rect {
    fn z_index(&self) -> i32 {
        0
    }
}

impl<T: HasBounds + ?Sized> HasBounds for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Drawable + ?Sized> Drawable for &T {
    fn z_index(&self) -> i32 {
        (**self).z_index()
    }
}
