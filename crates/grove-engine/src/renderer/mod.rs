pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{Camera, TileRange};
pub use instance::{DrawCommand, DrawList};
