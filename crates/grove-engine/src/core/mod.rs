pub mod geometry;
pub mod map_file;
pub mod scene;
