pub mod collision;
pub mod draw_order;
pub mod movement;
pub mod render;
pub mod spatial_grid;
