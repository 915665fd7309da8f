pub mod bounds;
pub mod entity;
pub mod kind;
pub mod layer;
