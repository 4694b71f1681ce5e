mod grid;

pub use grid::{axis_to_tile, world_to_tile};
