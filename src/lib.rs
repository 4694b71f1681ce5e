pub mod camera;
pub mod cli;
pub mod collision;
pub mod config;
pub mod core;
pub mod grid;
pub mod math;
pub mod script;
pub mod traits;
pub mod types;

pub use camera::{Camera, CameraConfig, Movement};
pub use collision::{check_collision, CollisionInfo};
pub use grid::{Maze, OccupancyGrid};
