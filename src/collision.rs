use glam::Vec3;

use crate::grid::OccupancyGrid;
use crate::math::{axis_to_tile, world_to_tile};

/// Per-axis outcome of probing a candidate position against the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionInfo {
    pub collision_x: bool,
    pub collision_z: bool,
}

impl CollisionInfo {
    pub const NONE: Self = Self {
        collision_x: false,
        collision_z: false,
    };

    pub const BOTH: Self = Self {
        collision_x: true,
        collision_z: true,
    };

    pub fn any(&self) -> bool {
        self.collision_x || self.collision_z
    }

    pub fn both(&self) -> bool {
        self.collision_x && self.collision_z
    }

    /// Apply axis-separated sliding: keep `current` on each blocked axis,
    /// take `candidate` on the others. Returns `None` when both axes are blocked.
    pub fn resolve(&self, current: Vec3, candidate: Vec3) -> Option<Vec3> {
        match (self.collision_x, self.collision_z) {
            (true, true) => None,
            (true, false) => Some(Vec3::new(current.x, candidate.y, candidate.z)),
            (false, true) => Some(Vec3::new(candidate.x, candidate.y, current.z)),
            (false, false) => Some(candidate),
        }
    }
}

/// Test the square footprint of half-width `margin` centred on `pos`.
///
/// The X test holds Z at the unoffset row and looks at the footprint's
/// left/right edges; the Z test is the mirror image. Any index outside the
/// grid reports a collision on both axes.
pub fn check_collision<G: OccupancyGrid + ?Sized>(
    pos: Vec3,
    grid: &G,
    tile_size: f32,
    margin: f32,
) -> CollisionInfo {
    let x = axis_to_tile(pos.x + margin, tile_size);
    let x_minus = axis_to_tile(pos.x - margin, tile_size);
    let z = axis_to_tile(pos.z + margin, tile_size);
    let z_minus = axis_to_tile(pos.z - margin, tile_size);
    let (col, row) = world_to_tile(pos, tile_size);

    // Together these four lookups bound-check all six indices.
    let lookups = (
        grid.cell(row, x),
        grid.cell(row, x_minus),
        grid.cell(z, col),
        grid.cell(z_minus, col),
    );

    match lookups {
        (Some(xp), Some(xm), Some(zp), Some(zm)) => CollisionInfo {
            collision_x: xp || xm,
            collision_z: zp || zm,
        },
        _ => CollisionInfo::BOTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Maze;

    fn open_grid() -> Maze {
        Maze::new(10, 10)
    }

    #[test]
    fn test_open_cell_no_collision() {
        let info = check_collision(Vec3::new(5.5, 0.0, 5.5), &open_grid(), 1.0, 0.12);
        assert_eq!(info, CollisionInfo::NONE);
        assert!(!info.any());
    }

    #[test]
    fn test_edge_of_grid_is_both() {
        let info = check_collision(Vec3::new(0.05, 0.0, 5.5), &open_grid(), 1.0, 0.12);
        assert_eq!(info, CollisionInfo::BOTH);

        let info = check_collision(Vec3::new(5.5, 0.0, 9.95), &open_grid(), 1.0, 0.12);
        assert!(info.both());
    }

    #[test]
    fn test_wall_to_east_blocks_x_only() {
        let mut grid = open_grid();
        grid.set_blocked(5, 6, true);
        let info = check_collision(Vec3::new(5.95, 0.0, 5.5), &grid, 1.0, 0.12);
        assert!(info.collision_x);
        assert!(!info.collision_z);
    }

    #[test]
    fn test_wall_to_north_blocks_z_only() {
        let mut grid = open_grid();
        grid.set_blocked(4, 5, true);
        let info = check_collision(Vec3::new(5.5, 0.0, 5.05), &grid, 1.0, 0.12);
        assert!(!info.collision_x);
        assert!(info.collision_z);
    }

    #[test]
    fn test_zero_margin_checks_own_cell() {
        let mut grid = open_grid();
        grid.set_blocked(2, 1, true);
        let info = check_collision(Vec3::new(1.5, 0.0, 2.5), &grid, 1.0, 0.0);
        assert_eq!(info, CollisionInfo::BOTH);

        let info = check_collision(Vec3::new(1.5, 0.0, 3.5), &grid, 1.0, 0.0);
        assert_eq!(info, CollisionInfo::NONE);
    }

    #[test]
    fn test_resolve_policy() {
        let current = Vec3::new(1.0, 2.0, 3.0);
        let candidate = Vec3::new(1.5, 2.5, 3.5);

        assert_eq!(CollisionInfo::BOTH.resolve(current, candidate), None);
        assert_eq!(CollisionInfo::NONE.resolve(current, candidate), Some(candidate));

        let x_only = CollisionInfo { collision_x: true, collision_z: false };
        assert_eq!(x_only.resolve(current, candidate), Some(Vec3::new(1.0, 2.5, 3.5)));

        let z_only = CollisionInfo { collision_x: false, collision_z: true };
        assert_eq!(z_only.resolve(current, candidate), Some(Vec3::new(1.5, 2.5, 3.0)));
    }
}
