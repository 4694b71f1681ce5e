use glam::Vec3;

/// Map a world position onto the XZ tile lattice, returning `(col, row)`.
/// Height is ignored; the lattice starts at the world origin.
pub fn world_to_tile(pos: Vec3, tile_size: f32) -> (i32, i32) {
    (
        (pos.x / tile_size).floor() as i32,
        (pos.z / tile_size).floor() as i32,
    )
}

/// Tile index along a single axis.
#[inline]
pub fn axis_to_tile(coord: f32, tile_size: f32) -> i32 {
    (coord / tile_size).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_tile_origin() {
        let tile = world_to_tile(Vec3::ZERO, 1.0);
        assert_eq!(tile, (0, 0));
    }

    #[test]
    fn test_world_to_tile_ignores_height() {
        let tile = world_to_tile(Vec3::new(2.5, 40.0, 7.9), 1.0);
        assert_eq!(tile, (2, 7));
    }

    #[test]
    fn test_world_to_tile_scaled() {
        let tile = world_to_tile(Vec3::new(20.0, 0.0, 45.0), 10.0);
        assert_eq!(tile, (2, 4));
    }

    #[test]
    fn test_world_to_tile_negative_floors_down() {
        // Truncation would give 0 here; flooring keeps negatives out of range.
        let tile = world_to_tile(Vec3::new(-0.02, 0.0, -1.5), 1.0);
        assert_eq!(tile, (-1, -2));
    }

    #[test]
    fn test_axis_to_tile_boundary() {
        assert_eq!(axis_to_tile(3.0, 1.5), 2);
        assert_eq!(axis_to_tile(2.999, 1.5), 1);
    }
}
