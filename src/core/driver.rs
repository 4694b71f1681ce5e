use crate::camera::Camera;
use crate::grid::OccupancyGrid;
use crate::traits::Controller;

/// Device deltas gathered over one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Mouse motion in screen convention (+y is down).
    pub look: (f32, f32),
    /// Wheel notches, +y away from the user.
    pub scroll: f32,
    pub delta_time: f32,
}

/// Feed one frame of input into the camera.
///
/// Held movement buttons are applied first, each as its own collision-checked
/// step, then mouse-look with pitch constrained, then zoom. Returns how many
/// steps were rejected outright.
pub fn drive<C, G>(
    camera: &mut Camera,
    controller: &C,
    input: FrameInput,
    grid: &G,
    tile_size: f32,
) -> usize
where
    C: Controller + ?Sized,
    G: OccupancyGrid + ?Sized,
{
    let mut rejected = 0;
    for movement in controller.held_movements() {
        if camera
            .process_movement(movement, input.delta_time, grid, tile_size)
            .both()
        {
            rejected += 1;
        }
    }

    let (dx, dy) = input.look;
    if dx != 0.0 || dy != 0.0 {
        // Screen y grows downward; pitch grows upward.
        camera.process_mouse_movement(dx, -dy, true);
    }

    if input.scroll != 0.0 {
        camera.process_mouse_scroll(input.scroll);
    }

    rejected
}
