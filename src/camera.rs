use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::collision::{check_collision, CollisionInfo};
use crate::grid::OccupancyGrid;
use crate::types::CameraUniform;

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;
pub const DEFAULT_COLLISION_MARGIN: f32 = 0.12;

/// Pitch stays strictly inside ±90° so `front` never lines up with `world_up`.
pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Movement intents, independent of any windowing system's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Construction-time camera settings. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw: f32,
    pub pitch: f32,
    pub world_up: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
    pub collision_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            world_up: Vec3::Y,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            collision_margin: DEFAULT_COLLISION_MARGIN,
        }
    }
}

/// First-person camera that walks the XZ plane of a tile grid.
///
/// `front`, `right` and `up` are always derived from `yaw`/`pitch`; there is
/// no way to set them directly.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
    collision_margin: f32,
}

impl Camera {
    pub fn new(position: Vec3, config: CameraConfig) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: config.world_up,
            right: Vec3::X,
            world_up: config.world_up,
            yaw: config.yaw,
            pitch: config.pitch,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            zoom: config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            collision_margin: config.collision_margin,
        };
        camera.update_camera_vectors();
        camera
    }

    /// Scalar form: position, world up and angles override the config's.
    #[allow(clippy::too_many_arguments)]
    pub fn from_scalars(
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        up_x: f32,
        up_y: f32,
        up_z: f32,
        yaw: f32,
        pitch: f32,
        config: CameraConfig,
    ) -> Self {
        Self::new(
            Vec3::new(pos_x, pos_y, pos_z),
            CameraConfig {
                yaw,
                pitch,
                world_up: Vec3::new(up_x, up_y, up_z),
                ..config
            },
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn collision_margin(&self) -> f32 {
        self.collision_margin
    }

    /// Right-handed look-at from the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            position: self.position.to_array(),
            fov_degrees: self.zoom,
            forward: self.front.to_array(),
            _pad1: 0.0,
            up: self.up.to_array(),
            _pad2: 0.0,
        }
    }

    /// Step along the ground plane, sliding along whichever axis the grid leaves open.
    ///
    /// Forward/backward use `front` with its vertical part removed, so pitch never
    /// changes walking speed. Returns the collision result for the candidate position.
    pub fn process_movement<G: OccupancyGrid + ?Sized>(
        &mut self,
        direction: Movement,
        delta_time: f32,
        grid: &G,
        tile_size: f32,
    ) -> CollisionInfo {
        let velocity = self.movement_speed * delta_time;
        let horizontal_front = Vec3::new(self.front.x, 0.0, self.front.z).normalize_or_zero();

        let step = match direction {
            Movement::Forward => horizontal_front * velocity,
            Movement::Backward => -horizontal_front * velocity,
            Movement::Left => -self.right * velocity,
            Movement::Right => self.right * velocity,
        };
        let candidate = self.position + step;

        let collision = check_collision(candidate, grid, tile_size, self.collision_margin);
        match collision.resolve(self.position, candidate) {
            Some(next) => self.position = next,
            None => log::trace!(
                "{:?} blocked at {:?} (candidate {:?})",
                direction,
                self.position,
                candidate
            ),
        }

        collision
    }

    /// Mouse-look. Offsets are raw deltas, scaled here by the sensitivity.
    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    /// Scroll-wheel zoom: positive offsets narrow the field of view.
    pub fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_camera_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(approx(camera.front(), Vec3::NEG_Z));
        assert!(approx(camera.right(), Vec3::X));
        assert!(approx(camera.up(), Vec3::Y));
        assert_eq!(camera.zoom(), DEFAULT_ZOOM);
        assert_eq!(camera.collision_margin(), DEFAULT_COLLISION_MARGIN);
    }

    #[test]
    fn yaw_zero_looks_down_positive_x() {
        let camera = Camera::new(
            Vec3::ZERO,
            CameraConfig {
                yaw: 0.0,
                ..CameraConfig::default()
            },
        );
        assert!(approx(camera.front(), Vec3::X));
        assert!(approx(camera.right(), Vec3::Z));
    }

    #[test]
    fn from_scalars_overrides_angles() {
        let camera = Camera::from_scalars(1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.0, 30.0, CameraConfig::default());
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 30.0);
        assert!((camera.front().y - 0.5).abs() < EPS);
    }

    #[test]
    fn mouse_movement_scales_by_sensitivity() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(100.0, 50.0, true);
        assert!((camera.yaw() - (DEFAULT_YAW + 10.0)).abs() < EPS);
        assert!((camera.pitch() - 5.0).abs() < EPS);
    }

    #[test]
    fn unconstrained_pitch_is_not_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 1200.0, false);
        assert!((camera.pitch() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn yaw_is_never_clamped() {
        let mut camera = Camera::default();
        for _ in 0..10 {
            camera.process_mouse_movement(3600.0, 0.0, true);
        }
        assert!((camera.yaw() - (DEFAULT_YAW + 3600.0)).abs() < 1e-2);
        // 3600° is ten full turns.
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-3);
    }

    #[test]
    fn config_zoom_is_clamped_on_construction() {
        let camera = Camera::new(
            Vec3::ZERO,
            CameraConfig {
                zoom: 90.0,
                ..CameraConfig::default()
            },
        );
        assert_eq!(camera.zoom(), MAX_ZOOM);
    }

    #[test]
    fn uniform_mirrors_pose() {
        let camera = Camera::new(Vec3::new(1.5, 0.5, 2.5), CameraConfig::default());
        let uniform = camera.to_uniform();
        assert_eq!(uniform.position, [1.5, 0.5, 2.5]);
        assert_eq!(uniform.fov_degrees, DEFAULT_ZOOM);
        assert_eq!(uniform.view, camera.view_matrix().to_cols_array_2d());
    }

    #[test]
    fn config_tuning_carries_through() {
        let config = CameraConfig {
            movement_speed: 4.0,
            mouse_sensitivity: 0.25,
            ..CameraConfig::default()
        };
        let mut camera = Camera::from_scalars(5.5, 0.0, 5.5, 0.0, 2.0, 0.0, 0.0, 0.0, config);

        assert_eq!(camera.movement_speed(), 4.0);
        assert_eq!(camera.mouse_sensitivity(), 0.25);
        assert_eq!(camera.world_up(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(camera.collision_margin(), DEFAULT_COLLISION_MARGIN);

        // Yaw 0 faces +X; a quarter second at speed 4 covers one tile.
        let grid = crate::grid::Maze::new(10, 10);
        camera.process_movement(Movement::Forward, 0.25, &grid, 1.0);
        assert!((camera.position() - Vec3::new(6.5, 0.0, 5.5)).length() < 1e-5);
    }

    #[test]
    fn movement_serde_names_are_lowercase() {
        let json = serde_json::to_string(&Movement::Backward).unwrap();
        assert_eq!(json, "\"backward\"");
        let parsed: Movement = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(parsed, Movement::Left);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: CameraConfig = serde_json::from_str(r#"{"movement_speed": 4.0}"#).unwrap();
        assert_eq!(config.movement_speed, 4.0);
        assert_eq!(config.yaw, DEFAULT_YAW);
        assert_eq!(config.world_up, Vec3::Y);
    }
}
