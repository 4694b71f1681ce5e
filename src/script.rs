//! Scripted input replay.
//!
//! A script is a JSON array of events fed straight into the camera, e.g.
//!
//! ```json
//! [
//!   {"move": {"direction": "forward", "dt": 0.016, "repeat": 30}},
//!   {"look": {"dx": 150.0, "dy": 0.0}},
//!   {"zoom": {"dy": 2.0}}
//! ]
//! ```
//!
//! Look offsets use the camera's convention (+dy pitches up), not screen space.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::{Camera, Movement};
use crate::grid::OccupancyGrid;

fn one() -> u32 {
    1
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEvent {
    Move {
        direction: Movement,
        dt: f32,
        #[serde(default = "one")]
        repeat: u32,
    },
    Look {
        dx: f32,
        dy: f32,
        #[serde(default = "yes")]
        constrain_pitch: bool,
    },
    Zoom {
        dy: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub events: Vec<InputEvent>,
}

/// Final pose plus collision tallies from a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseReport {
    pub position: [f32; 3],
    pub front: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub steps: u32,
    /// Steps where one axis was blocked and the camera still moved along the other.
    pub slid: u32,
    /// Steps where one axis was blocked and the open axis had nothing to give.
    pub stopped: u32,
    /// Steps rejected entirely.
    pub blocked: u32,
}

impl PoseReport {
    fn new(camera: &Camera) -> Self {
        Self {
            position: camera.position().to_array(),
            front: camera.front().to_array(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            zoom: camera.zoom(),
            steps: 0,
            slid: 0,
            stopped: 0,
            blocked: 0,
        }
    }
}

impl Script {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script: {:?}", path))?;
        let script = Self::parse(&text)
            .with_context(|| format!("Failed to parse input script: {:?}", path))?;

        log::info!("Loaded input script {:?}: {} events", path, script.events.len());
        Ok(script)
    }

    /// Replay every event in order and report the resulting pose.
    pub fn run<G: OccupancyGrid + ?Sized>(
        &self,
        camera: &mut Camera,
        grid: &G,
        tile_size: f32,
    ) -> PoseReport {
        let mut steps = 0;
        let mut slid = 0;
        let mut stopped = 0;
        let mut blocked = 0;

        for event in &self.events {
            match *event {
                InputEvent::Move {
                    direction,
                    dt,
                    repeat,
                } => {
                    for _ in 0..repeat {
                        let before = camera.position();
                        let collision = camera.process_movement(direction, dt, grid, tile_size);
                        steps += 1;
                        if collision.both() {
                            blocked += 1;
                        } else if collision.any() {
                            if camera.position() == before {
                                stopped += 1;
                            } else {
                                slid += 1;
                            }
                        }
                    }
                }
                InputEvent::Look {
                    dx,
                    dy,
                    constrain_pitch,
                } => camera.process_mouse_movement(dx, dy, constrain_pitch),
                InputEvent::Zoom { dy } => camera.process_mouse_scroll(dy),
            }
        }

        log::debug!(
            "Replayed {} events: {} steps, {} slid, {} stopped, {} blocked",
            self.events.len(),
            steps,
            slid,
            stopped,
            blocked
        );

        PoseReport {
            steps,
            slid,
            stopped,
            blocked,
            ..PoseReport::new(camera)
        }
    }
}
