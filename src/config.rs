use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::CameraConfig;
use crate::cli::Cli;
use crate::grid::{Maze, OccupancyGrid};

pub const DEFAULT_TILE_SIZE: f32 = 1.0;
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.1;

/// Session settings, read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraConfig,
    pub tile_size: f32,
    /// Text maze layout; the built-in maze is used when absent.
    pub maze: Option<PathBuf>,
    /// Spawn cell as `[row, col]`; the first open cell when absent.
    pub spawn: Option<[usize; 2]>,
    /// Cap on a single frame's delta time, in seconds.
    pub max_frame_delta: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            tile_size: DEFAULT_TILE_SIZE,
            maze: None,
            spawn: None,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    /// Defaults, then the settings file, then command-line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.settings {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(maze) = &cli.maze {
            settings.maze = Some(maze.clone());
        }
        if let Some(tile_size) = cli.tile_size {
            settings.tile_size = tile_size;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would leave the camera unable to move.
    pub fn validate(&self) -> Result<()> {
        // Negated so NaN fails too.
        if !(self.tile_size > 0.0) {
            bail!("tile_size must be positive, got {}", self.tile_size);
        }
        if !(self.max_frame_delta > 0.0) {
            bail!("max_frame_delta must be positive, got {}", self.max_frame_delta);
        }
        Ok(())
    }

    /// World position of the spawn cell's centre, validated against the maze.
    pub fn spawn_point(&self, maze: &Maze) -> Result<Vec3> {
        let (row, col) = match self.spawn {
            Some([row, col]) => match maze.cell(row as i32, col as i32) {
                Some(false) => (row, col),
                Some(true) => bail!("spawn cell [{}, {}] is a wall", row, col),
                None => bail!(
                    "spawn cell [{}, {}] is outside the {}x{} maze",
                    row,
                    col,
                    maze.width(),
                    maze.height()
                ),
            },
            None => maze
                .first_open_cell()
                .context("maze has no open cell to spawn in")?,
        };

        Ok(Maze::cell_center(row, col, self.tile_size))
    }
}
