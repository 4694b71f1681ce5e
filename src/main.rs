use anyhow::{bail, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use maze_camera::cli::Cli;
use maze_camera::config::Settings;
use maze_camera::core::{drive, Clock, FixedHz, FrameInput, WinitController};
use maze_camera::grid::Maze;
use maze_camera::script::Script;
use maze_camera::traits::{Button, Controller};
use maze_camera::Camera;

// === Constants ===

const POSE_LOG_HZ: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

struct App {
    window: Option<Arc<Window>>,
    camera: Camera,
    maze: Maze,
    tile_size: f32,
    input: WinitController,
    clock: Clock,
    pose_timer: FixedHz,
}

impl App {
    fn new(camera: Camera, maze: Maze, settings: &Settings) -> Self {
        Self {
            window: None,
            camera,
            maze,
            tile_size: settings.tile_size,
            input: WinitController::new(),
            clock: Clock::new(settings.max_frame_delta),
            pose_timer: FixedHz::new(POSE_LOG_HZ),
        }
    }

    fn grab_cursor(window: &Window) {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            log::warn!("Cursor grab unavailable, mouse-look may stop at window edges: {}", e);
        }
        window.set_cursor_visible(false);
    }

    fn frame(&mut self) {
        let delta_time = self.clock.tick();
        let input = FrameInput {
            look: self.input.mouse_delta(),
            scroll: self.input.scroll_delta(),
            delta_time,
        };
        self.input.reset_deltas();

        let rejected = drive(&mut self.camera, &self.input, input, &self.maze, self.tile_size);
        if rejected > 0 {
            log::debug!("{} step(s) rejected this frame", rejected);
        }

        let pos = self.camera.position();
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "Maze Camera - ({:.2}, {:.2}) yaw {:.0} pitch {:.0} fov {:.0}",
                pos.x,
                pos.z,
                self.camera.yaw(),
                self.camera.pitch(),
                self.camera.zoom()
            ));
        }

        if self.pose_timer.tick(delta_time) {
            log::info!(
                "pose: position {:?} front {:?} fov {:.1}",
                pos,
                self.camera.front(),
                self.camera.zoom()
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Maze Camera")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            Self::grab_cursor(&window);
            self.window = Some(window);
            self.clock.reset();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.frame(),
            WindowEvent::Focused(true) => {
                if let Some(window) = &self.window {
                    Self::grab_cursor(window);
                }
            }
            other => {
                self.input.process_event(&other);
                if self.input.is_down(Button::Escape) {
                    event_loop.exit();
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.input.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.headless && cli.script.is_none() {
        bail!("--headless needs an input script (--script <FILE>)");
    }
    let settings = Settings::resolve(&cli)?;

    let maze = match &settings.maze {
        Some(path) => Maze::load(path)?,
        None => Maze::default_maze(),
    };
    let mut camera = Camera::new(settings.spawn_point(&maze)?, settings.camera);

    if let Some(path) = &cli.script {
        let report = Script::load(path)?.run(&mut camera, &maze, settings.tile_size);
        println!("{}", serde_json::to_string_pretty(&report)?);
        if cli.headless {
            return Ok(());
        }
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(camera, maze, &settings);

    println!("Maze Camera - Controls: WASD/arrows to walk, mouse to look, wheel to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
