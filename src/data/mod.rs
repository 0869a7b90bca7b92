pub mod log;
pub mod reader;

use ::log::{info, warn};

use anyhow::Context;

use crate::controls::{Binding, InputState};
use crate::graphics::{
    draw::{DrawParams, Renderer},
    mesh::{MeshId, Topology},
    Canvas,
};
use crate::math::{window_to_world, Vec3};
use crate::modes::Mode;
use crate::snake::Snake;

/// Size of the canvas. World units are canvas pixels.
pub const WORLD_WIDTH: usize = 800;
pub const WORLD_HEIGHT: usize = 600;

pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;

pub const DEFAULT_SCALE: u8 = 1;
pub const MAX_SCALE_FACTOR: u8 = 4;

pub const CURSOR_MARKER_SIZE: Vec3 = Vec3::new(10.0, 10.0, 1.0);
pub const CURSOR_MARKER_COLOR: Vec3 = Vec3::new(1.0, 0.0, 1.0);

/// Startup options. None of them change how the snake moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Window pixels per canvas pixel.
    pub scale: u8,
    pub fps: u32,
    pub quiet: bool,
    pub cursor_marker: bool,
    pub mode: Mode,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            fps: DEFAULT_FPS,
            quiet: false,
            cursor_marker: true,
            mode: Mode::default(),
            help: false,
        }
    }
}

/// What the window backends translate their events into.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    /// Cursor position in window pixels, origin at the top left.
    Cursor(f64, f64),
    Press(Binding),
    Release(Binding),
    Close,
    Blank,
}

/// Main program struct
pub struct Program {
    config: Config,
    input: InputState,
    snake: Snake,
    renderer: Renderer,
    cursor_mesh: MeshId,
}

impl Program {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut renderer = Renderer::new(WORLD_WIDTH, WORLD_HEIGHT)
            .context("Failed to set up the drawing pipeline")?;

        let snake = Snake::new(&mut renderer.meshes).context("Failed to build the snake meshes")?;
        let cursor_mesh = renderer.meshes.create_triangle();

        Ok(Self {
            config,
            input: InputState::new(),
            snake,
            renderer,
            cursor_mesh,
        })
    }

    pub fn eval_command(&mut self, cmd: &Command) {
        match *cmd {
            Command::Cursor(x, y) => self.input.set_cursor(x, y),
            Command::Press(key) => self.input.press(key),
            Command::Release(key) => self.input.release(key),
            Command::Close => self.input.request_exit(),
            Command::Blank => {}
        }
    }

    pub fn eval_commands(&mut self, cmds: &mut Vec<Command>) {
        for cmd in cmds.iter() {
            self.eval_command(cmd);
        }
        cmds.clear();
    }

    /// Cursor position in world space, once the window has reported one.
    pub fn cursor_world(&self) -> Option<Vec3> {
        self.input
            .cursor()
            .map(|cursor| window_to_world(cursor, self.config.scale as f32, WORLD_HEIGHT as f32))
    }

    pub fn update(&mut self) {
        let cursor = self.cursor_world();
        let grow = self.input.take_grow_edges();

        self.snake.update(cursor, grow);

        if grow > 0 {
            info!("The snake is now {} segments long", self.snake.len());
        }
    }

    /// Redraws the whole canvas. A failed draw call drops the rest of
    /// the frame and is logged; the next frame starts from scratch.
    pub fn render(&mut self) {
        self.renderer.clear();

        if let Err(e) = self.snake.draw(&mut self.renderer) {
            warn!("Skipping the rest of the frame: {e}");
            return;
        }

        let Some(cursor) = self.cursor_world().filter(|_| self.config.cursor_marker) else {
            return;
        };

        let marker = DrawParams {
            position: cursor,
            dimensions: CURSOR_MARKER_SIZE,
            color: CURSOR_MARKER_COLOR,
            topology: Topology::Triangles,
            ..Default::default()
        };

        if let Err(e) = self.renderer.draw_geometry(self.cursor_mesh, 3, &marker) {
            warn!("Failed to draw the cursor marker: {e}");
        }
    }

    pub fn frame(&mut self) {
        self.update();
        self.render();
    }

    pub fn canvas(&self) -> &Canvas {
        &self.renderer.pix
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn is_close_requested(&self) -> bool {
        self.input.exit_requested()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn scale(&self) -> u8 {
        self.config.scale
    }

    pub fn fps(&self) -> u32 {
        self.config.fps
    }
}
