use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use anyhow::{anyhow, Context as _};
use fps_clock::FpsClock;
use log::{debug, error, info, warn};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, SyncSender, TryRecvError},
    thread,
};

use crate::controls::Binding;
use crate::data::{Command, Program};

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    pub prog: Program,
    pub window: Option<&'static Window>,
    pub surface: Option<WindowSurface>,
    pub exit_sender: Option<SyncSender<()>>,
    pub final_buffer_size: PhysicalSize<u32>,

    /// Setup error that ended the event loop.
    pub failure: Option<anyhow::Error>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so a second
        // resume must not create another one.
        if self.window.is_some() {
            debug!("Resumed again, keeping the current window");
            return;
        }

        if let Err(e) = self.setup(event_loop) {
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.prog.eval_command(&Command::Close);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.prog
                    .eval_command(&Command::Cursor(position.x, position.y));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.prog.eval_command(&key_to_command(&event));
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                if let Err(e) = resize_surface(surface, width, height) {
                    warn!("{e:#}");
                    return;
                }

                self.final_buffer_size = PhysicalSize::new(width, height);
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            _ => {}
        }

        if self.prog.is_close_requested() {
            event_loop.exit();
        }
    }
}

impl WindowState {
    fn setup(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(
            self.prog.canvas().width() as u32 * scale,
            self.prog.canvas().height() as u32 * scale,
        );

        let window_attributes = Window::default_attributes()
            .with_title("mousesnake")
            .with_inner_size(win_size)
            .with_resizable(false);

        let window: &'static Window = Box::leak(Box::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| anyhow!("Failed to create window: {e}"))?,
        ));

        self.window = Some(window);

        // Some window managers ignore the resizable hint.
        window.set_min_inner_size(Some(win_size));
        window.set_max_inner_size(Some(win_size));

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context =
            Context::new(window).map_err(|e| anyhow!("Failed to create surface context: {e}"))?;
        let mut surface = Surface::new(&context, window)
            .map_err(|e| anyhow!("Failed to create window surface: {e}"))?;

        resize_surface(&mut surface, size.width, size.height)?;

        self.surface = Some(surface);

        let (exit_send, exit_recv) = mpsc::sync_channel(1);

        self.exit_sender = Some(exit_send);

        let fps = self.prog.fps();

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".into())
            .spawn(move || {
                let mut clock = FpsClock::new(fps);

                loop {
                    match exit_recv.try_recv() {
                        Err(TryRecvError::Empty) => {}
                        _ => break,
                    }

                    if !window.is_minimized().unwrap_or(false) {
                        window.request_redraw();
                    }

                    clock.tick();
                }
            })
            .context("Failed to spawn the redraw thread")?;

        info!("Window ready at {}x{}", size.width, size.height);

        Ok(())
    }

    fn redraw(&mut self) {
        let Some(window) = self.window else {
            return;
        };

        self.prog.frame();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(e) => {
                error!("Failed to get the surface buffer: {e}");
                return;
            }
        };

        self.prog.canvas().scale_to(
            self.prog.scale() as usize,
            &mut buffer,
            Some(self.final_buffer_size.width as usize),
        );

        window.pre_present_notify();
        if let Err(e) = buffer.present() {
            error!("Failed to present the frame: {e}");
        }
    }
}

fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> anyhow::Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
        return Err(anyhow!("Surface size {w}x{h} has a zero side"));
    };

    surface
        .resize(w, h)
        .map_err(|e| anyhow!("Failed to resize surface buffer: {e}"))
}

fn key_to_command(event: &KeyEvent) -> Command {
    match binding_for(event.logical_key.as_ref()) {
        Some(binding) => key_command(binding, event.state, event.repeat),
        None => Command::Blank,
    }
}

fn binding_for(key: Key<&str>) -> Option<Binding> {
    match key {
        Key::Named(NamedKey::Space) => Some(Binding::Grow),
        Key::Named(NamedKey::Escape) => Some(Binding::Exit),
        _ => None,
    }
}

fn key_command(binding: Binding, state: ElementState, repeat: bool) -> Command {
    match state {
        ElementState::Pressed if repeat => Command::Blank,
        ElementState::Pressed => Command::Press(binding),
        ElementState::Released => Command::Release(binding),
    }
}

pub fn winit_main(prog: Program) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {e}"))?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        failure: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    let result = event_loop.run_app(&mut state);

    if let Some(sender) = state.exit_sender.take() {
        let _ = sender.try_send(());
    }

    result.map_err(|e| anyhow!("Event loop failed: {e}"))?;

    match state.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
