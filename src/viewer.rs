//! Windowed viewer: a particle system that follows the mouse.
//!
//! Every frame the viewer ticks the [`Clock`], moves the emitter to the
//! cursor, runs [`ParticleSystem::update`], and draws the packed vertices.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `Space` | pause / resume |
//! | `B` | burst: respawn every particle at the cursor |
//! | `R` | reset the clock |
//! | `Up` / `Down` | double / halve the time scale |
//! | `Escape` | quit |
//!
//! The window title shows FPS, particle count, and how long the update
//! pass took.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::emitter::EmitterConfig;
use crate::error::ViewerError;
use crate::gpu::Renderer;
use crate::input::{Input, KeyCode};
use crate::system::ParticleSystem;
use crate::time::{Clock, Stopwatch};

const TITLE_REFRESH: Duration = Duration::from_millis(500);

/// Viewer builder.
///
/// # Example
///
/// ```ignore
/// Viewer::new(EmitterConfig::new(10_000))
///     .with_title("Particles")
///     .with_size(1280, 720)
///     .run()?;
/// ```
pub struct Viewer {
    config: EmitterConfig,
    title: String,
    size: (u32, u32),
}

impl Viewer {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            title: "pfx2d".to_string(),
            size: (1280, 720),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let system = ParticleSystem::new(self.config)?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        tracing::info!(
            particles = system.len(),
            vertices = system.vertex_count(),
            "starting viewer"
        );

        let mut app = ViewerApp {
            title: self.title,
            size: self.size,
            window: None,
            renderer: None,
            system,
            input: Input::new(),
            clock: Clock::new(),
            update_time: Duration::ZERO,
            last_title: Instant::now(),
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct ViewerApp {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    system: ParticleSystem,
    input: Input,
    clock: Clock,
    /// Duration of the last update pass.
    update_time: Duration,
    last_title: Instant,
    /// First fatal error, returned from `run` after the loop exits.
    error: Option<ViewerError>,
}

impl ViewerApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            self.system.topology(),
            self.system.vertex_count(),
        ))?;

        let size = renderer.size();
        self.system
            .set_emitter(Vec2::new(size.width as f32, size.height as f32) * 0.5);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
        Ok(())
    }

    fn handle_keys(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
        }
        if self.input.key_pressed(KeyCode::Space) {
            self.clock.toggle_pause();
            tracing::info!(paused = self.clock.is_paused(), "toggled pause");
        }
        if self.input.key_pressed(KeyCode::R) {
            self.clock.reset();
        }
        if self.input.key_pressed(KeyCode::B) {
            self.system.respawn_all();
        }
        if self.input.key_pressed(KeyCode::Up) {
            self.clock.set_time_scale(self.clock.time_scale() * 2.0);
        }
        if self.input.key_pressed(KeyCode::Down) {
            self.clock.set_time_scale(self.clock.time_scale() * 0.5);
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_keys(event_loop);

        let delta = self.clock.update();
        if self.input.cursor_inside() {
            self.system.set_emitter(self.input.cursor());
        }

        let timer = Stopwatch::start();
        self.system.update(delta);
        self.update_time = timer.elapsed();

        if let Some(renderer) = &mut self.renderer {
            renderer.upload(self.system.vertices());
            match renderer.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    tracing::warn!("surface lost, reconfiguring");
                    renderer.resize(renderer.size());
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => tracing::warn!("render error: {:?}", e),
            }
        }

        self.refresh_title();
        self.input.end_frame();
    }

    fn refresh_title(&mut self) {
        if self.last_title.elapsed() < TITLE_REFRESH {
            return;
        }
        self.last_title = Instant::now();

        if let Some(window) = &self.window {
            window.set_title(&format!(
                "{} | {:.0} fps | {} particles | update {:.3} ms{}",
                self.title,
                self.clock.fps(),
                self.system.len(),
                self.update_time.as_secs_f64() * 1000.0,
                if self.clock.is_paused() { " | paused" } else { "" },
            ));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                tracing::error!("failed to start viewer: {}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                tracing::info!(
                    width = physical_size.width,
                    height = physical_size.height,
                    "resized"
                );
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
