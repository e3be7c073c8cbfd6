use anyhow::{anyhow, Context};
use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{
    gfx::{
        rendering::{FrameStatus, RenderEngine},
        scene::Scene,
    },
    logging::{init_logging, LoggingConfig},
};

/// Per-frame animation hook: receives the scene and the seconds elapsed since
/// the first frame.
pub type UpdateCallback = Box<dyn FnMut(&mut Scene, f32)>;

/// Window and renderer settings. All configuration is code-level.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f64; 4],
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "tessel".to_string(),
            width: 1024,
            height: 768,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f64; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

/// Monotonic clock measuring seconds since it was created.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame_index: 0,
        }
    }

    /// Resets the clock baseline.
    pub fn reset(&mut self) {
        self.start = Instant::now();
        self.frame_index = 0;
    }

    pub fn seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Advances the frame counter and returns the current time in seconds.
    pub fn tick(&mut self) -> f32 {
        self.frame_index = self.frame_index.wrapping_add(1);
        self.seconds()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TesselApp {
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    clock: FrameClock,
    update: Option<UpdateCallback>,
    // First fatal error seen inside the event loop, returned from `run`
    error: Option<anyhow::Error>,
}

impl TesselApp {
    pub fn new(config: AppConfig, scene: Scene) -> Self {
        Self {
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                clock: FrameClock::new(),
                update: None,
                error: None,
            },
        }
    }

    /// Set the per-frame animation callback
    pub fn set_update<F>(&mut self, update: F)
    where
        F: FnMut(&mut Scene, f32) + 'static,
    {
        self.app_state.update = Some(Box::new(update));
    }

    pub fn scene(&self) -> &Scene {
        &self.app_state.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Run the application until the window is closed (consumes self)
    pub fn run(mut self) -> anyhow::Result<()> {
        init_logging(self.app_state.config.logging.clone());

        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        self.scene.camera_mut().resize(width, height);

        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.clear_color,
        ))
        .context("failed to initialize renderer")?;

        self.scene
            .init_gpu_resources(renderer.device(), renderer.model_layout());
        log::info!(
            "window {}x{} ready, {} meshes uploaded",
            width,
            height,
            self.scene.len()
        );

        self.clock.reset();
        self.window = Some(window);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::F1 => {
                    render_engine.toggle_wireframe();
                }
                _ => (),
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera_mut().resize(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let time = self.clock.tick();
                if let Some(update) = self.update.as_mut() {
                    self.scene.update(time, |scene, t| update(scene, t));
                }
                render_engine.update(&mut self.scene);

                if render_engine.render_frame(&self.scene) == FrameStatus::Fatal {
                    self.fail(event_loop, anyhow!("GPU out of memory while rendering"));
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.release_gpu_resources();
        self.render_engine = None;
        log::info!(
            "shutting down after {} frames",
            self.clock.frame_index()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "tessel");
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(config.logging.env_filter.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_title("shapes")
            .with_size(640, 480)
            .with_clear_color([0.1, 0.2, 0.3, 1.0])
            .with_logging(LoggingConfig::default().with_filter("debug"));

        assert_eq!(config.title, "shapes");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.clear_color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(config.logging.env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_frame_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert!(first >= 0.0);
        assert!(second >= first);
        assert_eq!(clock.frame_index(), 2);

        clock.reset();
        assert_eq!(clock.frame_index(), 0);
    }

    #[test]
    fn test_set_update_is_stored() {
        let mut app = TesselApp::new(AppConfig::default(), Scene::default());
        assert!(app.app_state.update.is_none());
        app.set_update(|scene, _| {
            scene.camera_mut().set_fov(60.0);
        });

        let mut update = app.app_state.update.take().unwrap();
        update(app.scene_mut(), 0.5);
        assert_eq!(app.scene().camera().fov(), 60.0);
    }
}
