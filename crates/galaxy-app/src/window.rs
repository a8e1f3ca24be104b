//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it owns the
//! particle field, the CPU canvas it is drawn on and the GPU presenter that
//! puts the canvas on screen. [`run`] starts the event loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use galaxy_config::{CliArgs, Config, WindowConfig};
use galaxy_field::ParticleField;
use galaxy_raster::PixelCanvas;
use galaxy_render::{
    CanvasPresenter, PresentError, RenderContext, SurfaceError, SurfaceResizeEvent,
    SurfaceWrapper, init_render_context_blocking,
};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_loop::{FpsCounter, FrameLoop};
use crate::platform::PlatformDirs;

/// Builds [`WindowAttributes`] from the window section of the config.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.width as f64,
            config.height as f64,
        ));
    if config.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    ReloadConfig,
    Screenshot,
    Quit,
}

/// Key bindings: Space, F5, F12 and Escape.
pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::Space => Some(KeyAction::TogglePause),
        KeyCode::F5 => Some(KeyAction::ReloadConfig),
        KeyCode::F12 => Some(KeyAction::Screenshot),
        KeyCode::Escape => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Screenshot name stamped with milliseconds since the Unix epoch.
pub fn screenshot_file_name(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("galaxy_{millis}.png")
}

/// Application state: window, GPU presentation and the animated field.
pub struct AppState {
    config: Config,
    overrides: CliArgs,
    dirs: PlatformDirs,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    presenter: Option<CanvasPresenter>,
    surface: SurfaceWrapper,
    field: ParticleField,
    canvas: PixelCanvas,
    frame_loop: FrameLoop,
    fps: FpsCounter,
    paused: bool,
}

impl AppState {
    /// Create the app. The field stays empty until the window reports its
    /// size. `overrides` are re-applied whenever the config is reloaded.
    pub fn new(config: Config, dirs: PlatformDirs, overrides: CliArgs) -> Self {
        let field = ParticleField::from_config(config.field.clone());
        let surface = SurfaceWrapper::new(config.window.width, config.window.height, 1.0);
        Self {
            config,
            overrides,
            dirs,
            window: None,
            gpu: None,
            presenter: None,
            surface,
            field,
            canvas: PixelCanvas::new(0, 0),
            frame_loop: FrameLoop::new(),
            fps: FpsCounter::new(),
            paused: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Regenerate the field and canvas for a window of `width × height`
    /// physical pixels. A zero size leaves both empty.
    pub fn resize_scene(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.field.resize(width as f32, height as f32);
    }

    /// Run the action bound to a key. Returns `true` when the app should exit.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::TogglePause => {
                self.paused = !self.paused;
                self.frame_loop.reset_clock();
                info!("Animation {}", if self.paused { "paused" } else { "resumed" });
            }
            KeyAction::ReloadConfig => self.reload_config(),
            KeyAction::Screenshot => {
                if let Some(path) = self.save_screenshot() {
                    info!("Screenshot saved to {}", path.display());
                }
            }
            KeyAction::Quit => {
                info!("Escape pressed, shutting down");
                return true;
            }
        }
        false
    }

    /// Swap in a new config. The field is regenerated only when its section
    /// changed.
    pub fn apply_config(&mut self, config: Config) {
        if let Err(e) = config.validate() {
            warn!("Ignoring invalid config: {e}");
            return;
        }
        if config.field != self.config.field {
            info!("Field settings changed, regenerating");
            self.field.set_config(config.field.clone());
        }
        if config.window != self.config.window {
            debug!("Window settings changed; size and title apply on next launch");
        }
        self.config = config;
    }

    fn reload_config(&mut self) {
        match self.config.reload(&self.dirs.config_dir) {
            Ok(Some(mut config)) => {
                config.apply_cli_overrides(&self.overrides);
                if config == self.config {
                    info!("Config unchanged after overrides");
                } else {
                    self.apply_config(config);
                }
            }
            Ok(None) => info!("Config unchanged"),
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    /// Write the current canvas to the data directory.
    fn save_screenshot(&self) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.dirs.data_dir) {
            warn!("Cannot create {}: {e}", self.dirs.data_dir.display());
            return None;
        }
        let path = self
            .dirs
            .data_dir
            .join(screenshot_file_name(SystemTime::now()));
        match self.canvas.save_png(&path, self.config.window.background) {
            Ok(()) => Some(path),
            Err(e) => {
                warn!("Screenshot failed: {e}");
                None
            }
        }
    }

    /// Step the field for the elapsed time and draw it on the canvas.
    pub fn update_frame(&mut self) {
        if self.paused {
            self.frame_loop.reset_clock();
        } else {
            let field = &mut self.field;
            self.frame_loop.tick(|| field.step());
        }
        self.field.render(&mut self.canvas);

        if self.config.debug.show_fps
            && let Some(fps) = self.fps.record(Instant::now())
        {
            info!(
                "FPS: {fps:.1} ({} stars, {} ring particles)",
                self.field.stars().len(),
                self.field.ring_particles().len()
            );
        }
    }

    fn apply_resize(&mut self, resize: SurfaceResizeEvent) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(resize.surface.width, resize.surface.height);
        }
        self.resize_scene(resize.requested.width, resize.requested.height);
        info!(
            "Window resized to {}x{} (scale: {:.2})",
            resize.requested.width, resize.requested.height, resize.scale_factor
        );
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(presenter)) = (&self.gpu, &mut self.presenter) else {
            return;
        };
        let background = self.config.window.background;
        let rgba = self.canvas.to_rgba8(background);
        let (width, height) = self.canvas.size();

        match presenter.present(gpu, &rgba, width, height, background) {
            Ok(()) => {}
            Err(PresentError::Surface(SurfaceError::Lost)) => {
                let size = self.surface.surface_size();
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            Err(PresentError::Surface(SurfaceError::OutOfMemory)) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(PresentError::Surface(SurfaceError::Timeout)) => {
                warn!("Surface timeout, skipping frame");
            }
            Err(e) => error!("Failed to present frame: {e}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes(&self.config.window)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner_size = window.inner_size();
        self.surface = SurfaceWrapper::new(
            inner_size.width,
            inner_size.height,
            window.scale_factor(),
        );

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(ctx) => {
                self.presenter = Some(CanvasPresenter::new(ctx.device(), ctx.surface_format()));
                self.gpu = Some(ctx);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        self.resize_scene(inner_size.width, inner_size.height);
        info!(
            "Window ready: {}x{} (scale: {:.2})",
            inner_size.width,
            inner_size.height,
            window.scale_factor()
        );
        self.frame_loop.reset_clock();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(resize) = self
                    .surface
                    .handle_resize(new_size.width, new_size.height)
                {
                    self.apply_resize(resize);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let Some(window) = &self.window else {
                    return;
                };
                let inner = window.inner_size();
                if let Some(resize) =
                    self.surface
                        .handle_scale_factor_changed(scale_factor, inner.width, inner.height)
                {
                    self.apply_resize(resize);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key
                    && let Some(action) = key_action(code)
                    && self.handle_action(action)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                self.update_frame();
                if !self.surface.is_minimized() {
                    self.present(event_loop);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run until it is closed.
#[instrument(skip_all)]
pub fn run(
    config: Config,
    dirs: PlatformDirs,
    overrides: CliArgs,
) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, dirs, overrides);
    event_loop.run_app(&mut app)
}
