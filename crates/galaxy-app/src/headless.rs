//! Window-less rendering of the field into numbered PNG files.

use std::path::{Path, PathBuf};

use galaxy_config::{Config, Rgba};
use galaxy_field::ParticleField;
use galaxy_raster::{PixelCanvas, RasterError};
use tracing::{debug, info, instrument, warn};

/// Errors from a headless run.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Change the canvas size before a given frame is stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeStep {
    pub frame: u32,
    pub width: u32,
    pub height: u32,
}

/// What to render and where to put it.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub frames: u32,
    /// Write every Nth frame. `0` writes only the final frame.
    pub capture_every: u32,
    pub output_dir: PathBuf,
    pub resizes: Vec<ResizeStep>,
}

impl HeadlessOptions {
    pub fn new(frames: u32, capture_every: u32, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            frames,
            capture_every,
            output_dir: output_dir.into(),
            resizes: Vec::new(),
        }
    }

    pub fn with_resize(mut self, frame: u32, width: u32, height: u32) -> Self {
        self.resizes.push(ResizeStep {
            frame,
            width,
            height,
        });
        self
    }

    /// Whether frame `index` (0-based) is written.
    pub fn captures(&self, index: u32) -> bool {
        match self.capture_every {
            0 => index + 1 == self.frames,
            n => index % n == 0,
        }
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessReport {
    pub frames_rendered: u32,
    pub written: Vec<PathBuf>,
}

/// File name of frame `index`, e.g. `frame_00042.png`.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:05}.png")
}

/// Steps a field and rasterizes it to a [`PixelCanvas`] without a window.
pub struct HeadlessRenderer {
    field: ParticleField,
    canvas: PixelCanvas,
    background: Rgba,
}

impl HeadlessRenderer {
    /// Build a renderer sized to the configured window.
    pub fn new(config: &Config) -> Self {
        let field = ParticleField::from_config(config.field.clone());
        Self::with_field(
            field,
            config.window.width,
            config.window.height,
            config.window.background,
        )
    }

    /// Build a renderer around an existing field, regenerating it for
    /// `width × height`.
    pub fn with_field(mut field: ParticleField, width: u32, height: u32, background: Rgba) -> Self {
        field.initialize(width as f32, height as f32);
        Self {
            field,
            canvas: PixelCanvas::new(width, height),
            background,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Resize the canvas and regenerate the field for it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.field.resize(width as f32, height as f32);
    }

    /// Advance and draw one frame.
    pub fn render_frame(&mut self) {
        self.field.tick(&mut self.canvas);
    }

    /// Render `options.frames` frames, writing the captured ones into
    /// `options.output_dir`.
    #[instrument(skip_all, fields(frames = options.frames, dir = %options.output_dir.display()))]
    pub fn run(&mut self, options: &HeadlessOptions) -> Result<HeadlessReport, HeadlessError> {
        std::fs::create_dir_all(&options.output_dir).map_err(|source| {
            HeadlessError::OutputDir {
                path: options.output_dir.clone(),
                source,
            }
        })?;

        let mut report = HeadlessReport::default();
        for index in 0..options.frames {
            for step in options.resizes.iter().filter(|step| step.frame == index) {
                debug!("Frame {index}: resizing to {}x{}", step.width, step.height);
                self.resize(step.width, step.height);
            }

            self.render_frame();
            report.frames_rendered += 1;

            if options.captures(index)
                && let Some(path) = self.capture(&options.output_dir, index)?
            {
                report.written.push(path);
            }
        }

        info!(
            "Rendered {} frames, wrote {} images",
            report.frames_rendered,
            report.written.len()
        );
        Ok(report)
    }

    fn capture(&self, dir: &Path, index: u32) -> Result<Option<PathBuf>, HeadlessError> {
        if self.canvas.is_empty() {
            warn!("Frame {index}: canvas has no area, nothing written");
            return Ok(None);
        }
        let path = dir.join(frame_file_name(index));
        self.canvas.save_png(&path, self.background)?;
        Ok(Some(path))
    }
}
