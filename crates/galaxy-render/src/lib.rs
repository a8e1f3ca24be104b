//! wgpu presentation of CPU-rendered frames: device setup, surface sizing and
//! a full-screen blit.

pub mod gpu;
pub mod presenter;
pub mod surface;

pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, init_render_context_blocking,
    surface_config_for,
};
pub use presenter::{CANVAS_TEXTURE_FORMAT, CanvasPresenter, PresentError, clear_color};
pub use surface::{MIN_SURFACE_DIMENSION, SurfaceResizeEvent, SurfaceSize, SurfaceWrapper};
