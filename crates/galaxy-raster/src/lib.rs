//! CPU rasterization of the galaxy field into an RGBA pixel buffer.

pub mod canvas;
pub mod error;

pub use canvas::PixelCanvas;
pub use error::RasterError;
