/// Errors produced when exporting a canvas.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The canvas has no pixels to encode.
    #[error("canvas is empty ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    /// Writing the encoded image failed.
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
