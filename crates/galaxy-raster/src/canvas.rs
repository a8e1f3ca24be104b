//! Software rasterizer for [`DrawSurface`].
//!
//! Pixels are stored as straight-alpha RGBA in `[0, 1]` and composited with
//! source-over blending in the color space the values were given in, the same
//! way a 2D browser canvas does. Disc edges are antialiased by pixel-center
//! distance, and an active [`Glow`] paints a Gaussian halo beneath each fill.

use std::io::Cursor;
use std::path::Path;

use galaxy_config::Rgba;
use galaxy_field::{DrawSurface, Glow};
use glam::Vec2;

use crate::error::RasterError;

/// Halo opacity at the rim of a glowing disc, relative to the glow color.
const HALO_RIM_OPACITY: f32 = 0.5;

/// Halo cutoff in standard deviations beyond the rim.
const HALO_EXTENT_SIGMAS: f32 = 3.0;

/// An RGBA pixel buffer that can be drawn on and exported.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    glow: Option<Glow>,
}

impl PixelCanvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; pixel_count(width, height)],
            glow: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the canvas has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Resize and clear. No-op when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!(
            "Canvas resized: {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(pixel_count(width, height), [0.0; 4]);
    }

    /// Straight-alpha RGBA of a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// The glow currently applied to fills.
    pub fn glow(&self) -> Option<Glow> {
        self.glow
    }

    /// Flatten onto an opaque `background` and quantize to RGBA8.
    pub fn to_rgba8(&self, background: Rgba) -> Vec<u8> {
        let bg = background.to_unit();
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            let a = px[3];
            let back_a = bg[3] * (1.0 - a);
            let out_a = a + back_a;
            for c in 0..3 {
                let value = if out_a > 0.0 {
                    (px[c] * a + bg[c] * back_a) / out_a
                } else {
                    0.0
                };
                bytes.push(to_byte(value));
            }
            bytes.push(255);
        }
        bytes
    }

    /// Encode the flattened canvas as a PNG.
    pub fn encode_png(&self, background: Rgba) -> Result<Vec<u8>, RasterError> {
        if self.is_empty() {
            return Err(RasterError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }

        let rgba = self.to_rgba8(background);
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(Cursor::new(&mut buffer), self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
            writer.finish()?;
        }
        Ok(buffer)
    }

    /// Encode and write a PNG to `path`.
    pub fn save_png(&self, path: &Path, background: Rgba) -> Result<(), RasterError> {
        let bytes = self.encode_png(background)?;
        std::fs::write(path, bytes)?;
        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel bounds `[x0, x1) x [y0, y1)` touched by a disc of `reach` pixels.
    fn bounds(&self, center: Vec2, reach: f32) -> Option<(u32, u32, u32, u32)> {
        if !center.is_finite() || !reach.is_finite() || reach <= 0.0 {
            return None;
        }
        let x0 = clamp_to(center.x - reach - 1.0, self.width);
        let x1 = clamp_to(center.x + reach + 1.0, self.width);
        let y0 = clamp_to(center.y - reach - 1.0, self.height);
        let y1 = clamp_to(center.y + reach + 1.0, self.height);
        (x0 < x1 && y0 < y1).then_some((x0, x1, y0, y1))
    }

    /// Source-over composite `color` at `coverage` into one pixel.
    fn blend(&mut self, x: u32, y: u32, color: [f32; 4], coverage: f32) {
        let src_a = color[3] * coverage;
        if src_a <= 0.0 {
            return;
        }
        let idx = self.index(x, y);
        let Some(dst) = self.pixels.get_mut(idx) else {
            return;
        };
        let keep = dst[3] * (1.0 - src_a);
        let out_a = src_a + keep;
        for c in 0..3 {
            dst[c] = (color[c] * src_a + dst[c] * keep) / out_a;
        }
        dst[3] = out_a;
    }

    fn paint_halo(&mut self, center: Vec2, radius: f32, glow: Glow) {
        let sigma = glow.blur / 2.0;
        let reach = radius + sigma * HALO_EXTENT_SIGMAS;
        let Some((x0, x1, y0, y1)) = self.bounds(center, reach) else {
            return;
        };
        let color = glow.color.to_unit();
        let two_sigma_sq = 2.0 * sigma * sigma;
        for y in y0..y1 {
            for x in x0..x1 {
                let d = pixel_center(x, y).distance(center);
                let beyond = (d - radius).max(0.0);
                if beyond > reach - radius {
                    continue;
                }
                let falloff = HALO_RIM_OPACITY * (-(beyond * beyond) / two_sigma_sq).exp();
                self.blend(x, y, color, falloff);
            }
        }
    }

    fn paint_disc(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let Some((x0, x1, y0, y1)) = self.bounds(center, radius) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let d = pixel_center(x, y).distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }
}

impl DrawSurface for PixelCanvas {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return;
        }
        let x0 = clamp_to(x.floor(), self.width);
        let x1 = clamp_to((x + width).ceil(), self.width);
        let y0 = clamp_to(y.floor(), self.height);
        let y1 = clamp_to((y + height).ceil(), self.height);
        for row in y0..y1 {
            let start = self.index(x0, row);
            let end = self.index(x1, row);
            if let Some(span) = self.pixels.get_mut(start..end) {
                span.fill([0.0; 4]);
            }
        }
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if let Some(glow) = self.glow
            && glow.blur > 0.0
        {
            self.paint_halo(center, radius, glow);
        }
        self.paint_disc(center, radius, color.to_unit());
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

fn clamp_to(value: f32, limit: u32) -> u32 {
    value.clamp(0.0, limit as f32) as u32
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
