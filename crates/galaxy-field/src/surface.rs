//! The drawing surface the field paints onto.
//!
//! [`DrawSurface`] is the small subset of a 2D canvas the field needs: clearing
//! a rectangle, filling circles, and a soft glow applied to subsequent fills.
//! [`RecordingSurface`] captures the calls instead of rasterizing them, which
//! makes frame contents inspectable without any pixels.

use galaxy_config::Rgba;
use glam::Vec2;

/// Soft shadow drawn around every fill while active, like a canvas `shadowBlur`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    /// Blur radius in pixels.
    pub blur: f32,
}

/// A 2D raster target with canvas-like primitives.
pub trait DrawSurface {
    /// Reset the rectangle to fully transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Set or clear the glow applied to subsequent fills.
    fn set_glow(&mut self, glow: Option<Glow>);

    /// Fill a disc of `radius` pixels centered at `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).clear_rect(x, y, width, height);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        (**self).set_glow(glow);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        (**self).fill_circle(center, radius, color);
    }
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    SetGlow(Option<Glow>),
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
}

/// A surface that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded since creation or the last [`take`](Self::take).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `FillCircle` commands recorded.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.commands.push(DrawCommand::SetGlow(glow));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(surface: &mut impl DrawSurface) {
        surface.clear_rect(0.0, 0.0, 10.0, 10.0);
        surface.fill_circle(Vec2::new(5.0, 5.0), 2.0, Rgba::WHITE);
    }

    #[test]
    fn test_recording_preserves_order() {
        let mut surface = RecordingSurface::new();
        paint(&mut surface);
        assert_eq!(surface.commands().len(), 2);
        assert!(matches!(surface.commands()[0], DrawCommand::ClearRect { .. }));
        assert_eq!(surface.fill_count(), 1);
    }

    #[test]
    fn test_mut_ref_forwards_to_inner_surface() {
        let mut surface = RecordingSurface::new();
        {
            let mut borrowed = &mut surface;
            paint(&mut borrowed);
        }
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn test_take_drains() {
        let mut surface = RecordingSurface::new();
        surface.set_glow(None);
        let taken = surface.take();
        assert_eq!(taken, vec![DrawCommand::SetGlow(None)]);
        assert!(surface.is_empty());
    }
}
