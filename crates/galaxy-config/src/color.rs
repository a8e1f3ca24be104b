//! CSS-style RGBA color used throughout the configuration and drawing code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel color with a floating point opacity, mirroring CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in [0.0, 1.0].
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    /// Create a color from channel values and opacity.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Return this color with its opacity replaced, clamped to [0, 1].
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channels normalized to `[r, g, b, a]` in [0, 1] (straight alpha).
    pub fn to_unit(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a.clamp(0.0, 1.0),
        ]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(1.4).a, 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(-0.2).a, 0.0);
        assert_eq!(Rgba::WHITE.with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn test_to_unit_normalizes_channels() {
        let unit = Rgba::new(255, 0, 51, 0.25).to_unit();
        assert!((unit[0] - 1.0).abs() < 1e-6);
        assert!(unit[1].abs() < 1e-6);
        assert!((unit[2] - 0.2).abs() < 1e-6);
        assert!((unit[3] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_display_matches_css_syntax() {
        assert_eq!(
            Rgba::new(255, 230, 200, 1.0).to_string(),
            "rgba(255, 230, 200, 1)"
        );
    }
}
