//! The glowing disc at the center of the field.

use galaxy_config::FieldConfig;
use glam::Vec2;

use crate::surface::{DrawSurface, Glow};

/// Draw the core at `center` with its glow, then switch the glow off again
/// so later fills stay crisp.
pub fn draw_core<S: DrawSurface>(surface: &mut S, center: Vec2, config: &FieldConfig) {
    let glow = (config.core_glow_blur > 0.0).then_some(Glow {
        color: config.core_color,
        blur: config.core_glow_blur,
    });

    surface.set_glow(glow);
    surface.fill_circle(center, config.core_radius, config.core_color);
    surface.set_glow(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use galaxy_config::Rgba;

    #[test]
    fn test_core_glow_wraps_fill() {
        let config = FieldConfig::default();
        let mut surface = RecordingSurface::new();
        draw_core(&mut surface, Vec2::new(400.0, 300.0), &config);

        let warm = Rgba::new(255, 230, 200, 1.0);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::SetGlow(Some(Glow {
                    color: warm,
                    blur: 15.0
                })),
                DrawCommand::FillCircle {
                    center: Vec2::new(400.0, 300.0),
                    radius: 30.0,
                    color: warm,
                },
                DrawCommand::SetGlow(None),
            ]
        );
    }

    #[test]
    fn test_zero_blur_disables_glow() {
        let config = FieldConfig {
            core_glow_blur: 0.0,
            ..FieldConfig::default()
        };
        let mut surface = RecordingSurface::new();
        draw_core(&mut surface, Vec2::ZERO, &config);
        assert_eq!(surface.commands()[0], DrawCommand::SetGlow(None));
    }
}
