//! Background stars: twinkling points drifting across a toroidal surface.

use galaxy_config::{Band, FieldConfig, Rgba};
use glam::Vec2;
use rand::Rng;

use crate::sample::sample_band;
use crate::surface::DrawSurface;

/// A single background star.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStar {
    /// Position in surface pixels, inside `[0, width) × [0, height)`.
    pub position: Vec2,
    /// Draw radius in pixels.
    pub radius: f32,
    /// Current opacity.
    pub alpha: f32,
    /// Signed opacity change per frame. Flips sign at the alpha band edges.
    pub alpha_velocity: f32,
    /// Drift per frame in pixels.
    pub velocity: Vec2,
}

/// Spawn one star with every attribute sampled from `config`.
///
/// `width` and `height` must be positive.
pub fn spawn_star<R: Rng>(
    rng: &mut R,
    width: f32,
    height: f32,
    config: &FieldConfig,
) -> BackgroundStar {
    let x = sample_band(rng, Band::new(0.0, width));
    let y = sample_band(rng, Band::new(0.0, height));
    let radius = sample_band(rng, config.star_radius);
    let alpha = sample_band(rng, config.star_alpha);
    let alpha_velocity = sample_band(rng, config.star_alpha_speed);
    let dx = sample_band(rng, config.star_drift);
    let dy = sample_band(rng, config.star_drift);

    BackgroundStar {
        position: Vec2::new(x, y),
        radius,
        alpha,
        alpha_velocity,
        velocity: Vec2::new(dx, dy),
    }
}

/// Spawn `count` stars.
pub fn spawn_stars<R: Rng>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
    config: &FieldConfig,
) -> Vec<BackgroundStar> {
    (0..count)
        .map(|_| spawn_star(rng, width, height, config))
        .collect()
}

/// Advance one star by one frame.
///
/// Opacity reflects off the band edges: crossing either bound negates the
/// velocity, so alpha overshoots by at most one step. Position wraps
/// toroidally and always lands in `[0, extent)`.
pub fn update_star(star: &mut BackgroundStar, width: f32, height: f32, alpha_band: Band) {
    star.alpha += star.alpha_velocity;
    if star.alpha > alpha_band.max || star.alpha < alpha_band.min {
        star.alpha_velocity = -star.alpha_velocity;
    }

    star.position += star.velocity;
    star.position.x = wrap(star.position.x, width);
    star.position.y = wrap(star.position.y, height);
}

/// Advance every star by one frame.
pub fn update_stars(stars: &mut [BackgroundStar], width: f32, height: f32, alpha_band: Band) {
    for star in stars {
        update_star(star, width, height, alpha_band);
    }
}

/// White at the star's current opacity.
pub fn star_color(star: &BackgroundStar) -> Rgba {
    Rgba::WHITE.with_alpha(star.alpha)
}

/// Draw every star as a white disc.
pub fn draw_stars<S: DrawSurface>(stars: &[BackgroundStar], surface: &mut S) {
    for star in stars {
        surface.fill_circle(star.position, star.radius, star_color(star));
    }
}

/// Wrap `value` into `[0, extent)`.
pub(crate) fn wrap(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ZeroRng;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn star_at(x: f32, y: f32, velocity: Vec2) -> BackgroundStar {
        BackgroundStar {
            position: Vec2::new(x, y),
            radius: 1.0,
            alpha: 0.5,
            alpha_velocity: 0.01,
            velocity,
        }
    }

    #[test]
    fn test_zero_rng_spawns_at_band_minimums() {
        let config = FieldConfig::default();
        let star = spawn_star(&mut ZeroRng, 800.0, 600.0, &config);
        assert_eq!(star.position, Vec2::ZERO);
        assert_eq!(star.radius, 0.5);
        assert_eq!(star.alpha, 0.3);
        assert_eq!(star.alpha_velocity, 0.005);
        assert_eq!(star.velocity, Vec2::new(-0.5, -0.5));
    }

    #[test]
    fn test_spawned_attributes_within_bands() {
        let config = FieldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let stars = spawn_stars(&mut rng, 2000, 320.0, 200.0, &config);
        assert_eq!(stars.len(), 2000);
        for (i, s) in stars.iter().enumerate() {
            assert!((0.0..320.0).contains(&s.position.x), "star {i} x = {}", s.position.x);
            assert!((0.0..200.0).contains(&s.position.y), "star {i} y = {}", s.position.y);
            assert!(config.star_radius.contains(s.radius));
            assert!(config.star_alpha.contains(s.alpha));
            assert!(config.star_alpha_speed.contains(s.alpha_velocity));
            assert!(config.star_drift.contains(s.velocity.x));
            assert!(config.star_drift.contains(s.velocity.y));
        }
    }

    #[test]
    fn test_wrap_left_edge_reenters_right() {
        let mut star = star_at(0.2, 10.0, Vec2::new(-0.5, 0.0));
        update_star(&mut star, 100.0, 50.0, Band::new(0.3, 0.9));
        assert!((star.position.x - 99.7).abs() < 1e-4, "x = {}", star.position.x);
    }

    #[test]
    fn test_wrap_right_edge_reenters_left() {
        let mut star = star_at(99.8, 49.9, Vec2::new(0.5, 0.5));
        update_star(&mut star, 100.0, 50.0, Band::new(0.3, 0.9));
        assert!((star.position.x - 0.3).abs() < 1e-4, "x = {}", star.position.x);
        assert!((star.position.y - 0.4).abs() < 1e-4, "y = {}", star.position.y);
    }

    #[test]
    fn test_wrap_never_returns_extent() {
        assert_eq!(wrap(100.0, 100.0), 0.0);
        assert!(wrap(-1e-9, 100.0) < 100.0);
        assert_eq!(wrap(0.0, 100.0), 0.0);
    }

    #[test]
    fn test_alpha_reflects_at_upper_bound() {
        let band = Band::new(0.3, 0.9);
        let mut star = star_at(1.0, 1.0, Vec2::ZERO);
        star.alpha = 0.895;
        star.alpha_velocity = 0.01;

        update_star(&mut star, 10.0, 10.0, band);
        assert!(star.alpha > 0.9, "overshoot by one step is allowed");
        assert!(star.alpha_velocity < 0.0);

        update_star(&mut star, 10.0, 10.0, band);
        assert!(star.alpha <= 0.9);
        assert!(star.alpha_velocity < 0.0);
    }

    #[test]
    fn test_alpha_reflects_at_lower_bound() {
        let band = Band::new(0.3, 0.9);
        let mut star = star_at(1.0, 1.0, Vec2::ZERO);
        star.alpha = 0.305;
        star.alpha_velocity = -0.01;

        update_star(&mut star, 10.0, 10.0, band);
        assert!(star.alpha < 0.3);
        assert!(star.alpha_velocity > 0.0);

        update_star(&mut star, 10.0, 10.0, band);
        assert!(star.alpha >= 0.3);
    }

    #[test]
    fn test_draw_uses_white_with_current_alpha() {
        let stars = vec![star_at(3.0, 4.0, Vec2::ZERO)];
        let mut surface = RecordingSurface::new();
        draw_stars(&stars, &mut surface);
        assert_eq!(
            surface.commands(),
            &[DrawCommand::FillCircle {
                center: Vec2::new(3.0, 4.0),
                radius: 1.0,
                color: Rgba::new(255, 255, 255, 0.5),
            }]
        );
    }
}
