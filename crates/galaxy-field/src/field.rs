//! The particle field: star and ring populations plus their frame loop.

use galaxy_config::FieldConfig;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core_disc::draw_core;
use crate::ring::{RingParticle, draw_ring_particles, spawn_ring_particles, update_ring_particles};
use crate::star::{BackgroundStar, draw_stars, spawn_stars, update_stars};
use crate::surface::DrawSurface;

/// Owns both particle populations and advances them one frame at a time.
///
/// The random source `R` is only used when populations are (re)generated,
/// so a seeded `R` makes every frame reproducible.
pub struct ParticleField<R = ChaCha8Rng> {
    config: FieldConfig,
    rng: R,
    width: f32,
    height: f32,
    stars: Vec<BackgroundStar>,
    ring_particles: Vec<RingParticle>,
    frame: u64,
}

impl ParticleField<ChaCha8Rng> {
    /// Create a field whose random source is seeded with `seed`.
    pub fn from_seed(config: FieldConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a field seeded from `config.seed`, or from OS entropy when unset.
    pub fn from_config(config: FieldConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("Particle field seed: {seed}");
        Self::from_seed(config, seed)
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create an empty field. Call [`initialize`](Self::initialize) with the
    /// surface size to populate it.
    pub fn new(config: FieldConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            width: 0.0,
            height: 0.0,
            stars: Vec::new(),
            ring_particles: Vec::new(),
            frame: 0,
        }
    }

    /// Discard both populations and generate fresh ones for a surface of
    /// `width × height` pixels.
    ///
    /// Non-positive or non-finite dimensions produce an empty scene.
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.stars.clear();
        self.ring_particles.clear();
        self.frame = 0;

        let has_area = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !has_area {
            self.width = 0.0;
            self.height = 0.0;
            log::debug!("Surface {width}x{height} has no area, particle field left empty");
            return;
        }

        self.width = width;
        self.height = height;
        self.stars = spawn_stars(
            &mut self.rng,
            self.config.star_count as usize,
            width,
            height,
            &self.config,
        );
        self.ring_particles = spawn_ring_particles(
            &mut self.rng,
            self.config.ring_particle_count as usize,
            &self.config,
        );

        log::debug!(
            "Initialized particle field {}x{}: {} stars, {} ring particles",
            width,
            height,
            self.stars.len(),
            self.ring_particles.len()
        );
    }

    /// Regenerate for a new surface size. Nothing carries over from the old
    /// populations.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!(
            "Resizing particle field {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.initialize(width, height);
    }

    /// Replace the configuration and regenerate at the current size.
    pub fn set_config(&mut self, config: FieldConfig) {
        self.config = config;
        let (width, height) = (self.width, self.height);
        self.initialize(width, height);
    }

    /// Advance every particle by one frame without drawing.
    pub fn step(&mut self) {
        if self.is_collapsed() {
            return;
        }
        update_ring_particles(&mut self.ring_particles, self.config.normalize_angles);
        update_stars(
            &mut self.stars,
            self.width,
            self.height,
            self.config.star_alpha,
        );
        self.frame += 1;
    }

    /// Clear the surface and draw the current state: core first, then ring
    /// particles, then stars on top.
    pub fn render<S: DrawSurface>(&self, surface: &mut S) {
        if self.is_collapsed() {
            return;
        }
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        let center = self.center();
        draw_core(surface, center, &self.config);
        draw_ring_particles(&self.ring_particles, center, surface);
        draw_stars(&self.stars, surface);
    }

    /// One animation frame: [`step`](Self::step) then [`render`](Self::render).
    pub fn tick<S: DrawSurface>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    /// Draw only the glowing core at the surface center.
    pub fn draw_core<S: DrawSurface>(&self, surface: &mut S) {
        if self.is_collapsed() {
            return;
        }
        draw_core(surface, self.center(), &self.config);
    }
}

impl<R> ParticleField<R> {
    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn ring_particles(&self) -> &[RingParticle] {
        &self.ring_particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current surface size; `(0, 0)` when collapsed.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Center of the surface, where the core sits and the ring orbits.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Frames stepped since the last (re)initialization.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// `true` when the surface has no area and nothing is simulated or drawn.
    pub fn is_collapsed(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// `true` when neither population has any particles.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty() && self.ring_particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ZeroRng;
    use crate::surface::{DrawCommand, Glow, RecordingSurface};
    use galaxy_config::Rgba;
    use std::f32::consts::TAU;

    const SEED: u64 = 42;

    fn field_800x600() -> ParticleField {
        let mut field = ParticleField::from_seed(FieldConfig::default(), SEED);
        field.initialize(800.0, 600.0);
        field
    }

    fn assert_stars_in_bounds<R>(field: &ParticleField<R>) {
        let (w, h) = field.size();
        for (i, s) in field.stars().iter().enumerate() {
            assert!(
                s.position.x >= 0.0 && s.position.x < w,
                "star {i} x = {} outside [0, {w})",
                s.position.x
            );
            assert!(
                s.position.y >= 0.0 && s.position.y < h,
                "star {i} y = {} outside [0, {h})",
                s.position.y
            );
        }
    }

    #[test]
    fn test_initialize_populates_configured_counts() {
        let field = field_800x600();
        assert_eq!(field.stars().len(), 3000);
        assert_eq!(field.ring_particles().len(), 500);
        assert_eq!(field.center(), Vec2::new(400.0, 300.0));
        assert_stars_in_bounds(&field);
    }

    #[test]
    fn test_hundred_ticks_keep_stars_in_bounds_and_orbits_fixed() {
        let mut field = field_800x600();
        let radii: Vec<f32> = field.ring_particles().iter().map(|p| p.orbit_radius).collect();
        let speeds: Vec<f32> = field.ring_particles().iter().map(|p| p.angular_speed).collect();

        let mut surface = RecordingSurface::new();
        for _ in 0..100 {
            field.tick(&mut surface);
            surface.take();
            assert_stars_in_bounds(&field);
        }

        assert_eq!(field.frame(), 100);
        for (i, p) in field.ring_particles().iter().enumerate() {
            assert_eq!(p.orbit_radius, radii[i], "orbit radius {i} changed");
            assert_eq!(p.angular_speed, speeds[i], "angular speed {i} changed");
        }
    }

    #[test]
    fn test_alpha_stays_within_band_plus_one_step() {
        let mut field = field_800x600();
        let band = field.config().star_alpha;
        let epsilon = field.config().star_alpha_speed.magnitude() + 1e-6;

        for _ in 0..2000 {
            field.step();
            for s in field.stars() {
                assert!(
                    s.alpha >= band.min - epsilon && s.alpha <= band.max + epsilon,
                    "alpha {} escaped [{}, {}]",
                    s.alpha,
                    band.min - epsilon,
                    band.max + epsilon
                );
            }
        }
    }

    #[test]
    fn test_unnormalized_angles_increase_monotonically() {
        let config = FieldConfig {
            normalize_angles: false,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::from_seed(config, SEED);
        field.initialize(800.0, 600.0);

        for _ in 0..50 {
            let before: Vec<f32> = field.ring_particles().iter().map(|p| p.angle).collect();
            field.step();
            for (p, prev) in field.ring_particles().iter().zip(&before) {
                assert!(p.angle > *prev, "angle went from {prev} to {}", p.angle);
                assert!((p.angle - prev - p.angular_speed).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_normalized_angles_stay_in_one_turn() {
        let mut field = field_800x600();
        let mut previous: Vec<f32> = field.ring_particles().iter().map(|p| p.angle).collect();
        for _ in 0..1500 {
            field.step();
            for (p, prev) in field.ring_particles().iter().zip(previous.iter_mut()) {
                assert!((0.0..TAU).contains(&p.angle));
                // Forward progress modulo one turn equals the angular speed.
                let advance = (p.angle - *prev).rem_euclid(TAU);
                assert!((advance - p.angular_speed).abs() < 1e-4);
                *prev = p.angle;
            }
        }
    }

    #[test]
    fn test_zero_size_creates_empty_scene() {
        let mut field = ParticleField::from_seed(FieldConfig::default(), SEED);
        field.initialize(0.0, 0.0);
        assert!(field.is_collapsed());
        assert!(field.is_empty());
        assert!(field.stars().is_empty());
        assert!(field.ring_particles().is_empty());

        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        field.draw_core(&mut surface);
        assert!(surface.is_empty());
        assert_eq!(field.frame(), 0);
    }

    #[test]
    fn test_negative_and_non_finite_sizes_create_empty_scene() {
        let mut field = ParticleField::from_seed(FieldConfig::default(), SEED);
        for (w, h) in [(-10.0, 600.0), (800.0, -1.0), (f32::NAN, 600.0), (800.0, f32::INFINITY)] {
            field.initialize(w, h);
            assert!(field.is_collapsed(), "{w}x{h} should collapse");
            assert!(field.stars().is_empty());
            assert_eq!(field.size(), (0.0, 0.0));
        }
    }

    #[test]
    fn test_collapsed_field_recovers_on_resize() {
        let mut field = ParticleField::from_seed(FieldConfig::default(), SEED);
        field.initialize(0.0, 0.0);
        field.resize(640.0, 480.0);
        assert!(!field.is_collapsed());
        assert_eq!(field.stars().len(), 3000);
    }

    #[test]
    fn test_consecutive_resizes_do_not_accumulate() {
        let mut field = field_800x600();
        field.resize(1024.0, 768.0);
        assert_eq!(field.stars().len(), 3000);
        assert_eq!(field.ring_particles().len(), 500);

        field.resize(300.0, 200.0);
        assert_eq!(field.stars().len(), 3000);
        assert_eq!(field.ring_particles().len(), 500);
        assert_eq!(field.center(), Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_resize_redistributes_within_new_bounds() {
        let mut field = field_800x600();
        let mut sizes = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..25 {
            let w = sizes.random_range(1.0..1600.0_f32);
            let h = sizes.random_range(1.0..1200.0_f32);
            field.resize(w, h);
            assert_stars_in_bounds(&field);
            for _ in 0..10 {
                field.step();
            }
            assert_stars_in_bounds(&field);
        }
    }

    #[test]
    fn test_shrinking_leaves_no_star_at_old_coordinates() {
        let mut field = field_800x600();
        field.resize(100.0, 50.0);
        assert!(field.stars().iter().all(|s| s.position.x < 100.0 && s.position.y < 50.0));
    }

    #[test]
    fn test_initialize_is_an_idempotent_reset() {
        let mut field = field_800x600();
        for _ in 0..5 {
            field.step();
        }
        field.initialize(800.0, 600.0);
        assert_eq!(field.frame(), 0);
        assert_eq!(field.stars().len(), 3000);
        assert_eq!(field.ring_particles().len(), 500);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = field_800x600();
        let b = field_800x600();
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.ring_particles(), b.ring_particles());
    }

    #[test]
    fn test_different_seed_different_field() {
        let a = field_800x600();
        let mut b = ParticleField::from_seed(FieldConfig::default(), SEED + 1);
        b.initialize(800.0, 600.0);
        let differing = a
            .stars()
            .iter()
            .zip(b.stars())
            .filter(|(x, y)| (x.position - y.position).length() > 1.0)
            .count();
        assert!(differing > 2500, "only {differing}/3000 stars differ");
    }

    #[test]
    fn test_from_config_honors_seed() {
        let config = FieldConfig {
            seed: Some(SEED),
            ..FieldConfig::default()
        };
        let mut from_config = ParticleField::from_config(config);
        from_config.initialize(800.0, 600.0);
        assert_eq!(from_config.stars(), field_800x600().stars());
    }

    #[test]
    fn test_injected_rng_gives_exact_first_frame() {
        let config = FieldConfig {
            star_count: 1,
            ring_particle_count: 1,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, ZeroRng);
        field.initialize(800.0, 600.0);

        let star = &field.stars()[0];
        assert_eq!(star.position, Vec2::ZERO);
        let ring = &field.ring_particles()[0];
        assert_eq!(ring.orbit_radius, 40.0);
        assert_eq!(ring.angle, 0.0);

        field.step();
        let star = &field.stars()[0];
        // Drift of -0.5 on both axes wraps to the far edges.
        assert!((star.position.x - 799.5).abs() < 1e-3);
        assert!((star.position.y - 599.5).abs() < 1e-3);
        assert!((star.alpha - 0.305).abs() < 1e-6);
        assert!((field.ring_particles()[0].angle - 0.005).abs() < 1e-7);
    }

    #[test]
    fn test_render_order_core_rings_stars() {
        let config = FieldConfig {
            star_count: 4,
            ring_particle_count: 3,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::from_seed(config.clone(), SEED);
        field.initialize(200.0, 100.0);

        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        let commands = surface.take();
        assert_eq!(commands.len(), 1 + 3 + 3 + 4);

        assert_eq!(
            commands[0],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 100.0
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::SetGlow(Some(Glow {
                color: config.core_color,
                blur: config.core_glow_blur
            }))
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillCircle {
                center: Vec2::new(100.0, 50.0),
                radius: 30.0,
                color: config.core_color
            }
        );
        assert_eq!(commands[3], DrawCommand::SetGlow(None));

        for (command, particle) in commands[4..7].iter().zip(field.ring_particles()) {
            match command {
                DrawCommand::FillCircle { center, color, .. } => {
                    let expected = field.center()
                        + particle.orbit_radius * Vec2::new(particle.angle.cos(), particle.angle.sin());
                    assert!((*center - expected).length() < 1e-3);
                    assert_eq!(*color, particle.color);
                }
                other => panic!("expected ring particle fill, got {other:?}"),
            }
        }

        for (command, star) in commands[7..].iter().zip(field.stars()) {
            match command {
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    assert_eq!(*center, star.position);
                    assert_eq!(*radius, star.radius);
                    assert_eq!(*color, Rgba::WHITE.with_alpha(star.alpha));
                }
                other => panic!("expected star fill, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_render_does_not_advance_state() {
        let field = field_800x600();
        let before = field.stars().to_vec();
        let mut surface = RecordingSurface::new();
        field.render(&mut surface);
        field.render(&mut surface);
        assert_eq!(field.stars(), before.as_slice());
        assert_eq!(field.frame(), 0);
    }

    #[test]
    fn test_set_config_regenerates_at_current_size() {
        let mut field = field_800x600();
        field.set_config(FieldConfig {
            star_count: 10,
            ring_particle_count: 2,
            ..FieldConfig::default()
        });
        assert_eq!(field.size(), (800.0, 600.0));
        assert_eq!(field.stars().len(), 10);
        assert_eq!(field.ring_particles().len(), 2);
    }
}
