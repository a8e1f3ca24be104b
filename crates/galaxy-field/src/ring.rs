//! Ring particles orbiting the glowing core at a fixed radius and angular speed.

use std::f32::consts::TAU;

use galaxy_config::{Band, FieldConfig, Rgba};
use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::sample::sample_band;
use crate::surface::DrawSurface;

/// A point on a circular orbit around the surface center.
///
/// Only `angle` changes after spawning.
#[derive(Debug, Clone, PartialEq)]
pub struct RingParticle {
    /// Distance from the center in pixels.
    pub orbit_radius: f32,
    /// Current angular position in radians.
    pub angle: f32,
    /// Angle increment per frame in radians.
    pub angular_speed: f32,
    /// Draw radius in pixels.
    pub size: f32,
    pub color: Rgba,
}

/// Spawn one ring particle with every attribute sampled from `config`.
pub fn spawn_ring_particle<R: Rng>(rng: &mut R, config: &FieldConfig) -> RingParticle {
    let orbit_radius = sample_band(rng, config.ring_radius);
    let angle = sample_band(rng, Band::new(0.0, TAU));
    let angular_speed = sample_band(rng, config.ring_angular_speed);
    let size = sample_band(rng, config.ring_size);
    let color = config
        .ring_palette
        .choose(rng)
        .copied()
        .unwrap_or(Rgba::WHITE);

    RingParticle {
        orbit_radius,
        angle,
        angular_speed,
        size,
        color,
    }
}

/// Spawn `count` ring particles.
pub fn spawn_ring_particles<R: Rng>(
    rng: &mut R,
    count: usize,
    config: &FieldConfig,
) -> Vec<RingParticle> {
    (0..count).map(|_| spawn_ring_particle(rng, config)).collect()
}

/// Advance one particle along its orbit. With `normalize` the angle is kept
/// in `[0, 2π)`; otherwise it accumulates without bound.
pub fn update_ring_particle(particle: &mut RingParticle, normalize: bool) {
    particle.angle += particle.angular_speed;
    if normalize {
        particle.angle = particle.angle.rem_euclid(TAU);
    }
}

/// Advance every particle along its orbit.
pub fn update_ring_particles(particles: &mut [RingParticle], normalize: bool) {
    for particle in particles {
        update_ring_particle(particle, normalize);
    }
}

/// Absolute position: `center + orbit_radius · (cos angle, sin angle)`.
pub fn ring_particle_position(particle: &RingParticle, center: Vec2) -> Vec2 {
    let (sin, cos) = particle.angle.sin_cos();
    center + particle.orbit_radius * Vec2::new(cos, sin)
}

/// Draw every particle at its orbital position.
pub fn draw_ring_particles<S: DrawSurface>(
    particles: &[RingParticle],
    center: Vec2,
    surface: &mut S,
) {
    for particle in particles {
        surface.fill_circle(
            ring_particle_position(particle, center),
            particle.size,
            particle.color,
        );
    }
}
