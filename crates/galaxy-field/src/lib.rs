//! Procedural 2D galaxy backdrop: a toroidal field of twinkling stars and a
//! ring of particles orbiting a glowing core.
//!
//! [`ParticleField`] owns both populations. Each frame it advances every
//! particle once and paints the scene onto any [`DrawSurface`], core first,
//! then the ring, then the stars. Resizing regenerates everything for the new
//! dimensions, and a surface without area yields an empty scene.

pub mod core_disc;
pub mod field;
pub mod ring;
pub mod sample;
pub mod star;
pub mod surface;

pub use core_disc::draw_core;
pub use field::ParticleField;
pub use galaxy_config::{Band, FieldConfig, Rgba};
pub use ring::{
    RingParticle, draw_ring_particles, ring_particle_position, spawn_ring_particle,
    spawn_ring_particles, update_ring_particle, update_ring_particles,
};
pub use sample::sample_band;
pub use star::{
    BackgroundStar, draw_stars, spawn_star, spawn_stars, star_color, update_star, update_stars,
};
pub use surface::{DrawCommand, DrawSurface, Glow, RecordingSurface};
