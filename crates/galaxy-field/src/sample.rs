//! Uniform sampling from configured bands.

use galaxy_config::Band;
use rand::Rng;

/// Draw a value from `[band.min, band.max)`. A degenerate band yields `min`.
pub fn sample_band<R: Rng>(rng: &mut R, band: Band) -> f32 {
    if band.max > band.min {
        rng.random_range(band.min..band.max)
    } else {
        band.min
    }
}

/// A random source that only ever produces zero bits.
///
/// Every uniform float range then yields its lower bound and every index
/// pick yields the first element, so spawned particles are fully predictable.
#[cfg(test)]
pub(crate) struct ZeroRng;

#[cfg(test)]
impl rand::RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}
